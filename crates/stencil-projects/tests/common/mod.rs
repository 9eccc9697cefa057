//! Common test utilities for stencil-projects
//!
//! Provides a fake command runner and filesystem fixtures so the scaffolding
//! flow can be exercised without git, npm or yarn installed.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
