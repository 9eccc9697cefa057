//! Shared utility functions for stencil crates

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Get the user's home directory
///
/// `HOME` wins over `dirs::home_dir()` so that shells and containers which
/// override it are respected.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::home_dir().ok_or(Error::HomeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_home_dir_from_env() {
        if std::env::var("HOME").is_ok() {
            let home = get_home_dir().unwrap();
            assert!(!home.as_os_str().is_empty());
        }
    }
}
