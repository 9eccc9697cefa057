//! Filesystem fixtures

#![allow(dead_code)]

use camino::Utf8PathBuf;
use std::fs;
use std::path::Path;
use stencil_projects::{CommandOutcome, CommandSpec};
use tempfile::TempDir;

/// Convert a temp path to UTF-8
pub fn utf8(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).expect("Invalid UTF-8 path")
}

/// A local template containing a manifest, sources and VCS metadata
pub fn local_template() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("package.json"), "{\"name\":\"starter\"}\n").unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/index.js"), "console.log('hello')\n").unwrap();
    fs::create_dir_all(root.join(".git/refs")).unwrap();
    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::create_dir_all(root.join(".hg")).unwrap();
    fs::write(root.join(".hg/requires"), "store\n").unwrap();
    dir
}

/// Simulates `git clone <url> <target>` by writing a checkout into the last argument
pub fn fake_clone(spec: &CommandSpec) -> CommandOutcome {
    let target = Path::new(spec.get_args().last().expect("clone target"));
    fs::create_dir_all(target.join(".git/objects")).unwrap();
    fs::write(target.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(target.join("package.json"), "{\"name\":\"cloned\"}\n").unwrap();
    fs::write(target.join("README.md"), "# cloned\n").unwrap();
    CommandOutcome::success("")
}
