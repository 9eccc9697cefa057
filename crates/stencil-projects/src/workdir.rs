//! Scoped change of the process working directory

use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Switches the process into a directory and switches back when dropped
///
/// The previous directory is restored on every exit path, including early
/// returns through `?` and unwinding panics.
#[must_use = "the previous working directory is restored when the guard is dropped"]
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    /// Record the current directory, then change into `dir`
    pub fn enter(dir: impl AsRef<Path>) -> Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir.as_ref())?;
        debug!("Entered {}", dir.as_ref().display());
        Ok(Self { previous })
    }

    /// Directory restored on drop
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            warn!(
                "Failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}
