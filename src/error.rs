//! Error types for installer tweaking operations.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for tweaker operations
pub type Result<T> = std::result::Result<T, TweakerError>;

/// Main error type for all tweaker operations
#[derive(Error, Debug)]
pub enum TweakerError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem errors annotated with the path they occurred on
    #[error("{context}: {}: {source}", path.display())]
    Fs {
        /// What was being attempted
        context: &'static str,
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying filesystem error
        source: std::io::Error,
    },

    /// An external command could not be spawned
    #[error("failed to spawn `{program}`: {source}")]
    CommandSpawn {
        /// Program that could not be started
        program: String,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// An external command ran and exited unsuccessfully
    #[error("command `{program}` failed: {status}")]
    CommandFailed {
        /// Program that failed
        program: String,
        /// Exit status reported by the OS
        status: ExitStatus,
    },

    /// Directory traversal errors
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl TweakerError {
    /// Process exit code for this error.
    ///
    /// A failed external command propagates its own exit status; everything
    /// else (including a signal-terminated child) exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            TweakerError::CommandFailed { status, .. } => status.code().unwrap_or(1),
            _ => 1,
        }
    }
}

/// Extension trait attaching path context to raw IO results.
pub trait ErrorExt<T> {
    /// Maps an IO error into [`TweakerError::Fs`] with the given context.
    fn fs_context(self, context: &'static str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, context: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| TweakerError::Fs {
            context,
            path: path.to_path_buf(),
            source,
        })
    }
}
