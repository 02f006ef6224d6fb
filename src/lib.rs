//! Installer archive restructuring for macOS input method packages.
//!
//! The build system emits a zip archive holding a single `installer/` folder
//! of loose application bundles and support files. This library reshapes
//! that tree into what productbuild and codesign expect:
//!
//! - relocates the Qt sub-applications' framework references onto one shared
//!   copy inside `ConfigDialog.app`
//! - restores the framework symlinks the archiving step flattened
//! - renames top-level items into the `root/`, `Plugins/` and `scripts/`
//!   layout productbuild consumes
//! - strips stale signatures and re-signs every bundle
//!
//! It can be used both as a CLI tool and as a library dependency; external
//! tools (`unzip`, `zip`, `install_name_tool`, `codesign`) are reached
//! through the [`tweaker::command::CommandRunner`] trait so tests can swap
//! in a recording implementation.

pub mod cli;
pub mod error;
pub mod tweaker;

// Re-export commonly used types
pub use error::{ErrorExt, Result, TweakerError};
