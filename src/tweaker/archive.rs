//! Installer archive staging and emission.
//!
//! Both directions go through the external `unzip`/`zip` tools; `zip` is the
//! only archiver at hand that round-trips symlinks (`-y`), which the
//! framework bundles rely on.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{ErrorExt, Result};

use super::command::{CommandRunner, CommandSpec};
use super::fs;

/// The single top-level folder the input archive must contain.
pub const TOP_DIR_NAME: &str = "installer";

/// Extracts the input archive into the work directory.
///
/// A leftover `installer/` tree from a previous run over the same work
/// directory is removed first. Returns the extraction root.
pub fn stage(runner: &dyn CommandRunner, input: &Path, work_dir: &Path) -> Result<PathBuf> {
    let top_dir = work_dir.join(TOP_DIR_NAME);
    fs::remove_dir_all_if_exists(&top_dir)?;

    runner.run(
        CommandSpec::new("unzip")
            .arg("-q")
            .arg(input)
            .arg("-d")
            .arg(work_dir),
    )?;

    Ok(top_dir)
}

/// Creates the output archive from the work directory's top-level folder.
///
/// `zip` runs with the work directory as the child's working directory so
/// archive entries are rooted at `installer/`; the output path is resolved
/// to an absolute path first so the relocation does not change where it
/// lands. A pre-existing output file is removed.
pub fn emit(runner: &dyn CommandRunner, work_dir: &Path, output: &Path) -> Result<()> {
    fs::remove_file_if_exists(output)?;

    let absolute_output = if output.is_absolute() {
        output.to_path_buf()
    } else {
        env::current_dir()
            .fs_context("failed to resolve current directory", output)?
            .join(output)
    };

    runner.run(
        CommandSpec::new("zip")
            .arg("-q")
            .arg("-ry")
            .arg(absolute_output)
            .arg(TOP_DIR_NAME)
            .current_dir(work_dir),
    )
}
