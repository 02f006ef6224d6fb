//! The installer tweaking pipeline.
//!
//! One linear pass: stage the archive, relink the Qt sub-applications,
//! reshape the tree for productbuild and sign it, emit the new archive.
//! Every failure aborts the run; the work tree is left as-is (the caller is
//! a build pipeline that discards it).

pub mod archive;
pub mod codesign;
pub mod command;
pub mod fs;
pub mod layout;
pub mod qt;
pub mod settings;

use std::path::Path;

use anyhow::anyhow;

use crate::error::Result;

use command::CommandRunner;
use settings::Settings;

/// Runs the whole pipeline described by `settings`.
///
/// When no work directory is configured, a process-private temporary one is
/// created and removed when the run ends, on failure included.
pub fn tweak_installer(settings: &Settings, runner: &dyn CommandRunner) -> Result<()> {
    match &settings.work_dir {
        Some(dir) => tweak_in(settings, runner, dir),
        None => {
            let scratch = tempfile::tempdir()?;
            // Dropped on every exit path, removing the scratch tree.
            tweak_in(settings, runner, scratch.path())
        }
    }
}

fn tweak_in(settings: &Settings, runner: &dyn CommandRunner, work_dir: &Path) -> Result<()> {
    let input = settings
        .input
        .as_deref()
        .ok_or_else(|| anyhow!("no --input archive to extract"))?;
    let output = settings
        .output
        .as_deref()
        .ok_or_else(|| anyhow!("no --output archive to create"))?;

    log::info!("Staging {} into {}", input.display(), work_dir.display());
    let top_dir = archive::stage(runner, input, work_dir)?;

    if settings.relink_qt {
        log::info!("Relinking Qt frameworks");
        qt::relink_qt_apps(runner, &top_dir, settings.brand)?;
    }

    if settings.productbuild {
        log::info!("Transforming layout for productbuild");
        layout::transform_for_productbuild(&top_dir, settings.brand, settings.relink_qt)?;

        log::info!("Signing with identity {:?}", settings.codesign_identity);
        codesign::codesign_tree(runner, &top_dir, &settings.codesign_identity)?;
    }

    log::info!("Writing {}", output.display());
    archive::emit(runner, work_dir, output)
}
