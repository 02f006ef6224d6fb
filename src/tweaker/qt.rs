//! Qt framework relinking for the bundled sub-applications.
//!
//! Every Qt sub-application ships its own copy of the shared frameworks.
//! Only the copy inside `ConfigDialog.app` is kept; the others are deleted
//! and their executables rewritten to load the shared copy through an
//! `@executable_path`-relative install name. Afterward the shared copy's
//! internal symlinks, which the build system's zip step materialized as
//! regular entries, are restored.

use std::path::Path;

use crate::error::{ErrorExt, Result};

use super::command::{CommandRunner, CommandSpec};
use super::fs;
use super::settings::Brand;

/// Shared Qt frameworks bundled with the installer.
pub const QT_FRAMEWORKS: [&str; 4] = ["QtCore", "QtGui", "QtPrintSupport", "QtWidgets"];

/// Frameworks directory of the shared copy, as seen from a sub-application
/// executable at runtime (three bundle levels up, then into ConfigDialog).
const HOST_FRAMEWORKS_DIR: &str =
    "@executable_path/../../../ConfigDialog.app/Contents/Frameworks";

/// Sub-application bundles that carry their own Qt copies.
fn sub_qt_apps(brand: Brand) -> [String; 5] {
    [
        "AboutDialog".to_string(),
        "DictionaryTool".to_string(),
        "ErrorMessageDialog".to_string(),
        format!("{}Prelauncher", brand.product_name()),
        "WordRegisterDialog".to_string(),
    ]
}

/// Relinks every Qt sub-application against ConfigDialog.app's frameworks,
/// then restores the symlink structure inside those frameworks.
pub fn relink_qt_apps(runner: &dyn CommandRunner, top_dir: &Path, brand: Brand) -> Result<()> {
    let name = brand.product_name();

    for app in sub_qt_apps(brand) {
        let app_dir = top_dir.join(format!("{name}.app/Contents/Resources/{app}.app"));
        log::debug!("Relinking {}", app_dir.display());
        remove_qt_frameworks(runner, &app_dir, &app)?;

        // Remove the Frameworks directory, if it's empty.
        let frameworks_dir = app_dir.join("Contents/Frameworks");
        if fs::is_dir_empty(&frameworks_dir)? {
            std::fs::remove_dir(&frameworks_dir)
                .fs_context("failed to remove empty Frameworks directory", &frameworks_dir)?;
        }
    }

    let host_app = top_dir.join(format!("{name}.app/Contents/Resources/ConfigDialog.app"));
    restore_framework_symlinks(&host_app)
}

/// Deletes one sub-application's bundled framework copies and points its
/// executable at the shared copies instead.
///
/// The framework directories must exist; their absence means the archive's
/// layout deviated from the expected shape.
fn remove_qt_frameworks(
    runner: &dyn CommandRunner,
    app_dir: &Path,
    app_name: &str,
) -> Result<()> {
    let app_file = app_dir.join(format!("Contents/MacOS/{app_name}"));

    for framework in QT_FRAMEWORKS {
        let framework_dir = app_dir.join(format!("Contents/Frameworks/{framework}.framework"));
        std::fs::remove_dir_all(&framework_dir)
            .fs_context("failed to remove bundled framework", &framework_dir)?;

        runner.run(
            CommandSpec::new("install_name_tool")
                .arg("-change")
                .arg(format!("@rpath/{framework}.framework/Versions/A/{framework}"))
                .arg(format!("{HOST_FRAMEWORKS_DIR}/{framework}.framework/{framework}"))
                .arg(&app_file),
        )?;
    }

    Ok(())
}

/// Restores the symlinks inside the shared framework bundles.
///
/// For each framework, in order:
///   Versions/Current -> A
///   <name>           -> Versions/Current/<name>
///   Resources        -> Versions/Current/Resources
///
/// Each path currently holds a regular entry (the flattened symlink); it is
/// removed and the link recreated. A missing entry is an error.
fn restore_framework_symlinks(app_dir: &Path) -> Result<()> {
    for framework in QT_FRAMEWORKS {
        let framework_dir = app_dir.join(format!("Contents/Frameworks/{framework}.framework"));

        fs::replace_with_symlink(Path::new("A"), &framework_dir.join("Versions/Current"))?;
        fs::replace_with_symlink(
            &Path::new("Versions/Current").join(framework),
            &framework_dir.join(framework),
        )?;
        fs::replace_with_symlink(
            Path::new("Versions/Current/Resources"),
            &framework_dir.join("Resources"),
        )?;
    }

    Ok(())
}
