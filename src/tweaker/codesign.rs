//! Signature cleanup and code signing.
//!
//! Three walks over the tree, none following symlinks: strip stale
//! `_CodeSignature` directories, sign the Qt platform plugin copies, sign
//! every application bundle. Each target is handed to `/usr/bin/codesign`
//! individually.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{ErrorExt, Result};

use super::command::{CommandRunner, CommandSpec};

/// Directory name of the signature metadata stripped before re-signing.
const SIGNATURE_DIR: &str = "_CodeSignature";

/// Qt platform plugin, signed wherever a copy appears.
const QT_PLATFORM_PLUGIN: &str = "libqcocoa.dylib";

/// Strips stale signatures, then signs the plugin copies and every
/// application bundle under `top_dir`.
///
/// Plugin dylibs are signed before the bundles containing them.
pub fn codesign_tree(runner: &dyn CommandRunner, top_dir: &Path, identity: &str) -> Result<()> {
    remove_stale_signatures(top_dir)?;

    for entry in WalkDir::new(top_dir) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == QT_PLATFORM_PLUGIN {
            sign(runner, entry.path(), identity)?;
        }
    }

    for entry in WalkDir::new(top_dir) {
        let entry = entry?;
        // Symlinked bundles are aliases of bundles signed elsewhere in the
        // walk; walkdir reports them as symlinks, not directories.
        if entry.file_type().is_dir()
            && entry.file_name().to_string_lossy().ends_with(".app")
        {
            sign(runner, entry.path(), identity)?;
        }
    }

    Ok(())
}

/// Removes every `_CodeSignature` directory without descending into the
/// removed subtrees.
fn remove_stale_signatures(top_dir: &Path) -> Result<()> {
    let mut walker = WalkDir::new(top_dir).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry?;
        if entry.file_type().is_dir() && entry.file_name() == SIGNATURE_DIR {
            log::debug!("Removing stale signature {}", entry.path().display());
            std::fs::remove_dir_all(entry.path())
                .fs_context("failed to remove stale signature", entry.path())?;
            walker.skip_current_dir();
        }
    }
    Ok(())
}

/// Signs one path in place.
fn sign(runner: &dyn CommandRunner, path: &Path, identity: &str) -> Result<()> {
    runner.run(
        CommandSpec::new("/usr/bin/codesign")
            .arg("--force")
            .arg("--sign")
            .arg(identity)
            .arg("--keychain")
            .arg("login.keychain")
            .arg(path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tweaker::command::RecordingRunner;
    use std::ffi::OsString;
    use std::fs as std_fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_signed_tree() -> (TempDir, PathBuf) {
        let work = TempDir::new().unwrap();
        let top_dir = work.path().join("installer");

        let app = top_dir.join("root/Library/Input Methods/Mozc.app");
        std_fs::create_dir_all(app.join("Contents/_CodeSignature")).unwrap();
        std_fs::write(app.join("Contents/_CodeSignature/CodeResources"), "sig").unwrap();

        let sub_app = app.join("Contents/Resources/ConfigDialog.app");
        std_fs::create_dir_all(sub_app.join("Contents/_CodeSignature")).unwrap();
        std_fs::create_dir_all(sub_app.join("Contents/PlugIns/platforms")).unwrap();
        std_fs::write(
            sub_app.join("Contents/PlugIns/platforms/libqcocoa.dylib"),
            "plugin",
        )
        .unwrap();

        (work, top_dir)
    }

    fn signed_paths(runner: &RecordingRunner) -> Vec<OsString> {
        runner
            .recorded()
            .iter()
            .map(|spec| {
                assert_eq!(spec.program, "/usr/bin/codesign");
                assert_eq!(spec.args[..5].to_vec(), vec![
                    OsString::from("--force"),
                    OsString::from("--sign"),
                    OsString::from("-"),
                    OsString::from("--keychain"),
                    OsString::from("login.keychain"),
                ]);
                spec.args[5].clone()
            })
            .collect()
    }

    #[test]
    fn strips_signatures_and_signs_plugins_then_bundles() {
        let (_work, top_dir) = make_signed_tree();

        let runner = RecordingRunner::new();
        codesign_tree(&runner, &top_dir, "-").unwrap();

        // No _CodeSignature directory survives.
        for entry in WalkDir::new(&top_dir) {
            assert_ne!(entry.unwrap().file_name(), SIGNATURE_DIR);
        }

        let signed = signed_paths(&runner);
        let app = top_dir.join("root/Library/Input Methods/Mozc.app");

        // The plugin is signed first, then both bundles, each exactly once.
        assert_eq!(signed.len(), 3);
        assert_eq!(
            signed[0],
            app.join("Contents/Resources/ConfigDialog.app/Contents/PlugIns/platforms/libqcocoa.dylib")
                .into_os_string()
        );
        assert!(signed[1..].contains(&app.clone().into_os_string()));
        assert!(
            signed[1..].contains(
                &app.join("Contents/Resources/ConfigDialog.app").into_os_string()
            )
        );
    }

    #[test]
    fn symlinked_bundles_are_not_signed() {
        let (_work, top_dir) = make_signed_tree();
        let apps = top_dir.join("root/Applications/Mozc");
        std_fs::create_dir_all(&apps).unwrap();
        std::os::unix::fs::symlink(
            "/Library/Input Methods/Mozc.app/Contents/Resources/ConfigDialog.app/",
            apps.join("ConfigDialog.app"),
        )
        .unwrap();

        let runner = RecordingRunner::new();
        codesign_tree(&runner, &top_dir, "-").unwrap();

        let signed = signed_paths(&runner);
        assert!(!signed.contains(&apps.join("ConfigDialog.app").into_os_string()));
    }

    #[test]
    fn identity_is_passed_through() {
        let (_work, top_dir) = make_signed_tree();

        let runner = RecordingRunner::new();
        codesign_tree(&runner, &top_dir, "Developer ID Application: Example").unwrap();

        let first = &runner.recorded()[0];
        assert_eq!(first.args[2], "Developer ID Application: Example");
    }

    #[test]
    fn signing_failure_aborts() {
        let (_work, top_dir) = make_signed_tree();

        let runner = RecordingRunner::failing("/usr/bin/codesign");
        let err = codesign_tree(&runner, &top_dir, "-");
        assert!(err.is_err());
    }
}
