//! Layout transformation for productbuild.
//!
//! productbuild consumes a `root/` subtree mirroring final install
//! locations plus `Plugins/` and `scripts/` subtrees. The extraction root
//! holds everything loose at its top level; this module moves each entry
//! into place. All paths are joined against the extraction root; the
//! process working directory is never changed.

use std::path::Path;

use crate::error::Result;

use super::fs;
use super::settings::Brand;

/// Ordered top-level renames. Order matters: later entries land inside
/// directories earlier entries created, and sources must not collide with
/// destinations of earlier moves.
fn rename_table(brand: Brand) -> Vec<(String, String)> {
    let name = brand.product_name();
    let folder = brand.applications_folder();

    let mut renames = vec![
        (
            format!("Uninstall{name}.app"),
            format!("root/Applications/{folder}/Uninstall{name}.app"),
        ),
        (
            format!("{name}.app"),
            format!("root/Library/Input Methods/{name}.app"),
        ),
        ("LaunchAgents".into(), "root/Library/LaunchAgents".into()),
        (
            "ActivatePane.bundle".into(),
            "Plugins/ActivatePane.bundle".into(),
        ),
        (
            "InstallerSections.plist".into(),
            "Plugins/InstallerSections.plist".into(),
        ),
        ("postflight.sh".into(), "scripts/postinstall".into()),
        ("preflight.sh".into(), "scripts/preinstall".into()),
    ];
    if brand == Brand::Branded {
        renames.push((
            "DevConfirmPane.bundle".into(),
            "Plugins/DevConfirmPane.bundle".into(),
        ));
    }
    renames
}

/// Moves the extraction root's top-level entries into the `root/`,
/// `Plugins/` and `scripts/` subtrees, marks the install scripts
/// executable, and links the Qt tools under /Applications when they were
/// relinked.
pub fn transform_for_productbuild(top_dir: &Path, brand: Brand, qt_relinked: bool) -> Result<()> {
    for (src, dst) in rename_table(brand) {
        log::debug!("Renaming {src} -> {dst}");
        fs::rename_with_parents(&top_dir.join(&src), &top_dir.join(&dst))?;
    }

    fs::set_executable(&top_dir.join("scripts/postinstall"))?;
    fs::set_executable(&top_dir.join("scripts/preinstall"))?;

    if qt_relinked {
        create_tool_symlinks(top_dir, brand)?;
    }

    Ok(())
}

/// Exposes ConfigDialog and DictionaryTool under /Applications.
///
/// The targets are absolute install-time paths; they resolve only once the
/// package is installed, not inside the work tree.
fn create_tool_symlinks(top_dir: &Path, brand: Brand) -> Result<()> {
    let name = brand.product_name();
    let folder = brand.applications_folder();
    let resources_dir = format!("/Library/Input Methods/{name}.app/Contents/Resources");

    for tool in ["ConfigDialog", "DictionaryTool"] {
        fs::symlink(
            Path::new(&format!("{resources_dir}/{tool}.app/")),
            &top_dir.join(format!("root/Applications/{folder}/{tool}.app")),
        )?;
    }
    Ok(())
}
