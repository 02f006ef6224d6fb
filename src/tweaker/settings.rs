//! Resolved run configuration and product naming.

use std::path::PathBuf;

/// Naming scheme of the installer tree being tweaked.
///
/// A two-way switch feeding string templates; the two variants ship the same
/// bundles under different product names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Brand {
    /// Branded GoogleJapaneseInput build.
    Branded,
    /// Open-source Mozc build.
    Oss,
}

impl Brand {
    /// Product name of the main input-method bundle, also the prefix of the
    /// prelauncher and uninstaller bundles.
    pub fn product_name(self) -> &'static str {
        match self {
            Brand::Branded => "GoogleJapaneseInput",
            Brand::Oss => "Mozc",
        }
    }

    /// Folder under /Applications that holds the uninstaller and tool links.
    pub fn applications_folder(self) -> &'static str {
        match self {
            Brand::Branded => "GoogleJapaneseInput.localized",
            Brand::Oss => "Mozc",
        }
    }
}

/// Immutable configuration for one tweaker run.
///
/// `input` and `output` stay optional here; their absence surfaces when the
/// staging or emission step first needs them, not as upfront validation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Source installer archive.
    pub input: Option<PathBuf>,
    /// Destination archive.
    pub output: Option<PathBuf>,
    /// Reshape the tree for productbuild and codesign it.
    pub productbuild: bool,
    /// Relink the Qt sub-applications (on unless --noqt).
    pub relink_qt: bool,
    /// Product naming scheme.
    pub brand: Brand,
    /// Explicit scratch directory; a temporary one is created when absent.
    pub work_dir: Option<PathBuf>,
    /// Identity handed to codesign; "-" means ad-hoc.
    pub codesign_identity: String,
}
