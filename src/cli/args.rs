//! Command line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::tweaker::settings::{Brand, Settings};

/// Installer archive tweaker for macOS input method packages
#[derive(Parser, Debug)]
#[command(
    name = "installer_tweaker",
    version,
    about = "Restructures an installer zip for productbuild and codesign",
    long_about = "Extracts the installer zip a build system produced, relinks the bundled Qt
applications against the shared frameworks in ConfigDialog.app, optionally
rearranges the tree into the layout productbuild expects and codesigns it,
then writes a new zip.

Usage:
  installer_tweaker --input installer.zip --output tweaked_installer.zip
  installer_tweaker --input installer.zip --output out.zip --productbuild --oss

Exit code 0 = the output archive exists at the given path; a failing external
command aborts the run with that command's exit status."
)]
pub struct Args {
    /// Path to the source installer archive
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path for the tweaked output archive
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Rearrange the tree into the layout productbuild expects and codesign it
    #[arg(long)]
    pub productbuild: bool,

    /// Skip the Qt framework relinking
    #[arg(long)]
    pub noqt: bool,

    /// Use the open-source naming scheme (Mozc) instead of the branded one
    #[arg(long)]
    pub oss: bool,

    /// Scratch directory; a private temporary directory is used when omitted
    #[arg(long = "work_dir", value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Code signing identity; "-" requests ad-hoc signing
    #[arg(long = "codesign_identity", value_name = "ID", default_value = "-")]
    pub codesign_identity: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&Args> for Settings {
    fn from(args: &Args) -> Self {
        Settings {
            input: args.input.clone(),
            output: args.output.clone(),
            productbuild: args.productbuild,
            relink_qt: !args.noqt,
            brand: if args.oss { Brand::Oss } else { Brand::Branded },
            work_dir: args.work_dir.clone(),
            codesign_identity: args.codesign_identity.clone(),
        }
    }
}
