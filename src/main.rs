//! Installer Tweaker - restructures macOS installer archives.
//!
//! This binary takes the zip archive a build system produces, relocates the
//! bundled Qt applications' framework references, restores flattened
//! framework symlinks, reshapes the tree for productbuild, codesigns it, and
//! writes a new archive.

use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match installer_tweaker::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
