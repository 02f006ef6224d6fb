//! Command line interface for the installer tweaker.

mod args;

pub use args::Args;

use crate::error::Result;
use crate::tweaker::{self, command::SystemRunner, settings::Settings};

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    let settings = Settings::from(&args);

    tweaker::tweak_installer(&settings, &SystemRunner)?;
    Ok(0)
}
