//! svgdok CLI binary entry point
//!
//! This is a thin wrapper that calls the library's `run_cli()` function.

use anyhow::Result;
use svgdok_cli::run_cli;

fn main() -> Result<()> {
    env_logger::init();
    run_cli()
}
