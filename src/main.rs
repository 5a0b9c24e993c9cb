//! Kodegen Bundler Squirrel - Squirrel.Windows installers for Electron apps.
//!
//! This binary turns a built Electron application directory into a NuGet
//! package, `RELEASES` manifest and setup executable.

use kodegen_bundler_squirrel::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
