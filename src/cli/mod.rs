//! Command line interface for the Squirrel installer bundler.
//!
//! Thin glue over [`crate::bundler`]: parses arguments, loads the JSON option
//! bag, runs the pipeline, reports the outcome and cleans up staging.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::{Installer, InstallerBuilder, Overrides, Toolset};
use crate::error::{CliError, Result};
use std::path::Path;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Runs the installer for already-parsed arguments.
///
/// Returns the process exit code: 0 when every artifact was produced, 1 when
/// the pipeline failed. Argument and config problems are returned as errors.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let output = OutputManager::new(args.verbose);

    let bag = match &args.config {
        Some(path) => load_config(path).await?,
        None => Overrides::default(),
    };

    let mut builder = InstallerBuilder::new()
        .src(&args.src)
        .dest(&args.dest)
        .overrides(args.overrides())
        .options(bag)
        .logger(output.clone());
    if let Some(vendor_dir) = &args.vendor_dir {
        builder = builder.toolset(Toolset::new(vendor_dir));
    }
    let request = builder.build()?;

    output.progress("Creating package (this may take a while)")?;

    let installer = Installer::new(request);
    let result = if args.keep_staging {
        installer.run().await.map(|run| {
            let _ = output.verbose(&format!(
                "Staging kept at {}",
                run.staging_dir.root().display()
            ));
            run.artifacts
        })
    } else {
        installer.run_and_cleanup().await
    };

    match result {
        Ok(artifacts) => {
            output.success(&format!(
                "Successfully created package at {}",
                args.dest.display()
            ))?;
            for artifact in artifacts {
                output.indent(&artifact.display().to_string())?;
            }
            Ok(0)
        }
        Err(e) => {
            log::error!("{} stage failed", e.stage());
            output.error(&e.to_string());
            Ok(1)
        }
    }
}

/// Reads the `--config` JSON option bag.
pub async fn load_config(path: &Path) -> Result<Overrides> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CliError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let bag = serde_json::from_slice(&bytes).map_err(|e| CliError::ConfigFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(bag)
}
