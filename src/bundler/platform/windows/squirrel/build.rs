//! NuGet package creation.
//!
//! Packs the staged application into an intermediate `.nupkg` using the
//! vendored `NuGet.exe`, then locates the produced file.

use super::Toolset;
use crate::bundler::{
    builder::StagingDir,
    error::{Error, Result},
    process::{CommandRunner, Invocation},
    settings::Options,
};
use std::path::PathBuf;

/// Builds the `NuGet.exe pack` invocation.
pub fn pack_invocation(toolset: &Toolset, staging: &StagingDir) -> Invocation {
    Invocation::new(toolset.nuget())
        .arg("pack")
        .arg(staging.spec_path())
        .arg("-BasePath")
        .arg(staging.app_dir())
        .arg("-OutputDirectory")
        .arg(staging.nuget_dir())
        .arg("-NoDefaultExcludes")
}

/// Runs the packaging tool.
///
/// # Errors
///
/// [`Error::Packaging`] wrapping the execution failure.
pub async fn create_package<R: CommandRunner>(
    runner: &R,
    toolset: &Toolset,
    options: &Options,
    staging: &StagingDir,
) -> Result<()> {
    options.log(&format!("Creating package at {}", staging.path().display()));

    runner
        .run(&pack_invocation(toolset, staging), options.logger.as_ref())
        .await
        .map_err(|e| Error::Packaging(Box::new(e)))?;
    Ok(())
}

/// Locates the `.nupkg` produced by [`create_package`].
///
/// When several match, the first in lexical order is used.
///
/// # Errors
///
/// [`Error::NotFound`] if nothing matches.
pub fn find_package(options: &Options, staging: &StagingDir) -> Result<PathBuf> {
    let pattern = staging.nuget_dir().join("*.nupkg");
    let pattern = pattern.to_string_lossy().into_owned();
    options.log(&format!("Finding package with pattern {}", pattern));

    let mut matches = glob::glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
    matches.sort();
    matches
        .into_iter()
        .next()
        .ok_or(Error::NotFound { pattern })
}
