//! Release creation with Squirrel.
//!
//! Turns the intermediate package into the distributable release set:
//! `RELEASES`, the full (and possibly delta) package, `Setup.exe` and,
//! unless disabled, `Setup.msi`.

use super::Toolset;
use crate::bundler::{
    builder::StagingDir,
    error::{Error, ErrorExt, Result},
    process::{CommandRunner, Invocation},
    settings::Options,
};
use path_absolutize::Absolutize;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Arguments for `--releasify`, in order.
///
/// Icon and animation paths are made absolute. At most one
/// `--signWithParams` pair is emitted.
pub fn releasify_args(
    options: &Options,
    package: &Path,
    squirrel_dir: &Path,
) -> Result<Vec<OsString>> {
    let mut args: Vec<OsString> = vec![
        "--releasify".into(),
        package.into(),
        "--releaseDir".into(),
        squirrel_dir.into(),
    ];

    if let Some(icon) = &options.icon {
        args.push("--setupIcon".into());
        args.push(absolute(icon)?.into());
    }

    if let Some(animation) = &options.animation {
        args.push("--loadingGif".into());
        args.push(absolute(animation)?.into());
    }

    if let Some(params) = options.signing.to_params(options.product_name.as_deref())? {
        args.push("--signWithParams".into());
        args.push(params.into());
    }

    if options.no_msi {
        args.push("--no-msi".into());
    }

    Ok(args)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving path", path)?
        .into_owned())
}

/// Runs the release tool against `package`.
///
/// Uses `Squirrel.com` on Windows hosts and `Squirrel-Mono.exe` elsewhere.
///
/// # Errors
///
/// [`Error::Release`] wrapping the execution failure.
pub async fn releasify_package<R: CommandRunner>(
    runner: &R,
    toolset: &Toolset,
    options: &Options,
    staging: &StagingDir,
    package: &Path,
) -> Result<()> {
    options.log(&format!("Releasifying package at {}", staging.path().display()));

    let release = async {
        let args = releasify_args(options, package, &staging.squirrel_dir())?;
        let invocation = Invocation::new(toolset.releasify_tool(cfg!(windows))).args(args);
        runner.run(&invocation, options.logger.as_ref()).await
    };
    release.await.map_err(|e| Error::Release(Box::new(e)))?;
    Ok(())
}
