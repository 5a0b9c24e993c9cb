//! Remote release synchronization.
//!
//! Downloads prior releases from the configured feed into the release
//! directory so the release tool can compute a delta package.

use super::Toolset;
use crate::bundler::{
    builder::StagingDir,
    error::{Error, Result},
    process::{CommandRunner, Invocation},
    settings::Options,
};

/// Builds the `SyncReleases.exe` invocation for `url`.
pub fn sync_invocation(toolset: &Toolset, url: &str, staging: &StagingDir) -> Invocation {
    Invocation::new(toolset.sync_releases())
        .arg("--url")
        .arg(url)
        .arg("--releaseDir")
        .arg(staging.squirrel_dir())
}

/// Syncs remote releases when `remoteReleases` is set; otherwise does nothing.
///
/// Returns whether a sync ran. A single attempt is made.
///
/// # Errors
///
/// [`Error::Sync`] wrapping the execution failure.
pub async fn sync_remote_releases<R: CommandRunner>(
    runner: &R,
    toolset: &Toolset,
    options: &Options,
    staging: &StagingDir,
) -> Result<bool> {
    let Some(url) = options.remote_releases.as_deref() else {
        return Ok(false);
    };

    options.log(&format!("Syncing package at {}", staging.path().display()));
    runner
        .run(&sync_invocation(toolset, url, staging), options.logger.as_ref())
        .await
        .map_err(|e| Error::Sync(Box::new(e)))?;
    Ok(true)
}
