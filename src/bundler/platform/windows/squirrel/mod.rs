//! Windows Squirrel installer creation.
//!
//! Produces a Squirrel release set from a staged Electron application using
//! the vendored NuGet and Squirrel tools.
//!
//! # Module Organization
//!
//! - `template` - `.nuspec` template constant
//! - `toolset` - vendored tool location
//! - `spec` - descriptor rendering
//! - `build` - `NuGet.exe pack` and package lookup
//! - `sync` - `SyncReleases.exe` against a remote feed
//! - `releasify` - `Squirrel --releasify`

mod build;
mod releasify;
mod spec;
mod sync;
mod template;
mod toolset;

pub use build::{create_package, find_package, pack_invocation};
pub use releasify::{releasify_args, releasify_package};
pub use spec::{create_spec, render_spec};
pub use sync::{sync_invocation, sync_remote_releases};
pub use template::NUSPEC_TEMPLATE;
pub use toolset::{Toolset, VENDOR_DIR_ENV};

use crate::bundler::{
    builder::StagingDir,
    error::{Error, Result},
    settings::Options,
    utils::fs,
};

/// Copies the application into the staging tree and adds `Update.exe`.
///
/// # Errors
///
/// [`Error::Content`] with operation `copying application directory`.
pub async fn create_application(
    toolset: &Toolset,
    options: &Options,
    staging: &StagingDir,
) -> Result<()> {
    let app_dir = staging.app_dir();
    options.log(&format!("Copying application to {}", app_dir.display()));

    let copy = async {
        fs::copy_dir(&options.src, &app_dir).await?;
        fs::copy_file(&toolset.update_exe(), &app_dir.join("Update.exe")).await
    };
    copy.await.map_err(|e| Error::Content {
        operation: "copying application directory",
        source: Box::new(e),
    })
}

/// Renders the descriptor and copies the application concurrently.
///
/// Both operations run to completion or the first failure is returned.
pub async fn create_contents(
    toolset: &Toolset,
    options: &Options,
    staging: &StagingDir,
) -> Result<()> {
    options.log("Creating contents of package");
    tokio::try_join!(
        create_spec(options, staging),
        create_application(toolset, options, staging),
    )?;
    Ok(())
}
