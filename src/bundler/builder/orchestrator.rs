//! Main installer orchestration.
//!
//! This module provides the [`Installer`] driver that runs the pipeline
//! stages in their fixed order:
//!
//! 1. Resolve options (metadata, defaults, overrides, validation)
//! 2. Create the staging tree
//! 3. Render the descriptor and copy the application (concurrently)
//! 4. Pack the intermediate package and locate it
//! 5. Sync remote releases, if configured
//! 6. Releasify
//! 7. Move artifacts to the destination

use crate::bundler::{
    InstallerRequest, Result,
    artifacts::move_artifacts,
    platform::windows::squirrel,
    process::{CommandRunner, SystemRunner},
    settings::Options,
};
use crate::metadata::{derive_defaults, read_package_json};
use chrono::Datelike;
use std::path::PathBuf;

use super::staging::{StagingDir, create_staging_dir};

/// What a successful run produced.
#[derive(Debug)]
pub struct InstallerOutput {
    /// The options the run used.
    pub options: Options,
    /// Staging tree, still on disk. The caller decides when to remove it.
    pub staging_dir: StagingDir,
    /// Final artifact paths under `dest`, sorted.
    pub artifacts: Vec<PathBuf>,
}

/// Pipeline driver.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_squirrel::bundler::{Installer, InstallerBuilder};
///
/// # async fn example() -> kodegen_bundler_squirrel::bundler::Result<()> {
/// let request = InstallerBuilder::new()
///     .src("dist/footest-win32-x64")
///     .dest("dist/installers")
///     .build()?;
///
/// // Removes the staging tree afterwards, success or not
/// let artifacts = Installer::new(request).run_and_cleanup().await?;
/// for artifact in artifacts {
///     println!("Created: {}", artifact.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Installer<R = SystemRunner> {
    request: InstallerRequest,
    runner: R,
}

impl Installer<SystemRunner> {
    /// Creates a driver that runs the real vendored tools.
    pub fn new(request: InstallerRequest) -> Self {
        Self::with_runner(request, SystemRunner::new())
    }
}

impl<R: CommandRunner> Installer<R> {
    /// Creates a driver with a custom process runner.
    pub fn with_runner(request: InstallerRequest, runner: R) -> Self {
        Self { request, runner }
    }

    pub fn request(&self) -> &InstallerRequest {
        &self.request
    }

    /// Reads metadata and merges every option layer into complete [`Options`].
    ///
    /// No directory is created and no tool runs before this succeeds.
    pub async fn resolve_options(&self) -> Result<Options> {
        let request = &self.request;
        let pkg = read_package_json(&request.src, request.logger.as_ref()).await?;
        let defaults = derive_defaults(
            &pkg,
            &request.toolset,
            chrono::Local::now().year(),
            request.logger.as_ref(),
        );

        request
            .overrides
            .clone()
            .layer_over(request.options.clone())
            .layer_over(defaults)
            .finalize(
                request.src.clone(),
                request.dest.clone(),
                request.rename.clone(),
                request.logger.clone(),
            )
    }

    /// Runs the whole pipeline.
    ///
    /// The staging tree is left on disk; see [`InstallerOutput::staging_dir`].
    pub async fn run(&self) -> Result<InstallerOutput> {
        let mut staging = None;
        let result = self.execute(&mut staging).await;
        self.report(result)
    }

    /// Runs the whole pipeline and removes the staging tree afterwards,
    /// whether or not the run succeeded.
    pub async fn run_and_cleanup(&self) -> Result<Vec<PathBuf>> {
        let mut staging = None;
        let result = self.execute(&mut staging).await;

        if let Some(staging) = staging {
            self.request
                .logger
                .log(&format!("Removing {}", staging.root().display()));
            if let Err(e) = staging.remove().await {
                self.request
                    .logger
                    .log(&format!("Failed to remove staging directory: {}", e));
            }
        }

        self.report(result).map(|output| output.artifacts)
    }

    fn report(&self, result: Result<InstallerOutput>) -> Result<InstallerOutput> {
        let logger = &self.request.logger;
        match &result {
            Ok(output) => logger.log(&format!(
                "Successfully created package at {}",
                output.options.dest.display()
            )),
            Err(e) => logger.log(&format!("Error creating package: {}", e)),
        }
        result
    }

    async fn execute(&self, slot: &mut Option<StagingDir>) -> Result<InstallerOutput> {
        let toolset = &self.request.toolset;

        let options = self.resolve_options().await?;
        options.log(&format!(
            "Creating package with options\n{}",
            options.to_pretty_json()?
        ));

        let staging = create_staging_dir(&self.request.staging_base, &options).await?;
        *slot = Some(staging.clone());

        squirrel::create_contents(toolset, &options, &staging).await?;

        squirrel::create_package(&self.runner, toolset, &options, &staging).await?;
        let package = squirrel::find_package(&options, &staging)?;

        squirrel::sync_remote_releases(&self.runner, toolset, &options, &staging).await?;
        squirrel::releasify_package(&self.runner, toolset, &options, &staging, &package).await?;

        let artifacts = move_artifacts(&options, &staging.squirrel_dir()).await?;

        Ok(InstallerOutput {
            options,
            staging_dir: staging,
            artifacts,
        })
    }
}
