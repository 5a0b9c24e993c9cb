//! Builder for constructing an [`InstallerRequest`].

use super::{LogLogger, Overrides, RenameFn, SharedLogger, default_rename};
use crate::bundler::platform::windows::squirrel::Toolset;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Everything the caller supplies for one pipeline run.
///
/// Constructed via [`InstallerBuilder`].
#[derive(Clone)]
pub struct InstallerRequest {
    pub(crate) src: PathBuf,
    pub(crate) dest: PathBuf,
    pub(crate) overrides: Overrides,
    pub(crate) options: Overrides,
    pub(crate) rename: RenameFn,
    pub(crate) logger: SharedLogger,
    pub(crate) toolset: Toolset,
    pub(crate) staging_base: PathBuf,
}

impl InstallerRequest {
    /// Application directory.
    pub fn src(&self) -> &Path {
        &self.src
    }

    /// Output directory.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Vendored tool locations.
    pub fn toolset(&self) -> &Toolset {
        &self.toolset
    }

    /// Directory under which unique staging roots are allocated.
    pub fn staging_base(&self) -> &Path {
        &self.staging_base
    }

    /// Injected diagnostic sink.
    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }
}

impl std::fmt::Debug for InstallerRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallerRequest")
            .field("src", &self.src)
            .field("dest", &self.dest)
            .field("overrides", &self.overrides)
            .field("options", &self.options)
            .field("toolset", &self.toolset)
            .field("staging_base", &self.staging_base)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing an [`InstallerRequest`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_squirrel::bundler::{Installer, InstallerBuilder, Overrides};
///
/// # async fn example() -> kodegen_bundler_squirrel::bundler::Result<()> {
/// let request = InstallerBuilder::new()
///     .src("dist/app")
///     .dest("dist/installer")
///     .options(Overrides {
///         product_description: Some("Just a test.".into()),
///         ..Default::default()
///     })
///     .build()?;
///
/// let output = Installer::new(request).run().await?;
/// println!("{} artifacts", output.artifacts.len());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct InstallerBuilder {
    src: Option<PathBuf>,
    dest: Option<PathBuf>,
    overrides: Overrides,
    options: Overrides,
    rename: Option<RenameFn>,
    logger: Option<SharedLogger>,
    toolset: Option<Toolset>,
    staging_base: Option<PathBuf>,
}

impl InstallerBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the application directory.
    ///
    /// # Required
    pub fn src<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.src = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory.
    ///
    /// # Required
    pub fn dest<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dest = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets explicit per-call overrides (highest precedence).
    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Sets the caller's option bag (below explicit overrides, above metadata).
    pub fn options(mut self, options: Overrides) -> Self {
        self.options = options;
        self
    }

    /// Sets the artifact rename policy.
    ///
    /// Default: [`default_rename`]
    pub fn rename(mut self, rename: RenameFn) -> Self {
        self.rename = Some(rename);
        self
    }

    /// Sets the diagnostic sink.
    ///
    /// Default: [`LogLogger`]
    pub fn logger<L: super::Logger + 'static>(mut self, logger: L) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Sets the vendored tool locations.
    ///
    /// Default: [`Toolset::locate`]
    pub fn toolset(mut self, toolset: Toolset) -> Self {
        self.toolset = Some(toolset);
        self
    }

    /// Sets the directory under which staging roots are created.
    ///
    /// Default: the system temporary directory
    pub fn staging_base<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.staging_base = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if `src` or `dest` is missing.
    pub fn build(self) -> crate::bundler::Result<InstallerRequest> {
        use crate::bundler::error::Context;

        Ok(InstallerRequest {
            src: self.src.context("src is required")?,
            dest: self.dest.context("dest is required")?,
            overrides: self.overrides,
            options: self.options,
            rename: self.rename.unwrap_or_else(default_rename),
            logger: self
                .logger
                .unwrap_or_else(|| Arc::new(LogLogger::default())),
            toolset: self.toolset.unwrap_or_else(Toolset::locate),
            staging_base: self.staging_base.unwrap_or_else(std::env::temp_dir),
        })
    }
}
