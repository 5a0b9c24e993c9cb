//! Squirrel.Windows installer bundler for pre-built Electron applications.
//!
//! This module turns an application directory into a Squirrel release set:
//! a NuGet package, `RELEASES`, `Setup.exe` and optionally `Setup.msi` and a
//! delta package against a remote release feed.
//!
//! # Configuration
//!
//! Options come from four layers, highest precedence first: explicit
//! overrides, the caller's option bag, defaults derived from the app's
//! `package.json`, and hardcoded fallbacks. An option bag is usually a JSON
//! file:
//!
//! ```json
//! {
//!   "productDescription": "Just a test.",
//!   "tags": ["Utility"],
//!   "certificateFile": "certs/code.pfx",
//!   "certificatePassword": "secret",
//!   "remoteReleases": "https://updates.example.com/footest/",
//!   "noMsi": true
//! }
//! ```
//!
//! # Pipeline
//!
//! | Stage | Tool | Failure |
//! |-------|------|---------|
//! | Metadata | - | [`Error::Metadata`] |
//! | Staging | - | [`Error::Staging`] |
//! | Contents | - | [`Error::Content`] |
//! | Package | `NuGet.exe pack` | [`Error::Packaging`], [`Error::NotFound`] |
//! | Sync | `SyncReleases.exe` | [`Error::Sync`] |
//! | Release | `Squirrel --releasify` | [`Error::Release`] |
//! | Move | - | [`Error::Move`] |
//!
//! Outside Windows the tools run under `mono`.
//!
//! # Integration
//!
//! ```no_run
//! use kodegen_bundler_squirrel::bundler::{Installer, InstallerBuilder};
//!
//! # async fn example() -> kodegen_bundler_squirrel::bundler::Result<()> {
//! let request = InstallerBuilder::new()
//!     .src("dist/footest-win32-x64")
//!     .dest("dist/installers")
//!     .build()?;
//!
//! let output = Installer::new(request).run().await?;
//! output.staging_dir.remove().await?;
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod builder;
pub mod error;
pub mod platform;
pub mod process;
pub mod settings;
pub mod utils;

// Public re-exports
pub use builder::{Installer, InstallerOutput, StagingDir};
pub use error::{Context, Error, ErrorExt, Result};
pub use platform::windows::squirrel::{Toolset, VENDOR_DIR_ENV};
pub use process::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use settings::{
    DEFAULT_NAME, DEFAULT_VERSION, InstallerBuilder, InstallerRequest, LogLogger, Logger,
    NoopLogger, Options, Overrides, RenameFn, SharedLogger, SigningMethod, default_rename,
    normalize_version, suffixed_rename,
};
