//! Configuration structures for the installer pipeline.
//!
//! This module provides the option layers (explicit overrides, option bag,
//! metadata defaults), the resolved [`Options`] record, signing selection,
//! version normalization, and the injected logger and rename hooks.

mod builder;
mod logger;
mod options;
mod overrides;
mod rename;
mod signing;
mod version;

// Re-export all public types
pub use builder::{InstallerBuilder, InstallerRequest};
pub use logger::{LogLogger, Logger, NoopLogger, SharedLogger};
pub use options::Options;
pub use overrides::{DEFAULT_NAME, DEFAULT_VERSION, Overrides};
pub use rename::{RenameFn, default_rename, default_rename_path, suffixed_rename};
pub use signing::SigningMethod;
pub use version::normalize_version;
