//! Installer orchestration and staging.
//!
//! This module provides the main [`Installer`] driver that sequences the
//! pipeline stages and the staging-directory lifecycle they share.
//!
//! # Module Organization
//!
//! - [`orchestrator`] - Main [`Installer`] struct and stage sequencing
//! - [`staging`] - Unique staging tree creation and removal
//! - [`tool_detection`] - Compatibility runtime package hints

mod orchestrator;
mod staging;
pub(crate) mod tool_detection;

pub use orchestrator::{Installer, InstallerOutput};
pub use staging::{STAGING_PREFIX, StagingDir, create_staging_dir};
pub use tool_detection::{missing_runtime_hint, runtime_package};
