//! Squirrel.Windows installer bundler library
//!
//! This library packages a pre-built Electron application directory into a
//! Windows installer set using NuGet and Squirrel:
//! - `RELEASES` manifest and full `.nupkg` (plus a delta against a remote feed)
//! - `Setup.exe` and, unless disabled, `Setup.msi`
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
