//! Top-level error types for the binary and CLI layer.
//!
//! Pipeline failures keep their stage-specific [`crate::bundler::Error`];
//! this module adds the CLI's own failures on top.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Installer pipeline errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// The `--config` file could not be read or parsed
    #[error("Invalid config file {}: {reason}", path.display())]
    ConfigFile {
        /// Path given on the command line
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Pipeline stage that failed, if the error came from the pipeline.
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            BundlerError::Bundler(e) => Some(e.stage()),
            _ => None,
        }
    }
}
