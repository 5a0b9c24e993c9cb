//! Error types for installer pipeline operations.
//!
//! Every pipeline stage has its own variant so callers can tell which step
//! failed without parsing messages. Lower-level failures (filesystem, template,
//! subprocess) are carried as the `source` of the stage variant.
//!
//! # Features
//!
//! - **Stage variants**: `Metadata`, `Staging`, `Content`, `Packaging`,
//!   `NotFound`, `Sync`, `Release`, `Move`
//! - **Execution**: subprocess failures with command line and captured stderr
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned by the installer pipeline.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// `package.json` could not be located, read or parsed, or a required
    /// option is missing after merging.
    #[error("Error reading package metadata: {reason}")]
    Metadata {
        /// Human-readable description
        reason: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<Self>>,
    },

    /// Staging directory creation failed.
    #[error("Error creating temporary directory: {0}")]
    Staging(#[source] Box<Self>),

    /// Descriptor rendering or application copy failed.
    #[error("Error {operation}: {source}")]
    Content {
        /// Sub-operation that failed (e.g. "creating spec file")
        operation: &'static str,
        /// Underlying cause
        #[source]
        source: Box<Self>,
    },

    /// The packaging tool failed.
    #[error("Error creating package: {0}")]
    Packaging(#[source] Box<Self>),

    /// The packaging tool succeeded but produced no matching file.
    #[error("Error finding package: no file matches {pattern}")]
    NotFound {
        /// Glob pattern that matched nothing
        pattern: String,
    },

    /// Syncing prior releases from the remote feed failed.
    #[error("Error syncing remote releases: {0}")]
    Sync(#[source] Box<Self>),

    /// The release tool failed.
    #[error("Error releasifying package: {0}")]
    Release(#[source] Box<Self>),

    /// Enumerating or moving finished artifacts failed.
    #[error("Error moving package files: {0}")]
    Move(#[source] Box<Self>),

    /// External program exited unsuccessfully or could not be spawned.
    ///
    /// The message carries the full command line and captured stderr so a
    /// failure can be diagnosed without re-running.
    #[error("Error executing file ({reason}): \n{command}\n{stderr}")]
    Execution {
        /// Exit code, signal, or spawn error description
        reason: String,
        /// Program and arguments, space-joined
        command: String,
        /// Captured standard error
        stderr: String,
    },

    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "reading config file")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking directory (application copy).
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Handlebars template rendering error.
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Handlebars template parsing error.
    #[error("{0}")]
    Template(#[from] handlebars::TemplateError),

    /// JSON serialization/deserialization error.
    #[error("{0}")]
    JsonError(#[from] serde_json::error::Error),

    /// Invalid glob pattern.
    #[error("{0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob execution error.
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Builds a [`Error::Metadata`] without an underlying cause.
    pub fn metadata(reason: impl Into<String>) -> Self {
        Self::Metadata {
            reason: reason.into(),
            source: None,
        }
    }

    /// Returns the name of the pipeline stage this error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Metadata { .. } => "metadata",
            Self::Staging(_) => "staging",
            Self::Content { .. } => "content",
            Self::Packaging(_) | Self::NotFound { .. } => "package",
            Self::Sync(_) => "sync",
            Self::Release(_) => "release",
            Self::Move(_) => "move",
            Self::Execution { .. } => "execution",
            _ => "internal",
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the bundler's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
///
/// Wraps I/O errors with the path that caused them for better diagnostics.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying binary".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}
