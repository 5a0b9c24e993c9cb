//! Diagnostic sink injected into the pipeline.

use std::sync::Arc;

/// Receives human-readable progress and diagnostic messages from the pipeline.
///
/// The pipeline never writes to a global logger; it only talks to the sink it
/// was given. Closures `Fn(&str)` implement this trait directly.
pub trait Logger: Send + Sync {
    /// Record one message.
    fn log(&self, message: &str);
}

/// Shared logger handle stored in [`Options`](super::Options).
pub type SharedLogger = Arc<dyn Logger>;

impl<F> Logger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Forwards messages to the `log` facade at debug level.
#[derive(Clone, Copy, Debug)]
pub struct LogLogger {
    target: &'static str,
}

impl LogLogger {
    /// Creates a logger writing under the given `log` target.
    pub const fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogLogger {
    fn default() -> Self {
        Self::new("kodegen_bundler_squirrel")
    }
}

impl Logger for LogLogger {
    fn log(&self, message: &str) {
        log::debug!(target: self.target, "{}", message);
    }
}

/// Discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _message: &str) {}
}
