//! Shared helpers for the pipeline stages.

pub mod fs;
pub mod template;
