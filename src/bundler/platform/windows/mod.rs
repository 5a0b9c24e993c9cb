//! Windows installer formats.

pub mod squirrel;
