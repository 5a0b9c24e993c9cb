//! Platform-specific installer implementations.
//!
//! Only Windows installers are produced, but the tools are driven from any
//! host (through `mono` outside Windows), so this module is not gated on the
//! build target.

pub mod windows;
