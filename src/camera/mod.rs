//! Per-frame camera: options, validation, per-run session state and resolution.

pub mod options;
pub mod resolver;
pub mod session;
