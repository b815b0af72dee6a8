//! Per-tick frame capture.

pub mod exporter;
