//! Frame sinks.
//!
//! Sinks consume captured frames in capture order and are driven by the frame exporter.

/// PNG image-sequence sink with a per-frame camera log.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
