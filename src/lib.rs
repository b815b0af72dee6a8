//! graphreel turns an iterative graph layout run into a numbered frame sequence.
//!
//! A layout engine is stepped by a [`LayoutStepDriver`]; on the export schedule a
//! [`FrameExporter`] resolves the camera for that tick, renders the graph through it and hands the
//! frame to a [`FrameSink`]. Cameras are fixed, interpolated over the run, or computed from
//! arithmetic expressions over run variables (`step`, `nodeX`, `bounds.width`, `prev.scaling`, ...).
//!
//! - Validate an [`ExportOptions`] record into a [`CameraPlan`]
//! - Pick a [`Renderer`] (the built-in [`SvgRenderer`] or your own) and a [`FrameSink`]
//! - Drive the run with [`LayoutStepDriver::run_with_export`]
#![forbid(unsafe_code)]

mod foundation;

/// Camera options, per-run session state and per-frame resolution.
pub mod camera;
/// Frame sinks.
pub mod encode;
/// Per-tick frame capture.
pub mod export;
/// Arithmetic expressions over run variables.
pub mod expression;
/// Graph snapshots and bounds estimation.
pub mod graph;
/// Layout engine seam and step driver.
pub mod layout;
/// Renderer seam, reference rasterizer and debug overlay.
pub mod render;
/// Model-space to device-space mapping.
pub mod transform;

pub use crate::foundation::core::{CameraState, Canvas, ModelPoint, Point, Rect};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::camera::options::{CameraPlan, ExportOptions};
pub use crate::camera::resolver::{CameraResolver, ResolvedCamera};
pub use crate::camera::session::{AnimationSession, ExportSchedule};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameRecord, FrameSink, InMemorySink, SinkConfig};
pub use crate::export::exporter::{FrameExporter, FrameSummary};
pub use crate::expression::eval::{ExprEnv, Expression, evaluate};
pub use crate::graph::bounds::{BoundsBox, estimate_bounds};
pub use crate::graph::snapshot::{EdgeRef, GraphSnapshot, NodePosition};
pub use crate::layout::algorithm::{LayoutAlgorithm, NoOpLayout};
pub use crate::layout::driver::{
    DriverState, LayoutRunOptions, LayoutStepDriver, RunMode, RunReport,
};
pub use crate::render::backend::{FrameRGBA, Renderer};
pub use crate::render::overlay::DebugOverlay;
pub use crate::render::svg::{GraphStyle, SvgRenderer, fit_camera};
pub use crate::transform::camera::{model_rect_to_device, to_device, to_model};
