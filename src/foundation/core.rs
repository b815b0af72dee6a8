use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Point, Rect};

/// A point in the graph layout's own coordinate space (y grows upward).
pub type ModelPoint = Point;

/// Output canvas dimensions in pixels. Fixed for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::configuration(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Canvas center in device pixels.
    pub fn center(self) -> Point {
        Point::new(self.half_width(), self.half_height())
    }

    pub(crate) fn half_width(self) -> f64 {
        f64::from(self.width) / 2.0
    }

    pub(crate) fn half_height(self) -> f64 {
        f64::from(self.height) / 2.0
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

/// Fully resolved camera for one frame.
///
/// `scale` zooms about the canvas center; the translate is a model-space offset applied before
/// scaling. Serialized as the `{scaling, translateX, translateY}` record logged per frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraState {
    /// Zoom factor, always `> 0`.
    #[serde(rename = "scaling")]
    pub scale: f64,
    /// Model-space x offset.
    #[serde(rename = "translateX")]
    pub translate_x: f64,
    /// Model-space y offset.
    #[serde(rename = "translateY")]
    pub translate_y: f64,
}

impl CameraState {
    /// Create a validated camera.
    pub fn new(scale: f64, translate_x: f64, translate_y: f64) -> ReelResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ReelError::evaluation(format!(
                "camera scale must be finite and > 0, got {scale}"
            )));
        }
        if !translate_x.is_finite() || !translate_y.is_finite() {
            return Err(ReelError::evaluation(format!(
                "camera translate must be finite, got ({translate_x}, {translate_y})"
            )));
        }
        Ok(Self {
            scale,
            translate_x,
            translate_y,
        })
    }

    /// Unit scale, no translate.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
