use crate::foundation::core::{CameraState, Canvas};
use crate::foundation::error::{ReelError, ReelResult};
use crate::graph::snapshot::GraphSnapshot;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Check that `data` matches the declared dimensions and the expected canvas.
    pub fn check_dims(&self, canvas: Canvas) -> ReelResult<()> {
        if self.width != canvas.width || self.height != canvas.height {
            return Err(ReelError::engine(format!(
                "renderer produced {}x{} for a {}x{} canvas",
                self.width, self.height, canvas.width, canvas.height
            )));
        }
        let expected = self.width as usize * self.height as usize * 4;
        if self.data.len() != expected {
            return Err(ReelError::engine(format!(
                "frame byte length {} does not match {}x{} RGBA8",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// The raster renderer the exporter drives.
///
/// The renderer is a single-owner resource: it keeps the camera it was last given and renders the
/// graph through it.
pub trait Renderer {
    /// Canvas size, fixed for a run.
    fn canvas(&self) -> Canvas;
    /// The camera currently applied.
    fn camera(&self) -> CameraState;
    /// Apply a new camera for subsequent renders.
    fn set_camera(&mut self, camera: CameraState) -> ReelResult<()>;
    /// Rasterize `graph` through the current camera.
    fn render(&mut self, graph: &GraphSnapshot) -> ReelResult<FrameRGBA>;
}
