use std::fmt::Write as _;
use std::sync::Arc;

use crate::foundation::core::{CameraState, Canvas};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{mul_div255_u8, src_over_premul_in_place};
use crate::graph::bounds::BoundsBox;
use crate::render::backend::FrameRGBA;
use crate::render::svg::rasterize;
use crate::transform::camera::model_rect_to_device;

const BOUNDS_STROKE: &str = "#d0312d";
const READOUT_FILL: &str = "#202020";
const READOUT_SIZE: u32 = 14;

/// Debug decorations drawn on top of a rendered frame.
pub struct DebugOverlay {
    draw_bounds: bool,
    draw_readout: bool,
    options: usvg::Options<'static>,
}

impl std::fmt::Debug for DebugOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugOverlay")
            .field("draw_bounds", &self.draw_bounds)
            .field("draw_readout", &self.draw_readout)
            .finish_non_exhaustive()
    }
}

impl DebugOverlay {
    pub fn new(draw_bounds: bool, draw_readout: bool) -> Self {
        let mut db = usvg::fontdb::Database::new();
        if draw_readout {
            db.load_system_fonts();
        }
        Self {
            draw_bounds,
            draw_readout,
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    /// Nothing to draw.
    pub fn is_empty(&self) -> bool {
        !self.draw_bounds && !self.draw_readout
    }

    /// Overlay document for one frame, or `None` when there is nothing to draw.
    pub fn document(
        &self,
        camera: CameraState,
        canvas: Canvas,
        bounds: Option<&BoundsBox>,
    ) -> Option<String> {
        let bounds = bounds.filter(|_| self.draw_bounds);
        if bounds.is_none() && !self.draw_readout {
            return None;
        }

        let (w, h) = (canvas.width, canvas.height);
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        if let Some(b) = bounds {
            let r = model_rect_to_device(b.rect(), camera, canvas);
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{BOUNDS_STROKE}" stroke-width="2"/>"#,
                r.x0,
                r.y0,
                r.width(),
                r.height()
            );
        }
        if self.draw_readout {
            let _ = write!(
                svg,
                r#"<text x="8" y="{}" font-family="sans-serif" font-size="{READOUT_SIZE}" fill="{READOUT_FILL}">{}</text>"#,
                READOUT_SIZE + 6,
                readout(camera)
            );
        }
        svg.push_str("</svg>");
        Some(svg)
    }

    /// Composite the overlay onto `frame` in place.
    pub fn apply(
        &self,
        frame: &mut FrameRGBA,
        camera: CameraState,
        bounds: Option<&BoundsBox>,
    ) -> ReelResult<()> {
        let canvas = Canvas::new(frame.width, frame.height)?;
        let Some(doc) = self.document(camera, canvas, bounds) else {
            return Ok(());
        };
        let tree = usvg::Tree::from_str(&doc, &self.options)
            .map_err(|e| ReelError::engine(format!("parse overlay svg: {e}")))?;
        let layer = rasterize(&tree, canvas)?;

        if !frame.premultiplied {
            premultiply_in_place(&mut frame.data);
            frame.premultiplied = true;
        }
        src_over_premul_in_place(&mut frame.data, &layer.data);
        Ok(())
    }
}

/// Camera readout text, e.g. `sc=1.500 tr=(12.00, -3.00)`.
pub fn readout(camera: CameraState) -> String {
    format!(
        "sc={:.3} tr=({:.2}, {:.2})",
        camera.scale, camera.translate_x, camera.translate_y
    )
}

fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in px.iter_mut().take(3) {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
