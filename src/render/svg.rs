use std::fmt::Write as _;
use std::sync::Arc;

use crate::foundation::core::{CameraState, Canvas};
use crate::foundation::error::{ReelError, ReelResult};
use crate::graph::bounds::estimate_bounds;
use crate::graph::snapshot::GraphSnapshot;
use crate::render::backend::{FrameRGBA, Renderer};
use crate::transform::camera::{to_device, translate_to_center_on};

/// Fill and stroke colors used by [`SvgRenderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphStyle {
    /// Background fill; `None` leaves the canvas transparent.
    pub background: Option<String>,
    pub node_fill: String,
    pub edge_stroke: String,
    /// Edge stroke width in device pixels.
    pub edge_width: u32,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            background: Some("#ffffff".to_owned()),
            node_fill: "#3b6fb6".to_owned(),
            edge_stroke: "#9aa3ad".to_owned(),
            edge_width: 1,
        }
    }
}

impl GraphStyle {
    pub fn transparent(mut self) -> Self {
        self.background = None;
        self
    }
}

/// Reference CPU renderer: writes the graph as an SVG document in device space and rasterizes it
/// with `resvg`.
pub struct SvgRenderer {
    canvas: Canvas,
    camera: CameraState,
    style: GraphStyle,
    options: usvg::Options<'static>,
}

impl std::fmt::Debug for SvgRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRenderer")
            .field("canvas", &self.canvas)
            .field("camera", &self.camera)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl SvgRenderer {
    pub fn new(canvas: Canvas, style: GraphStyle) -> Self {
        Self {
            canvas,
            camera: CameraState::identity(),
            style,
            // Graph documents carry no text, so an empty font database is enough.
            options: usvg::Options {
                fontdb: Arc::new(usvg::fontdb::Database::new()),
                ..Default::default()
            },
        }
    }

    /// Builder form of [`Renderer::set_camera`].
    pub fn with_camera(mut self, camera: CameraState) -> Self {
        self.camera = camera;
        self
    }

    pub fn style(&self) -> &GraphStyle {
        &self.style
    }

    /// The SVG document for `graph` under the current camera.
    pub fn document(&self, graph: &GraphSnapshot) -> ReelResult<String> {
        let (w, h) = (self.canvas.width, self.canvas.height);
        let mut svg = String::with_capacity(256 + graph.nodes.len() * 64);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        if let Some(bg) = &self.style.background {
            let _ = write!(svg, r#"<rect width="{w}" height="{h}" fill="{bg}"/>"#);
        }

        if !graph.edges.is_empty() {
            let _ = write!(
                svg,
                r#"<g stroke="{}" stroke-width="{}">"#,
                self.style.edge_stroke, self.style.edge_width
            );
            for edge in &graph.edges {
                let (Some(a), Some(b)) = (graph.node(&edge.source), graph.node(&edge.target)) else {
                    tracing::debug!(source = %edge.source, target = %edge.target, "skipping dangling edge");
                    continue;
                };
                let a = to_device(a.point(), self.camera, self.canvas);
                let b = to_device(b.point(), self.camera, self.canvas);
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
                    a.x, a.y, b.x, b.y
                );
            }
            svg.push_str("</g>");
        }

        let _ = write!(svg, r#"<g fill="{}">"#, self.style.node_fill);
        for node in &graph.nodes {
            if !(node.x.is_finite() && node.y.is_finite() && node.size.is_finite()) {
                return Err(ReelError::engine(format!(
                    "node '{}' has a non-finite position or size",
                    node.id
                )));
            }
            let c = to_device(node.point(), self.camera, self.canvas);
            let r = (node.size * self.camera.scale / 2.0).max(0.5);
            let _ = write!(svg, r#"<circle cx="{}" cy="{}" r="{r}"/>"#, c.x, c.y);
        }
        svg.push_str("</g></svg>");
        Ok(svg)
    }
}

impl Renderer for SvgRenderer {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn camera(&self) -> CameraState {
        self.camera
    }

    fn set_camera(&mut self, camera: CameraState) -> ReelResult<()> {
        self.camera = camera;
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all, fields(nodes = graph.len()))]
    fn render(&mut self, graph: &GraphSnapshot) -> ReelResult<FrameRGBA> {
        let doc = self.document(graph)?;
        let tree = usvg::Tree::from_str(&doc, &self.options)
            .map_err(|e| ReelError::engine(format!("parse generated svg: {e}")))?;
        rasterize(&tree, self.canvas)
    }
}

/// Rasterize `tree` at 1:1 into a premultiplied RGBA8 frame of the canvas size.
pub(crate) fn rasterize(tree: &usvg::Tree, canvas: Canvas) -> ReelResult<FrameRGBA> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| ReelError::engine("failed to allocate frame pixmap"))?;
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: pixmap.take(),
        premultiplied: true,
    })
}

/// Camera that fits the whole graph inside `canvas` with a small border.
///
/// Used as the starting camera of a run so that options which leave scale or pan unset still
/// show the graph.
pub fn fit_camera(graph: &GraphSnapshot, canvas: Canvas) -> CameraState {
    const FILL: f64 = 0.9;
    let Ok(b) = estimate_bounds(&graph.nodes, 0.0) else {
        let center = graph.nodes.first().map(|n| n.point()).unwrap_or_default();
        let (tx, ty) = translate_to_center_on(center, 1.0, canvas);
        return CameraState::new(1.0, tx, ty).unwrap_or_default();
    };
    let sx = f64::from(canvas.width) * FILL / b.width.max(f64::EPSILON);
    let sy = f64::from(canvas.height) * FILL / b.height.max(f64::EPSILON);
    let scale = sx.min(sy).clamp(1e-6, 1e6);
    let (tx, ty) = translate_to_center_on(b.center(), scale, canvas);
    CameraState::new(scale, tx, ty).unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
