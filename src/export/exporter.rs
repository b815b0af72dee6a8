use crate::camera::options::ExportOptions;
use crate::camera::resolver::CameraResolver;
use crate::camera::session::{AnimationSession, ExportSchedule};
use crate::encode::sink::{FrameRecord, FrameSink, SinkConfig};
use crate::foundation::core::CameraState;
use crate::foundation::error::{ReelError, ReelResult};
use crate::graph::snapshot::GraphSnapshot;
use crate::render::backend::Renderer;
use crate::render::overlay::DebugOverlay;

/// What one capture produced.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameSummary {
    /// Gap-free capture index.
    pub index: u64,
    /// Layout step the frame belongs to.
    pub step: u64,
    pub camera: CameraState,
}

/// Turns capture ticks into persisted frames: resolve, apply, render, overlay, persist.
pub struct FrameExporter<'s> {
    resolver: CameraResolver,
    overlay: DebugOverlay,
    sink: &'s mut dyn FrameSink,
    started: bool,
}

impl std::fmt::Debug for FrameExporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameExporter")
            .field("resolver", &self.resolver)
            .field("overlay", &self.overlay)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl<'s> FrameExporter<'s> {
    pub fn new(
        resolver: CameraResolver,
        overlay: DebugOverlay,
        sink: &'s mut dyn FrameSink,
    ) -> Self {
        Self {
            resolver,
            overlay,
            sink,
            started: false,
        }
    }

    /// Validate `opts` into a plan and build an exporter for `schedule`.
    pub fn from_options(
        opts: &ExportOptions,
        schedule: ExportSchedule,
        sink: &'s mut dyn FrameSink,
    ) -> ReelResult<Self> {
        let plan = opts.plan()?;
        let resolver = CameraResolver::new(plan, opts.canvas()?, schedule);
        let overlay = DebugOverlay::new(opts.draw_bounds, opts.draw_debug);
        Ok(Self::new(resolver, overlay, sink))
    }

    pub fn resolver(&self) -> &CameraResolver {
        &self.resolver
    }

    pub fn schedule(&self) -> ExportSchedule {
        self.resolver.schedule()
    }

    /// Check the run against the graph and renderer, then open the sink.
    pub fn begin(&mut self, graph: &GraphSnapshot, renderer: &dyn Renderer) -> ReelResult<()> {
        let canvas = self.resolver.canvas();
        if renderer.canvas() != canvas {
            return Err(ReelError::configuration(format!(
                "renderer canvas {}x{} does not match export resolution {}x{}",
                renderer.canvas().width,
                renderer.canvas().height,
                canvas.width,
                canvas.height
            )));
        }
        self.resolver.check_graph(graph)?;
        self.sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
        })?;
        self.started = true;
        Ok(())
    }

    /// Produce and persist the frame for `step`.
    #[tracing::instrument(level = "debug", skip(self, session, graph, renderer))]
    pub fn capture(
        &mut self,
        session: &mut AnimationSession,
        step: u64,
        graph: &GraphSnapshot,
        renderer: &mut dyn Renderer,
    ) -> ReelResult<FrameSummary> {
        if !self.started {
            return Err(ReelError::engine("capture called before begin"));
        }
        let resolved = self
            .resolver
            .resolve(step, session, graph, renderer.camera())?;
        let camera = resolved.camera;
        renderer.set_camera(camera)?;

        let mut frame = renderer.render(graph)?;
        frame.check_dims(self.resolver.canvas())?;
        self.overlay
            .apply(&mut frame, camera, resolved.bounds.as_ref())?;

        let record = FrameRecord {
            index: session.frames_captured(),
            step,
            camera,
            frame,
        };
        self.sink.push_frame(&record)?;
        let index = session.record_frame(camera);

        let camera_json = serde_json::to_string(&camera)
            .map_err(|e| ReelError::serde(format!("camera record: {e}")))?;
        tracing::info!(frame = index, step, camera = %camera_json, "captured frame");

        Ok(FrameSummary {
            index,
            step,
            camera,
        })
    }

    /// Close the sink after the last capture.
    pub fn finish(&mut self) -> ReelResult<()> {
        if !std::mem::take(&mut self.started) {
            return Ok(());
        }
        self.sink.end()
    }

    /// Tell the sink to discard what this run wrote.
    pub fn abort(&mut self) {
        if std::mem::take(&mut self.started) {
            self.sink.abort();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
