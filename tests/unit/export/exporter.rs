use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::graph::snapshot::NodePosition;
use crate::render::backend::FrameRGBA;

struct Solid {
    canvas: Canvas,
    camera: CameraState,
    renders: usize,
}

impl Solid {
    fn new(w: u32, h: u32) -> Self {
        Self {
            canvas: Canvas::new(w, h).unwrap(),
            camera: CameraState::new(0.5, 7.0, -9.0).unwrap(),
            renders: 0,
        }
    }
}

impl Renderer for Solid {
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

    fn render(&mut self, _graph: &GraphSnapshot) -> ReelResult<FrameRGBA> {
        self.renders += 1;
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: vec![255; (self.canvas.width * self.canvas.height * 4) as usize],
            premultiplied: true,
        })
    }
}

fn graph() -> GraphSnapshot {
    GraphSnapshot::new(vec![
        NodePosition::new("a", -10.0, -10.0),
        NodePosition::new("b", 10.0, 10.0),
    ])
}

fn options(json: &str) -> ExportOptions {
    ExportOptions::from_json_str(json).unwrap()
}

#[test]
fn captures_are_numbered_and_logged_with_cameras() {
    let opts = options(r#"{"scalingStart": 1, "scalingEnd": 2, "resolution": [8, 4]}"#);
    let mut sink = InMemorySink::new();
    let mut renderer = Solid::new(8, 4);
    let mut session = AnimationSession::new();
    let g = graph();

    let mut exporter =
        FrameExporter::from_options(&opts, ExportSchedule::new(50, 25).unwrap(), &mut sink)
            .unwrap();
    exporter.begin(&g, &renderer).unwrap();
    let a = exporter.capture(&mut session, 25, &g, &mut renderer).unwrap();
    let b = exporter.capture(&mut session, 50, &g, &mut renderer).unwrap();
    exporter.finish().unwrap();

    assert_eq!((a.index, a.step, a.camera.scale), (0, 25, 1.5));
    assert_eq!((b.index, b.step, b.camera.scale), (1, 50, 2.0));
    // Translate was left unset: the renderer's own translate carries through.
    assert_eq!((b.camera.translate_x, b.camera.translate_y), (7.0, -9.0));
    assert_eq!(renderer.camera(), b.camera);
    assert_eq!(session.previous_camera(), Some(b.camera));

    assert!(sink.is_finished());
    let steps: Vec<_> = sink.frames().iter().map(|r| (r.index, r.step)).collect();
    assert_eq!(steps, vec![(0, 25), (1, 50)]);
}

#[test]
fn capture_before_begin_fails() {
    let opts = options(r#"{"resolution": [8, 4]}"#);
    let mut sink = InMemorySink::new();
    let mut exporter =
        FrameExporter::from_options(&opts, ExportSchedule::new(10, 1).unwrap(), &mut sink)
            .unwrap();
    let err = exporter
        .capture(&mut AnimationSession::new(), 1, &graph(), &mut Solid::new(8, 4))
        .unwrap_err();
    assert!(matches!(err, ReelError::Engine(_)));
}

#[test]
fn renderer_canvas_must_match_resolution() {
    let opts = options(r#"{"resolution": [16]}"#);
    let mut sink = InMemorySink::new();
    let mut exporter =
        FrameExporter::from_options(&opts, ExportSchedule::new(10, 1).unwrap(), &mut sink)
            .unwrap();
    let err = exporter.begin(&graph(), &Solid::new(8, 4)).unwrap_err();
    assert!(matches!(err, ReelError::Configuration(_)));
    drop(exporter);
    assert!(sink.config().is_none());
}

#[test]
fn missing_find_node_fails_before_sink_opens() {
    let opts = options(r#"{"findNode": 42, "centerOn": ["nodeX", "nodeY"], "resolution": [8, 4]}"#);
    let mut sink = InMemorySink::new();
    let mut exporter =
        FrameExporter::from_options(&opts, ExportSchedule::new(10, 1).unwrap(), &mut sink)
            .unwrap();
    assert!(matches!(
        exporter.begin(&graph(), &Solid::new(8, 4)).unwrap_err(),
        ReelError::Configuration(_)
    ));
    drop(exporter);
    assert!(sink.config().is_none());
}

#[test]
fn failed_resolution_does_not_render_or_number() {
    let opts = options(r#"{"scaling": "prev.scaling", "resolution": [8, 4]}"#);
    let mut sink = InMemorySink::new();
    let mut renderer = Solid::new(8, 4);
    let mut session = AnimationSession::new();
    let mut exporter =
        FrameExporter::from_options(&opts, ExportSchedule::new(10, 1).unwrap(), &mut sink)
            .unwrap();
    exporter.begin(&graph(), &renderer).unwrap();
    assert!(exporter.capture(&mut session, 1, &graph(), &mut renderer).is_err());
    exporter.abort();

    assert_eq!(renderer.renders, 0);
    assert_eq!(session.frames_captured(), 0);
    assert!(sink.is_aborted());
}

#[test]
fn bounds_overlay_is_composited_into_frame() {
    let opts = options(
        r#"{"boundsMargin": 0, "drawBounds": true, "scaling": 1, "centerOn": [0, 0], "resolution": [40, 40]}"#,
    );
    let mut sink = InMemorySink::new();
    let mut renderer = Solid::new(40, 40);
    let mut exporter =
        FrameExporter::from_options(&opts, ExportSchedule::new(1, 1).unwrap(), &mut sink)
            .unwrap();
    exporter.begin(&graph(), &renderer).unwrap();
    exporter
        .capture(&mut AnimationSession::new(), 1, &graph(), &mut renderer)
        .unwrap();
    exporter.finish().unwrap();

    let data = &sink.frames()[0].frame.data;
    // Left edge of the box sits at device x = 10.
    let i = (20 * 40 + 10) * 4;
    assert!(data[i + 1] < 200, "{:?}", &data[i..i + 4]);
    assert_eq!(&data[..4], &[255, 255, 255, 255]);
}
