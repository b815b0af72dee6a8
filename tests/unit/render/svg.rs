use super::*;
use crate::graph::snapshot::{EdgeRef, NodePosition};

fn centered(canvas: Canvas) -> CameraState {
    let (tx, ty) = translate_to_center_on(Default::default(), 1.0, canvas);
    CameraState::new(1.0, tx, ty).unwrap()
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn one_node(size: f64) -> GraphSnapshot {
    let mut n = NodePosition::new("a", 0.0, 0.0);
    n.size = size;
    GraphSnapshot::new(vec![n])
}

#[test]
fn document_has_one_circle_per_node_and_skips_dangling_edges() {
    let canvas = Canvas::new(64, 64).unwrap();
    let mut g = GraphSnapshot::new(vec![
        NodePosition::new("a", 0.0, 0.0),
        NodePosition::new("b", 10.0, 0.0),
    ]);
    g.edges = vec![
        EdgeRef {
            source: "a".into(),
            target: "b".into(),
        },
        EdgeRef {
            source: "a".into(),
            target: "zz".into(),
        },
    ];
    let doc = SvgRenderer::new(canvas, GraphStyle::default())
        .document(&g)
        .unwrap();
    assert_eq!(doc.matches("<circle").count(), 2);
    assert_eq!(doc.matches("<line").count(), 1);
}

#[test]
fn render_fills_background_and_draws_node_at_device_position() {
    let canvas = Canvas::new(64, 64).unwrap();
    let mut r = SvgRenderer::new(canvas, GraphStyle::default()).with_camera(centered(canvas));
    let frame = r.render(&one_node(20.0)).unwrap();
    frame.check_dims(canvas).unwrap();
    assert!(frame.premultiplied);
    assert_eq!(pixel(&frame, 0, 0), [255, 255, 255, 255]);
    assert_eq!(pixel(&frame, 32, 32), [0x3b, 0x6f, 0xb6, 255]);
}

#[test]
fn transparent_style_leaves_empty_pixels_clear() {
    let canvas = Canvas::new(32, 32).unwrap();
    let mut r = SvgRenderer::new(canvas, GraphStyle::default().transparent())
        .with_camera(centered(canvas));
    let frame = r.render(&one_node(4.0)).unwrap();
    assert_eq!(pixel(&frame, 0, 0), [0, 0, 0, 0]);
    assert_eq!(pixel(&frame, 16, 16)[3], 255);
}

#[test]
fn set_camera_is_reported_back() {
    let canvas = Canvas::default();
    let mut r = SvgRenderer::new(canvas, GraphStyle::default());
    assert_eq!(r.camera(), CameraState::identity());
    let cam = CameraState::new(2.0, 3.0, 4.0).unwrap();
    r.set_camera(cam).unwrap();
    assert_eq!(r.camera(), cam);
    assert_eq!(r.canvas(), canvas);
}

#[test]
fn non_finite_node_is_an_engine_error() {
    let g = GraphSnapshot::new(vec![NodePosition::new("a", f64::NAN, 0.0)]);
    let mut r = SvgRenderer::new(Canvas::new(8, 8).unwrap(), GraphStyle::default());
    assert!(matches!(r.render(&g).unwrap_err(), ReelError::Engine(_)));
}

#[test]
fn fit_camera_keeps_every_node_on_canvas() {
    let canvas = Canvas::new(200, 100).unwrap();
    let g = GraphSnapshot::new(vec![
        NodePosition::new("a", -500.0, 40.0),
        NodePosition::new("b", 900.0, -30.0),
        NodePosition::new("c", 10.0, 300.0),
    ]);
    let cam = fit_camera(&g, canvas);
    for n in &g.nodes {
        let p = to_device(n.point(), cam, canvas);
        assert!((0.0..=200.0).contains(&p.x) && (0.0..=100.0).contains(&p.y), "{p:?}");
    }
}

#[test]
fn fit_camera_centers_a_single_node() {
    let canvas = Canvas::new(100, 100).unwrap();
    let g = GraphSnapshot::new(vec![NodePosition::new("a", 7.0, -3.0)]);
    let cam = fit_camera(&g, canvas);
    assert_eq!(cam.scale, 1.0);
    let p = to_device(Default::default(), cam, canvas);
    let q = to_device(g.nodes[0].point(), cam, canvas);
    assert!((q.x - 50.0).abs() < 1e-9 && (q.y - 50.0).abs() < 1e-9, "{p:?} {q:?}");
}
