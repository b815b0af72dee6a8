use super::*;
use crate::graph::snapshot::NodePosition;

#[test]
fn noop_layout_keeps_positions_and_reports_running_state() {
    let graph = GraphSnapshot::new(vec![NodePosition::new("a", 1.0, 2.0)]);
    let mut layout = NoOpLayout::new(graph.clone());
    assert!(!layout.can_algo());

    layout.init_algo().unwrap();
    assert!(layout.can_algo());
    layout.go_algo().unwrap();
    layout.go_algo().unwrap();
    assert_eq!(layout.steps(), 2);
    assert_eq!(layout.snapshot(), graph);

    layout.end_algo();
    assert!(!layout.can_algo());
}
