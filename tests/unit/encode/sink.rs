use super::*;

fn record(index: u64) -> FrameRecord {
    FrameRecord {
        index,
        step: index * 10 + 10,
        camera: CameraState::identity(),
        frame: FrameRGBA {
            width: 1,
            height: 1,
            data: vec![0, 0, 0, 0],
            premultiplied: true,
        },
    }
}

#[test]
fn in_memory_sink_requires_begin() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(&record(0)).is_err());
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
    })
    .unwrap();
    sink.push_frame(&record(0)).unwrap();
    sink.push_frame(&record(1)).unwrap();
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(
        sink.frames().iter().map(|r| r.step).collect::<Vec<_>>(),
        vec![10, 20]
    );
    assert_eq!(sink.config().map(|c| c.width), Some(1));
}

#[test]
fn abort_discards_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
    })
    .unwrap();
    sink.push_frame(&record(0)).unwrap();
    sink.abort();
    assert!(sink.is_aborted());
    assert!(sink.frames().is_empty());
}
