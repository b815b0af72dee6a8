use super::*;

fn captured(schedule: ExportSchedule) -> Vec<u64> {
    (1..=schedule.total_steps)
        .filter(|&s| schedule.captures(s, false))
        .collect()
}

#[test]
fn schedule_rejects_zero() {
    assert!(ExportSchedule::new(0, 1).is_err());
    assert!(ExportSchedule::new(1, 0).is_err());
}

#[test]
fn even_schedule_captures_every_interval() {
    let steps = captured(ExportSchedule::new(100, 10).unwrap());
    assert_eq!(steps, (1..=10).map(|k| k * 10).collect::<Vec<_>>());
}

#[test]
fn uneven_schedule_adds_final_step_once() {
    let steps = captured(ExportSchedule::new(97, 10).unwrap());
    assert_eq!(steps, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 97]);
}

#[test]
fn early_final_step_is_captured() {
    let s = ExportSchedule::new(100, 10).unwrap();
    assert!(!s.captures(13, false));
    assert!(s.captures(13, true));
}

#[test]
fn progress_reaches_one_on_last_step() {
    let s = ExportSchedule::new(50, 25).unwrap();
    assert_eq!(s.progress(25), 0.5);
    assert_eq!(s.progress(50), 1.0);
}

#[test]
fn session_steps_strictly_increase() {
    let mut session = AnimationSession::new();
    session.advance_to(1).unwrap();
    session.advance_to(5).unwrap();
    assert!(session.advance_to(5).is_err());
    assert!(session.advance_to(2).is_err());
    assert_eq!(session.current_step(), 5);
}

#[test]
fn recording_frames_updates_prev_and_index() {
    let mut session = AnimationSession::new();
    assert_eq!(session.previous_camera(), None);
    let a = CameraState::new(1.5, 0.0, 0.0).unwrap();
    let b = CameraState::new(2.0, 1.0, 1.0).unwrap();
    assert_eq!(session.record_frame(a), 0);
    assert_eq!(session.record_frame(b), 1);
    assert_eq!(session.previous_camera(), Some(b));
    assert_eq!(session.frames_captured(), 2);
}
