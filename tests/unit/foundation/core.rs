use super::*;

#[test]
fn frame_window_rejects_inverted_and_negative() {
    assert!(FrameWindow::new(5, 4).is_err());
    assert!(FrameWindow::new(-1, 4).is_err());
    let w = FrameWindow::new(3, 3).unwrap();
    assert_eq!(w.duration(), 0);
    assert_eq!(w.len_frames(), 1);
}

#[test]
fn moved_to_keeps_duration() {
    let w = FrameWindow::new(0, 4).unwrap();
    let m = w.moved_to(10).unwrap();
    assert_eq!(m, FrameWindow { start: 10, end: 14 });
    assert_eq!(m.duration(), w.duration());
}

#[test]
fn moved_to_rejects_end_past_i64_max() {
    let w = FrameWindow::new(0, 10).unwrap();
    assert!(matches!(w.moved_to(i64::MAX - 5), Err(Aup2Error::Layout(_))));
    assert_eq!(FrameWindow::new(0, i64::MAX).unwrap().len_frames(), i64::MAX);
}

#[test]
fn overlap_is_inclusive() {
    let a = FrameWindow::new(0, 9).unwrap();
    assert!(a.overlaps(FrameWindow::new(9, 12).unwrap()));
    assert!(!a.overlaps(FrameWindow::new(10, 12).unwrap()));
}

#[test]
fn parse_id_accepts_digit_runs_only() {
    assert_eq!(parse_id("0"), Ok(0));
    assert_eq!(parse_id("0012"), Ok(12));
    assert!(parse_id("").is_err());
    assert!(parse_id("-1").is_err());
    assert!(parse_id("1a").is_err());
    assert!(parse_id("99999999999").is_err());
}

#[test]
fn ids_display_as_bare_numbers() {
    assert_eq!(SceneId(3).to_string(), "3");
    assert_eq!(ObjectId(12).to_string(), "12");
    assert_eq!(EffectId(0).to_string(), "0");
}
