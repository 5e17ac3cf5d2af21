use super::*;

fn w(start: i64, end: i64) -> FrameWindow {
    FrameWindow::new(start, end).unwrap()
}

#[test]
fn first_window_stays_and_the_rest_follow() {
    let packed = pack_contiguous(&[w(5, 9), w(0, 4), w(100, 100)]).unwrap();
    assert_eq!(packed, vec![w(5, 9), w(10, 14), w(15, 15)]);
}

#[test]
fn empty_input_packs_to_nothing() {
    assert!(pack_contiguous(&[]).unwrap().is_empty());
}

#[test]
fn packing_past_the_last_frame_is_an_error() {
    let err = pack_contiguous(&[w(0, i64::MAX), w(0, 4)]).unwrap_err();
    assert!(matches!(err, Aup2Error::Layout(_)));

    let err = pack_contiguous(&[w(0, i64::MAX - 2), w(0, 4)]).unwrap_err();
    assert!(matches!(err, Aup2Error::Layout(_)));
}

#[test]
fn pack_group_orders_by_original_id() {
    let placed = pack_group(
        SceneGroup::Scene(SceneId(0)),
        vec![(ObjectId(7), w(0, 1)), (ObjectId(2), w(3, 5))],
    )
    .unwrap();
    assert_eq!(placed[0].id, ObjectId(2));
    assert_eq!(placed[0].window, w(3, 5));
    assert_eq!(placed[1].id, ObjectId(7));
    assert_eq!(placed[1].window, w(6, 7));
}

fn members() -> Vec<(SceneGroup, ObjectId, FrameWindow)> {
    vec![
        (SceneGroup::Unspecified, ObjectId(0), w(0, 9)),
        (SceneGroup::Scene(SceneId(1)), ObjectId(1), w(50, 54)),
        (SceneGroup::Scene(SceneId(0)), ObjectId(2), w(20, 29)),
        (SceneGroup::Scene(SceneId(1)), ObjectId(3), w(0, 2)),
    ]
}

#[test]
fn groups_are_packed_independently_unspecified_last() {
    let placed = isolated_sequence(members(), UnspecifiedScenePlacement::Trailing).unwrap();
    let ids = placed.iter().map(|p| p.id.0).collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 1, 3, 0]);
    assert_eq!(placed[0].window, w(20, 29));
    // scene 1 restarts from its own first window
    assert_eq!(placed[1].window, w(50, 54));
    assert_eq!(placed[2].window, w(55, 57));
    assert_eq!(placed[3].window, w(0, 9));
}

#[test]
fn leading_placement_moves_unspecified_first() {
    let placed = isolated_sequence(members(), UnspecifiedScenePlacement::Leading).unwrap();
    let ids = placed.iter().map(|p| p.id.0).collect::<Vec<_>>();
    assert_eq!(ids, vec![0, 2, 1, 3]);
    assert_eq!(placed[0].group, SceneGroup::Unspecified);
}

#[test]
fn scene_zero_placement_merges_groups() {
    let placed = isolated_sequence(members(), UnspecifiedScenePlacement::SceneZero).unwrap();
    let ids = placed.iter().map(|p| p.id.0).collect::<Vec<_>>();
    assert_eq!(ids, vec![0, 2, 1, 3]);
    assert_eq!(placed[0].window, w(0, 9));
    assert_eq!(placed[1].window, w(10, 19));
    assert!(placed.iter().all(|p| p.group != SceneGroup::Unspecified));
}

#[test]
fn windows_never_overlap_within_a_group() {
    let placed = isolated_sequence(members(), UnspecifiedScenePlacement::Trailing).unwrap();
    for a in &placed {
        for b in &placed {
            if a.id != b.id && a.group == b.group {
                assert!(!a.window.overlaps(b.window), "{a:?} vs {b:?}");
            }
        }
    }
}
