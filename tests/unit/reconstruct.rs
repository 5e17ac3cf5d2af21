use super::*;
use crate::{foundation::core::EffectId, parse::parse};

const INPUT: &str = "\
[project]
version=2001802
display.scene=0
name=ignored
[scene.1]
scene=1
name=Second
[scene.0]
scene=0
video.rate=30
[2]
custom=abc
frame=5,9
layer=3
[2.0]
effect.name=blur
[0]
focus=1
layer=1
frame=0,4
scene=0
[3]
layer=1
frame=0,2
scene=1
[3.1]
b=2
[3.0]
a=1";

#[test]
fn output_order_is_canonical() {
    let doc = parse(INPUT).unwrap();
    let text = reconstruct(&doc).unwrap();
    let expected = "\
[project]
version=2001802
[scene.0]
scene=0
video.rate=30
[0]
layer=1
frame=0,4
focus=1
scene=0
[2]
layer=3
frame=5,9
custom=abc
[2.0]
effect.name=blur
[scene.1]
scene=1
name=Second
[3]
layer=1
frame=0,2
scene=1
[3.0]
a=1
[3.1]
b=2";
    assert_eq!(text, expected);
}

#[test]
fn scene_level_keys_are_recognized() {
    for key in ["scene", "name", "video.rate", "audio.rate", "cursor.frame", "display.zoom"] {
        assert!(is_scene_level_key(key), "{key}");
    }
    for key in ["version", "file", "videos", "scenery"] {
        assert!(!is_scene_level_key(key), "{key}");
    }
}

#[test]
fn objects_in_undeclared_scenes_are_dropped() {
    let text = "[project]\n[scene.0]\n[0]\nlayer=0\nframe=0,1\n[1]\nlayer=0\nframe=0,1\nscene=7\n";
    let doc = parse(text).unwrap();
    let out = reconstruct(&doc).unwrap();
    assert_eq!(out, "[project]\n[scene.0]\n[0]\nlayer=0\nframe=0,1");
}

#[test]
fn without_any_scene_block_no_objects_are_written() {
    let doc = parse("[project]\nv=1\n[0]\nlayer=0\nframe=0,1\n").unwrap();
    assert_eq!(reconstruct(&doc).unwrap(), "[project]\nv=1");
}

#[test]
fn invalid_document_is_refused_with_every_violation() {
    let doc = parse("[0]\nlayer=1\n").unwrap();
    let err = reconstruct(&doc).unwrap_err();
    let Aup2Error::Structure(errs) = err else {
        panic!("expected structural error");
    };
    assert_eq!(errs.len(), 2);
    assert!(errs.errors[0].contains("project"));
    assert!(errs.errors[1].contains("frame"));
}

#[test]
fn reparse_of_output_is_identical() {
    let doc = parse(INPUT).unwrap();
    let text = reconstruct(&doc).unwrap();
    let again = parse(&text).unwrap();
    assert_eq!(reconstruct(&again).unwrap(), text);
    assert_eq!(again.objects[&ObjectId(3)].effects.len(), 2);
    assert!(again.objects[&ObjectId(3)].effects.contains_key(&EffectId(1)));
}
