use super::*;
use crate::foundation::core::ObjectId;
use std::path::PathBuf;

const PROJECT: &str = "\
[project]
version=2000100
[scene.0]
name=Root
[0]
layer=1
frame=0,9
[0.0]
effect.name=fill
color=ff00aa
[1]
layer=2
frame=0,4
";

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("io_tests").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_input(dir: &Path, name: &str, text: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, text).unwrap();
    p
}

#[test]
fn check_input_path_requires_extension_and_existence() {
    let dir = scratch("check_input");
    let good = write_input(&dir, "a.AUP2", PROJECT);
    check_input_path(&good).unwrap();

    let wrong_ext = write_input(&dir, "a.txt", PROJECT);
    assert!(matches!(
        check_input_path(&wrong_ext),
        Err(Aup2Error::InvalidArgument(_))
    ));

    let missing = dir.join("missing.aup2");
    let err = check_input_path(&missing).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn convert_file_round_trips_and_creates_parent_dirs() {
    let dir = scratch("convert");
    let input = write_input(&dir, "in.aup2", PROJECT);
    let output = dir.join("nested").join("deeper").join("out.aup2");

    let doc = convert_file(&input, &output).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(parse(&written).unwrap(), doc);
}

#[test]
fn transform_file_writes_packed_layout() {
    let dir = scratch("transform");
    let input = write_input(&dir, "in.aup2", PROJECT);
    let output = dir.join("out.aup2");

    let opts = TransformOpts {
        scene: Some(0),
        target_layer: 0,
        adjust_frames: true,
        ..TransformOpts::default()
    };
    let report = transform_file(&input, &output, &opts).unwrap();
    assert_eq!(report.selected, 2);

    let doc = read_document(&output).unwrap();
    let second = &doc.objects[&ObjectId(1)];
    assert_eq!(second.layer(), Some(0));
    assert_eq!(second.frame().map(|w| (w.start, w.end)), Some((10, 14)));
    assert!(second.has_focus());
}

#[test]
fn transform_file_leaves_no_output_on_bad_arguments() {
    let dir = scratch("transform_bad");
    let input = write_input(&dir, "in.aup2", PROJECT);
    let output = dir.join("out.aup2");

    let opts = TransformOpts {
        target_layer: -1,
        ..TransformOpts::default()
    };
    assert!(matches!(
        transform_file(&input, &output, &opts),
        Err(Aup2Error::InvalidArgument(_))
    ));
    assert!(!output.exists());
}

#[test]
fn transform_file_skips_output_when_nothing_is_selected() {
    let dir = scratch("transform_empty");
    let input = write_input(&dir, "in.aup2", PROJECT);
    let output = dir.join("out.aup2");

    let opts = TransformOpts {
        scene: Some(4),
        adjust_frames: true,
        ..TransformOpts::default()
    };
    let report = transform_file(&input, &output, &opts).unwrap();
    assert_eq!(report.selected, 0);
    assert_eq!(report.warnings.len(), 1);
    assert!(!output.exists());
}

#[test]
fn validate_file_reports_structure_and_parse_problems() {
    let dir = scratch("validate");
    let good = write_input(&dir, "good.aup2", PROJECT);
    let outcome = validate_file(&good).unwrap();
    assert!(outcome.valid);
    assert!(outcome.errors.is_empty());

    let no_frame = write_input(&dir, "no_frame.aup2", "[project]\n[scene.0]\n[0]\nlayer=1\n");
    let outcome = validate_file(&no_frame).unwrap();
    assert!(!outcome.valid);
    assert_eq!(outcome.errors, vec!["object 0 is missing 'frame'".to_string()]);

    let bad_header = write_input(&dir, "bad.aup2", "[project]\n[scene.x]\n");
    let outcome = validate_file(&bad_header).unwrap();
    assert!(!outcome.valid);
    assert!(outcome.errors[0].contains("line 2"));
}

#[test]
fn json_export_then_import_preserves_document() {
    let dir = scratch("json");
    let input = write_input(&dir, "in.aup2", PROJECT);
    let json = dir.join("tree.json");
    let back = dir.join("back.aup2");

    let original = export_json(&input, &json).unwrap();
    let tree: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(tree["object.0"]["effects"]["effect.0"]["color"], "ff00aa");

    let imported = import_json(&json, &back).unwrap();
    assert_eq!(imported, original);
    assert_eq!(read_document(&back).unwrap(), original);
}

#[test]
fn import_json_rejects_malformed_json() {
    let dir = scratch("json_bad");
    let json = write_input(&dir, "tree.json", "{ not json");
    let out = dir.join("out.aup2");
    assert!(matches!(
        import_json(&json, &out),
        Err(Aup2Error::Serde(_))
    ));
}
