use super::*;
use crate::codec::value::Value;

fn build(lines: &[&str]) -> Document {
    let mut b = DocumentBuilder::new();
    for (i, l) in lines.iter().enumerate() {
        b.feed(i + 1, l).unwrap();
    }
    b.finish(lines.len())
}

#[test]
fn effect_section_creates_missing_parent() {
    let doc = build(&["[project]", "[3.0]", "effect.name=blur"]);
    let obj = &doc.objects[&ObjectId(3)];
    assert!(obj.props.is_empty());
    assert_eq!(
        obj.effects[&EffectId(0)].get("effect.name"),
        Some(&Value::Text("blur".to_string()))
    );
    assert!(doc.warnings()[0].starts_with("line 2:"));
    assert!(doc.warnings()[0].contains("no parent object 3"));
}

#[test]
fn effect_cursor_clears_main_section() {
    let doc = build(&["[project]", "[0]", "layer=1", "[0.0]", "x=1", "[0.1]", "y=2"]);
    let obj = &doc.objects[&ObjectId(0)];
    assert_eq!(obj.props.len(), 1);
    assert_eq!(obj.effects.len(), 2);
    assert!(obj.effects[&EffectId(1)].contains_key("y"));
    assert!(!obj.effects[&EffectId(0)].contains_key("y"));
}

#[test]
fn reopening_a_main_section_merges_keys() {
    let doc = build(&["[project]", "a=1", "[scene.0]", "[project]", "b=2", "[0]"]);
    let project = doc.project.as_ref().unwrap();
    assert_eq!(project.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn orphan_assignment_is_dropped_with_warning() {
    let doc = build(&["a=1", "[project]", "[0]"]);
    assert!(doc.project.as_ref().unwrap().is_empty());
    assert!(doc.warnings()[0].contains("no active section"));
}

#[test]
fn unrecognized_header_keeps_cursor() {
    let doc = build(&["[project]", "[what]", "a=1", "[0]"]);
    assert!(doc.project.as_ref().unwrap().contains_key("a"));
    assert!(doc.warnings()[0].contains("unrecognized section header: [what]"));
}

#[test]
fn decode_warnings_carry_line_numbers() {
    let doc = build(&["[project]", "[0]", "frame=0,x"]);
    assert_eq!(doc.warnings().len(), 1);
    assert!(doc.warnings()[0].starts_with("line 3:"));
    assert!(doc.warnings()[0].contains("numeric list"));
}

#[test]
fn finish_reports_missing_structure_and_counts() {
    let doc = build(&["[scene.0]", "x=1"]);
    assert_eq!(
        doc.warnings(),
        &[
            "no [project] section found".to_string(),
            "no object sections found".to_string()
        ]
    );
    assert_eq!(doc.diagnostics.section_count, 1);
    assert_eq!(doc.diagnostics.object_count, 0);
    assert_eq!(doc.diagnostics.line_count, 2);
}

#[test]
fn fatal_header_names_the_line() {
    let mut b = DocumentBuilder::new();
    b.feed(1, "[project]").unwrap();
    let err = b.feed(2, "[scene.abc]").unwrap_err();
    assert!(matches!(err, Aup2Error::Parse { line: 2, .. }));
}
