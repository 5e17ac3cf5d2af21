use super::*;
use crate::{
    codec::value::Value,
    document::model::{ObjectRecord, Section},
    foundation::core::{FrameWindow, ObjectId},
};

fn valid_doc() -> Document {
    let mut doc = Document::new();
    doc.project = Some(Section::new());
    let mut obj = ObjectRecord::new();
    obj.set_layer(0);
    obj.set_frame(FrameWindow::new(0, 1).unwrap());
    doc.objects.insert(ObjectId(0), obj);
    doc
}

#[test]
fn complete_document_has_no_errors() {
    assert!(validate(&valid_doc()).is_empty());
}

#[test]
fn empty_document_reports_project_and_objects() {
    let errors = validate(&Document::new());
    assert_eq!(
        errors,
        vec![
            "missing [project] section".to_string(),
            "no objects found".to_string()
        ]
    );
}

#[test]
fn every_object_needs_layer_and_frame() {
    let mut doc = valid_doc();
    doc.objects.insert(ObjectId(5), ObjectRecord::new());
    let errors = validate(&doc);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("object 5 is missing 'layer'"));
    assert!(errors[1].contains("object 5 is missing 'frame'"));
}

#[test]
fn plain_effects_key_is_structural() {
    let mut doc = valid_doc();
    doc.objects
        .get_mut(&ObjectId(0))
        .unwrap()
        .props
        .insert("effects", Value::Text("blur".to_string()));
    let errors = validate(&doc);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("mapping of effect sections"));
}
