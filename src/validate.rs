use crate::document::model::{Document, KEY_EFFECTS, KEY_FRAME, KEY_LAYER};

/// Structural checks that must pass before a document can be written back out.
///
/// Returns one message per violation; empty means the document is reconstructable.
pub fn validate(doc: &Document) -> Vec<String> {
    let mut errors = Vec::new();

    if doc.project.is_none() {
        errors.push("missing [project] section".to_string());
    }

    if doc.objects.is_empty() {
        errors.push("no objects found".to_string());
    }

    for (id, obj) in &doc.objects {
        if !obj.props.contains_key(KEY_LAYER) {
            errors.push(format!("object {id} is missing '{KEY_LAYER}'"));
        }
        if !obj.props.contains_key(KEY_FRAME) {
            errors.push(format!("object {id} is missing '{KEY_FRAME}'"));
        }
        // A plain `effects=` key would shadow the effect stack.
        if obj.props.contains_key(KEY_EFFECTS) {
            errors.push(format!(
                "object {id}: '{KEY_EFFECTS}' must be a mapping of effect sections, found a plain value"
            ));
        }
    }

    errors
}

#[cfg(test)]
#[path = "../tests/unit/validate.rs"]
mod tests;
