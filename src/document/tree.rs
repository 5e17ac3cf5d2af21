//! Generic keyed-tree form of a [`Document`] (JSON), for export and for ingesting trees produced
//! elsewhere.
//!
//! Layout:
//!
//! ```text
//! {
//!   "project":  { key: value, ... },
//!   "scene.0":  { ... },
//!   "object.3": { key: value, ..., "effects": { "effect.0": { ... } } }
//! }
//! ```
//!
//! Entries whose key starts with `_` (such as an exported `_metadata` block) are skipped on import.

use serde_json::{Map, Number, Value as Json};

use crate::{
    codec::value::{NumericSeq, Value, encode},
    document::model::{Document, KEY_EFFECTS, ObjectRecord, Section},
    foundation::core::{EffectId, ObjectId, SceneId, parse_id},
    foundation::error::{Aup2Error, Aup2Result},
};

const SCENE_PREFIX: &str = "scene.";
const OBJECT_PREFIX: &str = "object.";
const EFFECT_PREFIX: &str = "effect.";

fn float_to_json(v: f64) -> Json {
    Number::from_f64(v)
        .map(Json::Number)
        .unwrap_or_else(|| Json::String(encode(&Value::Float(v))))
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Integer(v) => Json::from(*v),
        Value::Float(v) => float_to_json(*v),
        Value::Sequence(NumericSeq::Integers(items)) => {
            Json::Array(items.iter().map(|v| Json::from(*v)).collect())
        }
        Value::Sequence(NumericSeq::Floats(items)) => {
            Json::Array(items.iter().map(|v| float_to_json(*v)).collect())
        }
        Value::HexColor(s) | Value::Text(s) => Json::String(s.clone()),
        Value::Empty => Json::String(String::new()),
    }
}

fn section_to_json(section: &Section) -> Map<String, Json> {
    section
        .iter()
        .map(|(k, v)| (k.to_string(), value_to_json(v)))
        .collect()
}

/// Converts a document into its keyed tree. Diagnostics are not included.
pub fn to_tree(doc: &Document) -> Json {
    let mut root = Map::new();
    if let Some(project) = &doc.project {
        root.insert("project".to_string(), Json::Object(section_to_json(project)));
    }
    for (id, scene) in &doc.scenes {
        root.insert(
            format!("{SCENE_PREFIX}{id}"),
            Json::Object(section_to_json(scene)),
        );
    }
    for (id, obj) in &doc.objects {
        let mut node = section_to_json(&obj.props);
        if !obj.effects.is_empty() {
            let effects = obj
                .effects
                .iter()
                .map(|(eid, fx)| {
                    (
                        format!("{EFFECT_PREFIX}{eid}"),
                        Json::Object(section_to_json(fx)),
                    )
                })
                .collect();
            node.insert(KEY_EFFECTS.to_string(), Json::Object(effects));
        }
        root.insert(format!("{OBJECT_PREFIX}{id}"), Json::Object(node));
    }
    Json::Object(root)
}

fn number_from_json(path: &str, n: &Number) -> Aup2Result<Value> {
    if n.is_f64() {
        return n
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| Aup2Error::tree(format!("{path}: unrepresentable number")));
    }
    n.as_i64()
        .map(Value::Integer)
        .ok_or_else(|| Aup2Error::tree(format!("{path}: integer out of range")))
}

fn value_from_json(path: &str, node: &Json) -> Aup2Result<Value> {
    match node {
        Json::Null => Ok(Value::Empty),
        Json::Bool(b) => Ok(Value::from(*b)),
        Json::Number(n) => number_from_json(path, n),
        Json::String(s) => Ok(Value::decode(s)),
        Json::Array(items) => {
            if items.is_empty() {
                return Ok(Value::Empty);
            }
            let mut numbers = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let Json::Number(n) = item else {
                    return Err(Aup2Error::tree(format!(
                        "{path}[{i}]: list elements must be numbers"
                    )));
                };
                numbers.push(number_from_json(&format!("{path}[{i}]"), n)?);
            }
            if numbers.iter().all(|v| matches!(v, Value::Integer(_))) {
                let ints = numbers.iter().filter_map(Value::as_integer).collect();
                return Ok(Value::Sequence(NumericSeq::Integers(ints)));
            }
            let floats = numbers
                .iter()
                .map(|v| match v {
                    Value::Integer(i) => *i as f64,
                    Value::Float(f) => *f,
                    _ => 0.0,
                })
                .collect();
            Ok(Value::Sequence(NumericSeq::Floats(floats)))
        }
        Json::Object(_) => Err(Aup2Error::tree(format!(
            "{path}: nested mappings are not values"
        ))),
    }
}

fn expect_mapping<'a>(path: &str, node: &'a Json) -> Aup2Result<&'a Map<String, Json>> {
    node.as_object()
        .ok_or_else(|| Aup2Error::tree(format!("{path} must be a mapping")))
}

fn section_from_json(path: &str, node: &Json) -> Aup2Result<Section> {
    let mut section = Section::new();
    for (key, v) in expect_mapping(path, node)? {
        section.insert(key.clone(), value_from_json(&format!("{path}.{key}"), v)?);
    }
    Ok(section)
}

fn id_after(path: &str, prefix: &str, key: &str) -> Aup2Result<u32> {
    let raw = &key[prefix.len()..];
    parse_id(raw).map_err(|reason| Aup2Error::tree(format!("{path}: {reason}: '{raw}'")))
}

fn object_from_json(path: &str, node: &Json) -> Aup2Result<ObjectRecord> {
    let mut obj = ObjectRecord::new();
    for (key, v) in expect_mapping(path, node)? {
        if key != KEY_EFFECTS {
            obj.props
                .insert(key.clone(), value_from_json(&format!("{path}.{key}"), v)?);
            continue;
        }
        let effects_path = format!("{path}.{KEY_EFFECTS}");
        for (fx_key, fx) in expect_mapping(&effects_path, v)? {
            let fx_path = format!("{effects_path}.{fx_key}");
            if !fx_key.starts_with(EFFECT_PREFIX) {
                return Err(Aup2Error::tree(format!(
                    "{fx_path}: effect keys must look like '{EFFECT_PREFIX}<id>'"
                )));
            }
            let eid = EffectId(id_after(&fx_path, EFFECT_PREFIX, fx_key)?);
            obj.effects.insert(eid, section_from_json(&fx_path, fx)?);
        }
    }
    Ok(obj)
}

/// Builds a document from a keyed tree.
///
/// Unknown top-level entries are skipped with a warning; malformed ids, non-mapping sections and
/// nested values are errors.
pub fn from_tree(tree: &Json) -> Aup2Result<Document> {
    let root = expect_mapping("$", tree)?;
    let mut doc = Document::new();

    for (key, node) in root {
        if key.starts_with('_') {
            continue;
        }
        let path = format!("$.{key}");
        if key == "project" {
            doc.project = Some(section_from_json(&path, node)?);
        } else if key.starts_with(SCENE_PREFIX) {
            let id = SceneId(id_after(&path, SCENE_PREFIX, key)?);
            doc.scenes.insert(id, section_from_json(&path, node)?);
        } else if key.starts_with(OBJECT_PREFIX) {
            let id = ObjectId(id_after(&path, OBJECT_PREFIX, key)?);
            doc.objects.insert(id, object_from_json(&path, node)?);
        } else {
            doc.push_warning(format!("ignored unknown tree entry '{key}'"));
        }
    }

    doc.diagnostics.object_count = doc.objects.len();
    doc.diagnostics.section_count =
        usize::from(doc.project.is_some()) + doc.scenes.len() + doc.objects.len();
    tracing::debug!(
        objects = doc.objects.len(),
        scenes = doc.scenes.len(),
        "document built from tree"
    );
    Ok(doc)
}

#[cfg(test)]
#[path = "../../tests/unit/document/tree.rs"]
mod tests;
