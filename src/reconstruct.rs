//! [`Document`] → text, in a fixed section order.

use std::collections::BTreeMap;

use crate::{
    codec::value::{Value, encode},
    document::model::{
        Document, KEY_EFFECTS, KEY_FOCUS, KEY_FRAME, KEY_LAYER, ObjectRecord, Section,
    },
    foundation::core::{ObjectId, SceneId},
    foundation::error::{Aup2Error, Aup2Result, StructureErrors},
    validate::validate,
};

const SCENE_LEVEL_KEYS: [&str; 2] = ["scene", "name"];
const SCENE_LEVEL_PREFIXES: [&str; 4] = ["video.", "audio.", "cursor.", "display."];
const LEADING_OBJECT_KEYS: [&str; 3] = [KEY_LAYER, KEY_FRAME, KEY_FOCUS];

/// Keys that belong to scene blocks and are never written under `[project]`.
pub fn is_scene_level_key(key: &str) -> bool {
    SCENE_LEVEL_KEYS.contains(&key) || SCENE_LEVEL_PREFIXES.iter().any(|p| key.starts_with(p))
}

struct Writer {
    lines: Vec<String>,
}

impl Writer {
    fn header(&mut self, name: impl std::fmt::Display) {
        self.lines.push(format!("[{name}]"));
    }

    fn pair(&mut self, key: &str, value: &Value) {
        self.lines.push(format!("{key}={}", encode(value)));
    }

    fn section(&mut self, section: &Section) {
        for (k, v) in section.iter() {
            self.pair(k, v);
        }
    }

    fn object(&mut self, id: ObjectId, obj: &ObjectRecord) {
        self.header(id);
        for key in LEADING_OBJECT_KEYS {
            if let Some(v) = obj.props.get(key) {
                self.pair(key, v);
            }
        }
        for (k, v) in obj.props.iter() {
            if !LEADING_OBJECT_KEYS.contains(&k) && k != KEY_EFFECTS {
                self.pair(k, v);
            }
        }
        for (fx_id, fx) in &obj.effects {
            self.header(format_args!("{id}.{fx_id}"));
            self.section(fx);
        }
    }
}

/// Serializes a document.
///
/// Runs [`validate`] first and refuses with [`Aup2Error::Structure`] listing every violation.
///
/// Objects are written under the scene block matching their effective scene (missing `scene` key
/// means scene 0). Objects whose effective scene has no `[scene.N]` block in the document are
/// **not written at all**; no fallback scene block is synthesized for them.
#[tracing::instrument(skip(doc))]
pub fn reconstruct(doc: &Document) -> Aup2Result<String> {
    let errors = validate(doc);
    if !errors.is_empty() {
        return Err(Aup2Error::Structure(StructureErrors { errors }));
    }

    let mut by_scene = BTreeMap::<SceneId, Vec<(ObjectId, &ObjectRecord)>>::new();
    let mut dropped = 0usize;
    for (id, obj) in &doc.objects {
        match obj.effective_scene() {
            Some(scene) if doc.scenes.contains_key(&scene) => {
                by_scene.entry(scene).or_default().push((*id, obj));
            }
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(dropped, "objects without a matching scene block were omitted");
    }

    let mut w = Writer { lines: Vec::new() };
    if let Some(project) = &doc.project {
        w.header("project");
        for (k, v) in project.iter() {
            if !is_scene_level_key(k) {
                w.pair(k, v);
            }
        }
    }

    for (scene_id, scene) in &doc.scenes {
        w.header(format_args!("scene.{scene_id}"));
        w.section(scene);
        for (id, obj) in by_scene.get(scene_id).into_iter().flatten() {
            w.object(*id, obj);
        }
    }

    tracing::debug!(lines = w.lines.len(), "reconstructed document");
    Ok(w.lines.join("\n"))
}

#[cfg(test)]
#[path = "../tests/unit/reconstruct.rs"]
mod tests;
