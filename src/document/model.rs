use std::{collections::BTreeMap, fmt};

use crate::{
    codec::value::Value,
    foundation::core::{EffectId, FrameWindow, ObjectId, SceneId},
};

pub const KEY_LAYER: &str = "layer";
pub const KEY_FRAME: &str = "frame";
pub const KEY_FOCUS: &str = "focus";
pub const KEY_SCENE: &str = "scene";
pub const KEY_EFFECTS: &str = "effects";

/// Key/value block of one section, in first-insertion order.
///
/// Re-assigning a key replaces its value without moving it, so writing a section back out keeps
/// the order the keys were read in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    entries: Vec<(String, Value)>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Section {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut section = Section::new();
        for (k, v) in iter {
            section.insert(k, v);
        }
        section
    }
}

/// Identity of a main (non-effect) section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionRef {
    Project,
    Scene(SceneId),
    Object(ObjectId),
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => f.write_str("project"),
            Self::Scene(id) => write!(f, "scene.{id}"),
            Self::Object(id) => write!(f, "{id}"),
        }
    }
}

/// One timed object: its plain properties plus its effect stack.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectRecord {
    pub props: Section,
    pub effects: BTreeMap<EffectId, Section>,
}

impl ObjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self) -> Option<i64> {
        self.props.get(KEY_LAYER).and_then(Value::as_integer)
    }

    pub fn set_layer(&mut self, layer: u32) {
        self.props.insert(KEY_LAYER, Value::from(layer));
    }

    /// The `frame` window, when it is a well-formed `start,end` pair.
    pub fn frame(&self) -> Option<FrameWindow> {
        match self.props.get(KEY_FRAME)?.as_integers()? {
            [start, end] => FrameWindow::new(*start, *end).ok(),
            _ => None,
        }
    }

    pub fn set_frame(&mut self, window: FrameWindow) {
        self.props
            .insert(KEY_FRAME, Value::from(vec![window.start, window.end]));
    }

    pub fn has_focus(&self) -> bool {
        self.props.contains_key(KEY_FOCUS)
    }

    pub fn set_focus(&mut self, focus: bool) {
        if focus {
            self.props.insert(KEY_FOCUS, Value::Integer(1));
        } else {
            self.props.remove(KEY_FOCUS);
        }
    }

    pub fn has_scene_key(&self) -> bool {
        self.props.contains_key(KEY_SCENE)
    }

    /// Explicit `scene` value, if present and a valid id.
    pub fn scene(&self) -> Option<SceneId> {
        self.props
            .get(KEY_SCENE)
            .and_then(Value::as_integer)
            .and_then(|v| u32::try_from(v).ok())
            .map(SceneId)
    }

    /// Scene the object belongs to: its `scene` value, or scene 0 when the key is absent.
    ///
    /// `None` when a `scene` key exists but does not hold a valid id.
    pub fn effective_scene(&self) -> Option<SceneId> {
        if self.has_scene_key() {
            self.scene()
        } else {
            Some(SceneId(0))
        }
    }

    pub fn set_scene(&mut self, scene: SceneId) {
        self.props.insert(KEY_SCENE, Value::from(scene.0));
    }
}

/// Parse bookkeeping. Not part of the document content.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    pub line_count: usize,
    pub section_count: usize,
    pub object_count: usize,
}

/// A whole project file.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub project: Option<Section>,
    pub scenes: BTreeMap<SceneId, Section>,
    pub objects: BTreeMap<ObjectId, ObjectRecord>,
    pub diagnostics: Diagnostics,
}

// Diagnostics are transient and never compared.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.project == other.project
            && self.scenes == other.scenes
            && self.objects == other.objects
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, r: SectionRef) -> Option<&Section> {
        match r {
            SectionRef::Project => self.project.as_ref(),
            SectionRef::Scene(id) => self.scenes.get(&id),
            SectionRef::Object(id) => self.objects.get(&id).map(|o| &o.props),
        }
    }

    pub fn section_mut(&mut self, r: SectionRef) -> Option<&mut Section> {
        match r {
            SectionRef::Project => self.project.as_mut(),
            SectionRef::Scene(id) => self.scenes.get_mut(&id),
            SectionRef::Object(id) => self.objects.get_mut(&id).map(|o| &mut o.props),
        }
    }

    /// Ids of objects whose effective scene is `scene`, ascending; every object for `None`.
    pub fn object_ids_in_scene(&self, scene: Option<SceneId>) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, obj)| scene.is_none() || obj.effective_scene() == scene)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn warnings(&self) -> &[String] {
        &self.diagnostics.warnings
    }

    pub fn push_warning(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::warn!(warning = %msg);
        self.diagnostics.warnings.push(msg);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
