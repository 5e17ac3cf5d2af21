use std::collections::BTreeMap;

use crate::{
    document::model::Document,
    foundation::core::{FrameWindow, ObjectId, SceneId},
};

/// Counts describing a document, as shown to users.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub has_project: bool,
    pub scene_count: usize,
    pub object_count: usize,
    /// Project + scene + object sections (effect sections are not counted).
    pub section_count: usize,
    /// Objects per integer `layer` value.
    pub layer_histogram: BTreeMap<i64, usize>,
    pub warning_count: usize,
    pub line_count: usize,
}

pub fn summarize(doc: &Document) -> Summary {
    let mut layer_histogram = BTreeMap::new();
    for obj in doc.objects.values() {
        if let Some(layer) = obj.layer() {
            *layer_histogram.entry(layer).or_insert(0) += 1;
        }
    }
    Summary {
        has_project: doc.project.is_some(),
        scene_count: doc.scenes.len(),
        object_count: doc.objects.len(),
        section_count: usize::from(doc.project.is_some()) + doc.scenes.len() + doc.objects.len(),
        layer_histogram,
        warning_count: doc.diagnostics.warnings.len(),
        line_count: doc.diagnostics.line_count,
    }
}

/// Per-object overview row.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ObjectInfo {
    pub id: ObjectId,
    /// Effective scene; `None` when the `scene` value is not a valid id.
    pub scene: Option<SceneId>,
    pub layer: Option<i64>,
    pub frame: Option<FrameWindow>,
    pub has_effects: bool,
}

/// Objects of one scene (effective scene, so a missing `scene` key counts as 0), or of all
/// scenes for `None`. Ascending id order.
pub fn objects_by_scene(doc: &Document, scene: Option<SceneId>) -> Vec<ObjectInfo> {
    doc.object_ids_in_scene(scene)
        .into_iter()
        .filter_map(|id| {
            let obj = doc.objects.get(&id)?;
            Some(ObjectInfo {
                id,
                scene: obj.effective_scene(),
                layer: obj.layer(),
                frame: obj.frame(),
                has_effects: !obj.effects.is_empty(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/summary.rs"]
mod tests;
