//! Layer / frame rewrite of a parsed document.
//!
//! Three behaviors, picked by [`TransformOpts`]:
//!
//! - `adjust_frames = false`: only `layer` changes on the selected objects.
//! - `adjust_frames = true` with a scene: the scene's objects are packed back to back on one
//!   timeline, renumbered `0..n` and the last one receives `focus`.
//! - `adjust_frames = true` without a scene: every scene is packed on its own, the groups are
//!   concatenated by scene id, then renumbered and focused as above.

use std::collections::BTreeSet;

use crate::{
    document::model::{Document, ObjectRecord},
    foundation::core::{FrameWindow, ObjectId, SceneId},
    foundation::error::{Aup2Error, Aup2Result},
    layout::solver::{Placed, SceneGroup, isolated_sequence, pack_group},
};

/// Position of objects without a `scene` value in the all-scenes layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnspecifiedScenePlacement {
    /// After every explicit scene.
    #[default]
    Trailing,
    /// Before every explicit scene.
    Leading,
    /// Packed together with scene 0.
    SceneZero,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransformOpts {
    /// Scene to transform; `None` for all scenes.
    pub scene: Option<i64>,
    pub target_layer: i64,
    pub adjust_frames: bool,
    pub unspecified_scene: UnspecifiedScenePlacement,
}

impl Default for TransformOpts {
    fn default() -> Self {
        Self {
            scene: None,
            target_layer: 0,
            adjust_frames: false,
            unspecified_scene: UnspecifiedScenePlacement::Trailing,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Plan {
    scene: Option<SceneId>,
    layer: u32,
}

impl TransformOpts {
    fn plan(&self) -> Aup2Result<Plan> {
        let scene = match self.scene {
            None => None,
            Some(s) => Some(SceneId(u32::try_from(s).map_err(|_| {
                Aup2Error::invalid_argument(format!(
                    "scene id {s} must be a non-negative integer"
                ))
            })?)),
        };
        let layer = u32::try_from(self.target_layer).map_err(|_| {
            Aup2Error::invalid_argument(format!(
                "layer id {} must be a non-negative integer",
                self.target_layer
            ))
        })?;
        Ok(Plan { scene, layer })
    }
}

/// What a transform did.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TransformReport {
    /// Number of objects the transform applied to.
    pub selected: usize,
    /// Whether the selected objects were renumbered `0..selected`.
    pub renumbered: bool,
    /// Unselected objects moved out of the renumbered range, `(old, new)`.
    pub relocated: Vec<(ObjectId, ObjectId)>,
    pub warnings: Vec<String>,
}

impl TransformReport {
    fn warn(&mut self, doc: &mut Document, msg: String) {
        self.warnings.push(msg.clone());
        doc.push_warning(msg);
    }
}

fn frame_of(doc: &Document, id: ObjectId) -> Aup2Result<FrameWindow> {
    doc.objects
        .get(&id)
        .and_then(ObjectRecord::frame)
        .ok_or_else(|| {
            Aup2Error::layout(format!(
                "object {id} has no valid frame window (expected 'frame=start,end')"
            ))
        })
}

fn group_of(obj: &ObjectRecord) -> SceneGroup {
    obj.scene().map_or(SceneGroup::Unspecified, SceneGroup::Scene)
}

/// Rewrites layer placement of the selected objects in place.
///
/// Arguments are checked before anything is touched: negative or oversized scene/layer ids are
/// [`Aup2Error::InvalidArgument`], and with `adjust_frames` every selected object must carry a
/// well-formed `frame` ([`Aup2Error::Layout`]). An empty selection is a warning, not an error.
///
/// With a scene filter, selected objects lacking a `scene` key get it set to the filter.
#[tracing::instrument(skip(doc))]
pub fn transform_layer(doc: &mut Document, opts: &TransformOpts) -> Aup2Result<TransformReport> {
    let plan = opts.plan()?;
    let selected = doc.object_ids_in_scene(plan.scene);
    let mut report = TransformReport {
        selected: selected.len(),
        ..TransformReport::default()
    };

    if selected.is_empty() {
        let scope = plan
            .scene
            .map_or_else(|| "the document".to_string(), |s| format!("scene {s}"));
        report.warn(doc, format!("no objects found in {scope}; nothing changed"));
        return Ok(report);
    }

    let windows = if opts.adjust_frames {
        Some(
            selected
                .iter()
                .map(|id| frame_of(doc, *id))
                .collect::<Aup2Result<Vec<_>>>()?,
        )
    } else {
        None
    };

    // Packing can fail, so it runs before anything in `doc` changes.
    let order = match &windows {
        None => None,
        Some(windows) => Some(match plan.scene {
            Some(scene) => pack_group(
                SceneGroup::Scene(scene),
                selected.iter().copied().zip(windows.iter().copied()).collect(),
            )?,
            None => isolated_sequence(
                selected
                    .iter()
                    .zip(windows.iter().copied())
                    .map(|(id, w)| (group_of(&doc.objects[id]), *id, w))
                    .collect(),
                opts.unspecified_scene,
            )?,
        }),
    };
    let relocations = match &order {
        Some(order) => plan_relocations(doc, order)?,
        None => Vec::new(),
    };

    if let Some(scene) = plan.scene {
        for id in &selected {
            if let Some(obj) = doc.objects.get_mut(id)
                && !obj.has_scene_key()
            {
                obj.set_scene(scene);
            }
        }
    }

    let Some(order) = order else {
        for id in &selected {
            if let Some(obj) = doc.objects.get_mut(id) {
                obj.set_layer(plan.layer);
            }
        }
        tracing::debug!(selected = selected.len(), layer = plan.layer, "layer reassigned");
        return Ok(report);
    };

    renumber(doc, &order, &relocations, plan.layer, &mut report);
    tracing::debug!(
        selected = order.len(),
        relocated = report.relocated.len(),
        layer = plan.layer,
        "frames packed and objects renumbered"
    );
    Ok(report)
}

/// Unselected objects sitting in `0..order.len()` and the ids they move to, above every id in use.
fn plan_relocations(doc: &Document, order: &[Placed]) -> Aup2Result<Vec<(ObjectId, ObjectId)>> {
    let count = u32::try_from(order.len())
        .map_err(|_| Aup2Error::layout("too many objects to renumber"))?;
    let selected = order.iter().map(|p| p.id).collect::<BTreeSet<_>>();

    let colliding = doc
        .objects
        .range(..ObjectId(count))
        .map(|(id, _)| *id)
        .filter(|id| !selected.contains(id))
        .collect::<Vec<_>>();
    if colliding.is_empty() {
        return Ok(Vec::new());
    }

    // Selected ids are freed by the renumbering, so only unselected ids bound the fresh range.
    let highest_kept = doc
        .objects
        .keys()
        .rev()
        .find(|id| !selected.contains(id))
        .map(|id| id.0);
    let mut next = match highest_kept {
        Some(max) => max.checked_add(1).map(|n| n.max(count)),
        None => Some(count),
    };
    let mut moves = Vec::with_capacity(colliding.len());
    for old in colliding {
        let new = next.ok_or_else(|| {
            Aup2Error::layout(format!("object id space exhausted while relocating object {old}"))
        })?;
        moves.push((old, ObjectId(new)));
        next = new.checked_add(1);
    }
    Ok(moves)
}

/// Re-inserts the packed objects as `0..n` after applying `relocations`, and leaves `focus` on the
/// last packed object only. Every id was checked up front, so nothing here can fail.
fn renumber(
    doc: &mut Document,
    order: &[Placed],
    relocations: &[(ObjectId, ObjectId)],
    layer: u32,
    report: &mut TransformReport,
) {
    let records = order
        .iter()
        .filter_map(|placed| doc.objects.remove(&placed.id))
        .collect::<Vec<_>>();

    for &(old, new) in relocations {
        if let Some(rec) = doc.objects.remove(&old) {
            doc.objects.insert(new, rec);
            report.relocated.push((old, new));
            report.warn(doc, format!("object {old} relocated to {new} to make room"));
        }
    }

    for obj in doc.objects.values_mut() {
        obj.set_focus(false);
    }

    let last = records.len().saturating_sub(1);
    for (idx, (placed, mut rec)) in order.iter().zip(records).enumerate() {
        rec.set_layer(layer);
        rec.set_frame(placed.window);
        rec.set_focus(idx == last);
        // idx < order.len(), which plan_relocations checked fits u32
        doc.objects.insert(ObjectId(idx as u32), rec);
    }

    report.renumbered = true;
}

#[cfg(test)]
#[path = "../../tests/unit/layout/transform.rs"]
mod tests;
