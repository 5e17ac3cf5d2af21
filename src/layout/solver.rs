use std::collections::BTreeMap;

use crate::{
    foundation::core::{FrameWindow, ObjectId, SceneId},
    foundation::error::{Aup2Error, Aup2Result},
    layout::transform::UnspecifiedScenePlacement,
};

/// Scene bucket used by the all-scenes layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum SceneGroup {
    Scene(SceneId),
    /// Objects without a usable `scene` value.
    Unspecified,
}

/// An object's slot in the packed timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placed {
    pub id: ObjectId,
    pub group: SceneGroup,
    pub window: FrameWindow,
}

/// Packs windows back to back in the given order.
///
/// The first window stays where it is; each following window starts one frame after the previous
/// end and keeps its own duration. Fails with [`Aup2Error::Layout`] when a packed window would end
/// past `i64::MAX`.
pub fn pack_contiguous(windows: &[FrameWindow]) -> Aup2Result<Vec<FrameWindow>> {
    let mut out = Vec::with_capacity(windows.len());
    let mut prev_end: Option<i64> = None;
    for w in windows {
        let placed = match prev_end {
            None => *w,
            Some(end) => {
                let start = end
                    .checked_add(1)
                    .ok_or_else(|| Aup2Error::layout("no frame left after i64::MAX"))?;
                w.moved_to(start)?
            }
        };
        prev_end = Some(placed.end);
        out.push(placed);
    }
    Ok(out)
}

/// Packs one group: sorted by original id, then [`pack_contiguous`].
pub fn pack_group(
    group: SceneGroup,
    mut members: Vec<(ObjectId, FrameWindow)>,
) -> Aup2Result<Vec<Placed>> {
    members.sort_by_key(|(id, _)| *id);
    let windows = members.iter().map(|(_, w)| *w).collect::<Vec<_>>();
    let placed = members
        .iter()
        .zip(pack_contiguous(&windows)?)
        .map(|((id, _), window)| Placed {
            id: *id,
            group,
            window,
        })
        .collect();
    Ok(placed)
}

/// Packs every scene group independently and concatenates the groups by ascending scene id.
///
/// Where the unspecified group goes is decided by `placement`.
pub fn isolated_sequence(
    members: Vec<(SceneGroup, ObjectId, FrameWindow)>,
    placement: UnspecifiedScenePlacement,
) -> Aup2Result<Vec<Placed>> {
    let mut groups = BTreeMap::<SceneGroup, Vec<(ObjectId, FrameWindow)>>::new();
    for (group, id, window) in members {
        let group = match (group, placement) {
            (SceneGroup::Unspecified, UnspecifiedScenePlacement::SceneZero) => {
                SceneGroup::Scene(SceneId(0))
            }
            _ => group,
        };
        groups.entry(group).or_default().push((id, window));
    }

    // `Unspecified` sorts after every scene.
    let mut order = groups.keys().copied().collect::<Vec<_>>();
    if placement == UnspecifiedScenePlacement::Leading
        && order.last() == Some(&SceneGroup::Unspecified)
    {
        order.rotate_right(1);
    }

    let mut out = Vec::new();
    for group in order {
        if let Some(members) = groups.remove(&group) {
            out.extend(pack_group(group, members)?);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
