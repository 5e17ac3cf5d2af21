use std::fmt;

use crate::foundation::error::{Aup2Error, Aup2Result};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SceneId(pub u32);

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ObjectId(pub u32);

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EffectId(pub u32);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a bare digit run (no sign, no whitespace) into a `u32` id.
///
/// Returns `Err` with a short reason when the run is empty, contains a non-digit, or overflows.
pub(crate) fn parse_id(s: &str) -> Result<u32, &'static str> {
    if s.is_empty() {
        return Err("empty id");
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("id must be a non-negative integer");
    }
    s.parse::<u32>().map_err(|_| "id out of range")
}

/// Timeline placement of an object, `[start, end]` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameWindow {
    pub start: i64,
    pub end: i64, // inclusive
}

impl FrameWindow {
    pub fn new(start: i64, end: i64) -> Aup2Result<Self> {
        if start < 0 {
            return Err(Aup2Error::layout("frame start must be >= 0"));
        }
        if start > end {
            return Err(Aup2Error::layout("frame start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// `end - start`; a single-frame window has duration 0.
    pub fn duration(self) -> i64 {
        self.end - self.start
    }

    /// Frame count, saturating at `i64::MAX` for a window spanning the whole range.
    pub fn len_frames(self) -> i64 {
        self.duration().saturating_add(1)
    }

    /// Same duration, moved so that it begins at `start`.
    ///
    /// Fails when the moved end no longer fits in `i64`.
    pub fn moved_to(self, start: i64) -> Aup2Result<Self> {
        let end = start.checked_add(self.duration()).ok_or_else(|| {
            Aup2Error::layout(format!(
                "frame window of duration {} does not fit after frame {start}",
                self.duration()
            ))
        })?;
        Self::new(start, end)
    }

    pub fn overlaps(self, other: Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
