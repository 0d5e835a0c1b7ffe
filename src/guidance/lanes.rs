//! Turn lane tags and per-intersection lane data
//!
//! A lane description lists the lane groups of an intersection from left to
//! right; lanes are counted from the right. A [`LaneTupel`] selects the lanes
//! that serve the maneuver, everything else is "to the left" or "to the right"
//! of it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Bitmask of the movements permitted on a lane group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TurnLaneType(u16);

impl TurnLaneType {
    pub const EMPTY: TurnLaneType = TurnLaneType(0);
    /// Lane tagged without any movement (`turn:lanes=|`)
    pub const NONE: TurnLaneType = TurnLaneType(1 << 0);
    pub const STRAIGHT: TurnLaneType = TurnLaneType(1 << 1);
    pub const SHARP_LEFT: TurnLaneType = TurnLaneType(1 << 2);
    pub const LEFT: TurnLaneType = TurnLaneType(1 << 3);
    pub const SLIGHT_LEFT: TurnLaneType = TurnLaneType(1 << 4);
    pub const SLIGHT_RIGHT: TurnLaneType = TurnLaneType(1 << 5);
    pub const RIGHT: TurnLaneType = TurnLaneType(1 << 6);
    pub const SHARP_RIGHT: TurnLaneType = TurnLaneType(1 << 7);
    pub const UTURN: TurnLaneType = TurnLaneType(1 << 8);
    pub const MERGE_TO_LEFT: TurnLaneType = TurnLaneType(1 << 9);
    pub const MERGE_TO_RIGHT: TurnLaneType = TurnLaneType(1 << 10);

    const TAGS: [(TurnLaneType, &'static str); 11] = [
        (Self::NONE, "none"),
        (Self::STRAIGHT, "straight"),
        (Self::SHARP_LEFT, "sharp_left"),
        (Self::LEFT, "left"),
        (Self::SLIGHT_LEFT, "slight_left"),
        (Self::SLIGHT_RIGHT, "slight_right"),
        (Self::RIGHT, "right"),
        (Self::SHARP_RIGHT, "sharp_right"),
        (Self::UTURN, "uturn"),
        (Self::MERGE_TO_LEFT, "merge_to_left"),
        (Self::MERGE_TO_RIGHT, "merge_to_right"),
    ];

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if any bit of `tag` is set on this mask
    pub fn contains_any(&self, tag: TurnLaneType) -> bool {
        !(*self & tag).is_empty()
    }

    /// Parse a single tag name such as `"slight_left"`
    pub fn from_tag(tag: &str) -> Option<TurnLaneType> {
        Self::TAGS
            .iter()
            .find(|(_, name)| *name == tag)
            .map(|(mask, _)| *mask)
    }

    /// Tag names of all set bits, in canonical order
    pub fn tags(&self) -> Vec<&'static str> {
        Self::TAGS
            .iter()
            .filter(|(mask, _)| self.contains_any(*mask))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for TurnLaneType {
    type Output = TurnLaneType;

    fn bitor(self, rhs: Self) -> Self::Output {
        TurnLaneType(self.0 | rhs.0)
    }
}

impl BitAnd for TurnLaneType {
    type Output = TurnLaneType;

    fn bitand(self, rhs: Self) -> Self::Output {
        TurnLaneType(self.0 & rhs.0)
    }
}

impl fmt::Display for TurnLaneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "empty");
        }
        write!(f, "{}", self.tags().join(";"))
    }
}

impl TryFrom<Vec<String>> for TurnLaneType {
    type Error = String;

    fn try_from(tags: Vec<String>) -> Result<Self, Self::Error> {
        tags.iter().try_fold(TurnLaneType::EMPTY, |mask, tag| {
            TurnLaneType::from_tag(tag)
                .map(|bit| mask | bit)
                .ok_or_else(|| format!("unknown lane tag '{tag}'"))
        })
    }
}

impl From<TurnLaneType> for Vec<String> {
    fn from(mask: TurnLaneType) -> Self {
        mask.tags().into_iter().map(str::to_string).collect()
    }
}

/// Lanes serving a maneuver: `lanes_in_turn` lanes, starting at
/// `first_lane_from_the_right` (0 = rightmost lane)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaneTupel {
    pub lanes_in_turn: u8,
    pub first_lane_from_the_right: u8,
}

impl LaneTupel {
    pub fn new(lanes_in_turn: u8, first_lane_from_the_right: u8) -> Self {
        Self {
            lanes_in_turn,
            first_lane_from_the_right,
        }
    }
}

/// Split a left-to-right lane description around the turn lanes
///
/// Returns `(left, right)`. Out-of-range tupels are clamped so that a
/// malformed description yields empty groups instead of panicking.
pub fn split_lanes(description: &[TurnLaneType], lanes: LaneTupel) -> (&[TurnLaneType], &[TurnLaneType]) {
    let total = description.len();
    let right_count = (lanes.first_lane_from_the_right as usize).min(total);
    let turn_and_right = (right_count + lanes.lanes_in_turn as usize).min(total);

    let left = &description[..total - turn_and_right];
    let right = &description[total - right_count..];
    (left, right)
}
