//! Turn instruction vocabulary shared by every guidance pass
//!
//! These enumerations are produced by the upstream turn classification stage;
//! the collapsing passes only read them and, when tombstoning a step, reset an
//! instruction to [`TurnInstruction::NO_TURN`].

use serde::{Deserialize, Serialize};

/// Classification of a maneuver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnType {
    Invalid,
    /// Only the street name changes, no actual turn
    NewName,
    Continue,
    Turn,
    Merge,
    OnRamp,
    OffRamp,
    Fork,
    EndOfRoad,
    Notification,
    EnterRoundabout,
    EnterAndExitRoundabout,
    EnterRotary,
    EnterAndExitRotary,
    EnterRoundaboutIntersection,
    EnterAndExitRoundaboutIntersection,
    /// Explicit lane guidance on an otherwise straight maneuver
    UseLane,
    /// Sentinel: valid on Depart/Arrive steps and on tombstones only
    NoTurn,
    /// A real but minor turn that is never announced on its own
    Suppressed,
    EnterRoundaboutAtExit,
    ExitRoundabout,
    EnterRotaryAtExit,
    ExitRotary,
    EnterRoundaboutIntersectionAtExit,
    ExitRoundaboutIntersection,
    StayOnRoundabout,
    Sliproad,
}

/// Direction of a maneuver relative to the incoming road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionModifier {
    UTurn,
    SharpRight,
    Right,
    SlightRight,
    Straight,
    SlightLeft,
    Left,
    SharpLeft,
}

impl DirectionModifier {
    pub fn is_left(&self) -> bool {
        matches!(
            self,
            DirectionModifier::SharpLeft | DirectionModifier::Left | DirectionModifier::SlightLeft
        )
    }

    pub fn is_right(&self) -> bool {
        matches!(
            self,
            DirectionModifier::SharpRight | DirectionModifier::Right | DirectionModifier::SlightRight
        )
    }
}

/// Marks a step as a route endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointType {
    #[default]
    None,
    Arrive,
    Depart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnInstruction {
    #[serde(rename = "type")]
    pub turn_type: TurnType,
    pub direction_modifier: DirectionModifier,
}

impl TurnInstruction {
    /// Instruction carried by Depart/Arrive steps and by tombstones
    pub const NO_TURN: TurnInstruction = TurnInstruction {
        turn_type: TurnType::NoTurn,
        direction_modifier: DirectionModifier::UTurn,
    };

    pub fn new(turn_type: TurnType, direction_modifier: DirectionModifier) -> Self {
        Self {
            turn_type,
            direction_modifier,
        }
    }

    pub fn has_left_modifier(&self) -> bool {
        self.direction_modifier.is_left()
    }

    pub fn has_right_modifier(&self) -> bool {
        self.direction_modifier.is_right()
    }
}

impl Default for TurnInstruction {
    fn default() -> Self {
        Self::NO_TURN
    }
}

/// Travel mode of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Mode of tombstoned steps
    Inaccessible,
    #[default]
    Driving,
    Cycling,
    Walking,
    Ferry,
    Train,
    PushingBike,
    StepsUp,
    StepsDown,
    RiverUp,
    RiverDown,
    Route,
}
