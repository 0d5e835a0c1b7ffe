//! Predicates, boundary scanners and compaction shared by the collapsing passes
//!
//! Everything here assumes a step sequence anchored by a Depart step at the
//! front and an Arrive step at the back. The scanners rely on those anchors to
//! terminate; calling them on a waypoint step or on an unanchored sequence is
//! a bug in the caller and panics.

use log::trace;

use super::name_announcements::{NameAnnouncer, StreetName};
use super::route_step::{RouteStep, EMPTY_NAMEID};
use super::turn_instruction::{DirectionModifier, TurnType, WaypointType};

/// Steps closer than this (in meters) to the next name change are transient.
/// A bit larger than 100 so that routes near the boundary do not oscillate.
pub const NAME_SEGMENT_CUTOFF_LENGTH: f64 = 105.0;

/// True if the step carries a real instruction (anything but `NoTurn`)
pub fn has_turn_type(step: &RouteStep) -> bool {
    step.turn_type() != TurnType::NoTurn
}

pub fn has_turn_type_of(step: &RouteStep, turn_type: TurnType) -> bool {
    step.turn_type() == turn_type
}

pub fn has_waypoint_type(step: &RouteStep) -> bool {
    step.waypoint_type() != WaypointType::None
}

pub fn has_modifier(step: &RouteStep, modifier: DirectionModifier) -> bool {
    step.maneuver.instruction.direction_modifier == modifier
}

pub fn has_lanes(step: &RouteStep) -> bool {
    step.intersections
        .first()
        .is_some_and(|intersection| intersection.lanes.lanes_in_turn != 0)
}

pub fn number_of_available_turns(step: &RouteStep) -> usize {
    step.intersections
        .first()
        .map_or(0, |intersection| intersection.entry.len())
}

pub fn number_of_allowed_turns(step: &RouteStep) -> usize {
    step.intersections.first().map_or(0, |intersection| {
        intersection.entry.iter().filter(|&&allowed| allowed).count()
    })
}

/// A suppressed turn at a node with only an entry and an exit: the geometric
/// signature of a traffic light
pub fn is_traffic_light_step(step: &RouteStep) -> bool {
    has_turn_type_of(step, TurnType::Suppressed) && number_of_available_turns(step) == 2
}

pub fn set_instruction_type(step: &mut RouteStep, turn_type: TurnType) {
    step.maneuver.instruction.turn_type = turn_type;
}

pub fn have_same_mode(lhs: &RouteStep, rhs: &RouteStep) -> bool {
    lhs.mode == rhs.mode
}

pub fn have_same_mode3(first: &RouteStep, second: &RouteStep, third: &RouteStep) -> bool {
    have_same_mode(first, second) && have_same_mode(second, third)
}

/// True if both steps are on what a driver would call the same street.
///
/// Unnamed steps never share a name. Equal name ids short-circuit the string
/// comparison done by `announcer`.
pub fn have_same_name<A>(lhs: &RouteStep, rhs: &RouteStep, announcer: &A) -> bool
where
    A: NameAnnouncer + ?Sized,
{
    if lhs.name_id == EMPTY_NAMEID || rhs.name_id == EMPTY_NAMEID {
        false
    } else if lhs.name_id == rhs.name_id {
        true
    } else {
        !announcer.requires_name_announced(StreetName::of(lhs), StreetName::of(rhs))
    }
}

/// True if both maneuvers go left (or straight), or both go right (or straight)
pub fn are_same_side(lhs: &RouteStep, rhs: &RouteStep) -> bool {
    let is_left = |step: &RouteStep| {
        has_modifier(step, DirectionModifier::Straight) || step.maneuver.instruction.has_left_modifier()
    };
    let is_right = |step: &RouteStep| {
        has_modifier(step, DirectionModifier::Straight) || step.maneuver.instruction.has_right_modifier()
    };

    (is_left(lhs) && is_left(rhs)) || (is_right(lhs) && is_right(rhs))
}

/// Index of the closest step before `index` that has a turn or waypoint type.
///
/// Panics if `steps[index]` is a waypoint or the sequence has no Depart anchor.
pub fn find_previous_turn(steps: &[RouteStep], index: usize) -> usize {
    debug_assert!(
        !has_waypoint_type(&steps[index]),
        "find_previous_turn called on waypoint step {index}"
    );
    let mut current = index;
    loop {
        current = current
            .checked_sub(1)
            .unwrap_or_else(|| panic!("no turn before step {index}: missing Depart anchor"));
        let step = &steps[current];
        if has_turn_type(step) || has_waypoint_type(step) {
            return current;
        }
        trace!("find_previous_turn: skipping tombstone {current}");
    }
}

/// Index of the closest step after `index` that has a turn or waypoint type.
///
/// Panics if `steps[index]` is a waypoint or the sequence has no Arrive anchor.
pub fn find_next_turn(steps: &[RouteStep], index: usize) -> usize {
    debug_assert!(
        !has_waypoint_type(&steps[index]),
        "find_next_turn called on waypoint step {index}"
    );
    let mut current = index;
    loop {
        current += 1;
        let step = &steps[current];
        if has_turn_type(step) || has_waypoint_type(step) {
            return current;
        }
        trace!("find_next_turn: skipping tombstone {current}");
    }
}

/// Drop every tombstone, keeping Depart/Arrive steps (which are `NoTurn` too
/// but carry a waypoint type).
#[must_use]
pub fn remove_no_turn_instructions(mut steps: Vec<RouteStep>) -> Vec<RouteStep> {
    let before = steps.len();
    steps.retain(|step| !(has_turn_type_of(step, TurnType::NoTurn) && !has_waypoint_type(step)));
    trace!("removed {} tombstones", before - steps.len());

    debug_assert_anchored(&steps);
    steps
}

/// Depart/Arrive anchoring invariants, checked in debug builds only
fn debug_assert_anchored(steps: &[RouteStep]) {
    debug_assert!(steps.len() >= 2, "route must keep depart and arrive, got {} steps", steps.len());

    if let (Some(front), Some(back)) = (steps.first(), steps.last()) {
        debug_assert_eq!(front.intersections.len(), 1);
        debug_assert_eq!(front.intersections[0].bearings.len(), 1);
        debug_assert_eq!(front.intersections[0].entry.len(), 1);
        debug_assert_eq!(front.waypoint_type(), WaypointType::Depart);

        debug_assert_eq!(back.intersections.len(), 1);
        debug_assert_eq!(back.intersections[0].bearings.len(), 1);
        debug_assert_eq!(back.intersections[0].entry.len(), 1);
        debug_assert_eq!(back.waypoint_type(), WaypointType::Arrive);
    }
}
