//! Route invariant validation
//!
//! The collapsing passes assume a well-formed step sequence and only guard it
//! with debug assertions. Sequences read from files are checked here first so
//! that bad input turns into an [`Error`] instead of a panic.
//!
//! Checks:
//! - at least two steps
//! - Depart first, Arrive last, each with exactly one single-bearing
//!   intersection
//! - non-negative, finite distance/duration/weight on every step
//! - matching bearing/entry counts on every intersection
//! - after compaction: no tombstones between the anchors, no intersections
//!   without bearings

use butterfly_common::{Error, Result};
use log::debug;

use super::collapsing_utility::{has_turn_type, has_waypoint_type};
use super::route_step::{Intersection, RouteStep};
use super::turn_instruction::WaypointType;

/// Check a step sequence before it is handed to the passes
pub fn validate_route(leg: usize, steps: &[RouteStep]) -> Result<()> {
    if steps.len() < 2 {
        return Err(Error::invalid_route(
            leg,
            format!("expected at least depart and arrive, got {} steps", steps.len()),
        ));
    }

    let last = steps.len() - 1;
    check_anchor(leg, 0, &steps[0], WaypointType::Depart)?;
    check_anchor(leg, last, &steps[last], WaypointType::Arrive)?;

    for (index, step) in steps.iter().enumerate() {
        check_extent(leg, index, step)?;
        for intersection in &step.intersections {
            check_intersection(leg, index, intersection)?;
        }
    }

    debug!("leg {leg}: {} steps passed validation", steps.len());
    Ok(())
}

/// [`validate_route`] plus the post-compaction guarantee that every step
/// between the anchors carries a real instruction
pub fn validate_collapsed(leg: usize, steps: &[RouteStep]) -> Result<()> {
    validate_route(leg, steps)?;

    let last = steps.len() - 1;
    if let Some((index, _)) = steps[1..last]
        .iter()
        .enumerate()
        .find(|(_, step)| !has_turn_type(step) && !has_waypoint_type(step))
    {
        return Err(Error::invalid_step(leg, index + 1, "tombstone left after compaction"));
    }
    for (index, step) in steps.iter().enumerate() {
        if step.intersections.iter().any(|i| i.bearings.is_empty()) {
            return Err(Error::invalid_step(leg, index, "placeholder intersection without bearings"));
        }
    }
    Ok(())
}

fn check_anchor(leg: usize, index: usize, step: &RouteStep, expected: WaypointType) -> Result<()> {
    if step.waypoint_type() != expected {
        return Err(Error::invalid_route(
            leg,
            format!(
                "step {index} must be {expected:?}, found {:?}",
                step.waypoint_type()
            ),
        ));
    }

    let [first] = step.intersections.as_slice() else {
        return Err(Error::invalid_step(
            leg,
            index,
            format!(
                "{expected:?} step must have exactly one intersection, got {}",
                step.intersections.len()
            ),
        ));
    };
    if first.bearings.len() != 1 || first.entry.len() != 1 {
        return Err(Error::invalid_step(
            leg,
            index,
            format!(
                "{expected:?} intersection must have one bearing and one entry, got {} and {}",
                first.bearings.len(),
                first.entry.len()
            ),
        ));
    }
    Ok(())
}

fn check_extent(leg: usize, index: usize, step: &RouteStep) -> Result<()> {
    for (field, value) in [
        ("distance", step.distance),
        ("duration", step.duration),
        ("weight", step.weight),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::invalid_step(
                leg,
                index,
                format!("{field} must be a non-negative number, got {value}"),
            ));
        }
    }
    if step.intersections.is_empty() {
        return Err(Error::invalid_step(leg, index, "step has no intersections"));
    }
    Ok(())
}

fn check_intersection(leg: usize, index: usize, intersection: &Intersection) -> Result<()> {
    if intersection.bearings.len() != intersection.entry.len() {
        return Err(Error::invalid_step(
            leg,
            index,
            format!(
                "{} bearings but {} entry flags",
                intersection.bearings.len(),
                intersection.entry.len()
            ),
        ));
    }
    Ok(())
}
