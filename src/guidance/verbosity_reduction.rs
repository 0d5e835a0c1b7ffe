//! Verbosity reduction: folding steps that carry no navigational information
//! into their neighbours.
//!
//! Both passes scan the step list by index, merge by elongating the step that
//! stays and tombstoning the one that goes, and physically remove tombstones
//! only once at the end, so indices stay valid for the whole scan.

use log::{debug, trace};

use super::collapsing_utility::{
    has_lanes, has_turn_type, has_turn_type_of, has_waypoint_type, have_same_mode, have_same_name,
    remove_no_turn_instructions,
};
use super::lanes::TurnLaneType;
use super::name_announcements::{NameAnnouncer, SuffixTable};
use super::route_step::RouteStep;
use super::turn_instruction::TurnType;
use crate::config::ReductionConfig;

/// Runs the configured passes over a step sequence
#[derive(Debug, Clone)]
pub struct VerbosityReducer<A = SuffixTable> {
    config: ReductionConfig,
    announcer: A,
}

impl Default for VerbosityReducer<SuffixTable> {
    fn default() -> Self {
        Self::new(ReductionConfig::default())
    }
}

impl VerbosityReducer<SuffixTable> {
    /// Reducer using the configured suffix list to compare street names
    pub fn new(config: ReductionConfig) -> Self {
        let announcer = SuffixTable::new(&config.name_suffixes);
        Self { config, announcer }
    }
}

impl<A: NameAnnouncer> VerbosityReducer<A> {
    pub fn with_announcer(config: ReductionConfig, announcer: A) -> Self {
        Self { config, announcer }
    }

    pub fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Run every enabled pass: name changes first, lane guidance second
    pub fn reduce(&self, mut steps: Vec<RouteStep>) -> Vec<RouteStep> {
        if self.config.suppress_short_name_segments {
            steps = self.suppress_short_name_segments(steps);
        }
        if self.config.collapse_use_lane {
            steps = collapse_use_lane(steps);
        }
        steps
    }

    /// Merge name changes that only last for a short stretch of road.
    ///
    /// A `NewName` step onto a street with the same name as the last kept step
    /// is always merged. A genuine name change is merged together with the
    /// minor steps following it if the next real turn comes within
    /// `name_segment_cutoff` meters; otherwise it is kept and announced.
    pub fn suppress_short_name_segments(&self, mut steps: Vec<RouteStep>) -> Vec<RouteStep> {
        // empty routes should not happen, but there is nothing to collapse
        if steps.is_empty() {
            return steps;
        }
        debug_assert!(steps.last().is_some_and(|s| !has_turn_type(s) && has_waypoint_type(s)));

        let cutoff = self.config.name_segment_cutoff;
        let last = steps.len() - 1;
        let mut merged = 0usize;
        let mut prev = 0;
        let mut index = 1;

        while index < last {
            let step = &steps[index];

            if has_turn_type_of(step, TurnType::NewName)
                && have_same_mode(&steps[prev], step)
                && !has_lanes(step)
            {
                if have_same_name(&steps[prev], step, &self.announcer) {
                    trace!("step {index}: '{}' continues step {prev}", step.name);
                    merge_into(&mut steps, prev, index);
                    merged += 1;
                } else {
                    // sum up every distance that belongs to this name change
                    let mut end = index;
                    let mut distance = steps[index].distance;
                    while end + 1 < last && distance < cutoff && is_minor(&steps[end + 1]) {
                        end += 1;
                        distance += steps[end].distance;
                    }

                    if distance < cutoff {
                        debug!(
                            "steps {index}..={end}: name change to '{}' lasts {distance:.1}m, merging into step {prev}",
                            steps[index].name
                        );
                        for absorbed in index..=end {
                            merge_into(&mut steps, prev, absorbed);
                        }
                        merged += end - index + 1;
                    } else {
                        trace!("step {index}: name change to '{}' kept ({distance:.1}m)", steps[index].name);
                        prev = index;
                    }
                    index = end;
                }
            } else if has_turn_type(step) || has_waypoint_type(step) {
                prev = index;
            }
            index += 1;
        }

        debug!("suppress_short_name_segments: merged {merged} of {} steps", steps.len());
        remove_no_turn_instructions(steps)
    }

    pub fn collapse_use_lane(&self, steps: Vec<RouteStep>) -> Vec<RouteStep> {
        collapse_use_lane(steps)
    }
}

/// Suppress short name segments with the default cutoff and suffix table
pub fn suppress_short_name_segments(steps: Vec<RouteStep>) -> Vec<RouteStep> {
    VerbosityReducer::default().suppress_short_name_segments(steps)
}

/// Remove `UseLane` steps whose lane choice is unambiguous.
///
/// Lane guidance on a straight maneuver only matters if a neighbouring lane
/// group also allows going straight (or is untagged). Otherwise the step is
/// merged into the closest preceding instruction of the same travel mode.
pub fn collapse_use_lane(mut steps: Vec<RouteStep>) -> Vec<RouteStep> {
    if steps.is_empty() {
        return steps;
    }

    let mut merged = 0usize;
    for index in 1..steps.len() {
        let step = &steps[index];
        if has_turn_type_of(step, TurnType::UseLane) && can_collapse_use_lane(step) {
            let previous = previous_instruction(&steps, index);
            if have_same_mode(&steps[previous], &steps[index]) {
                trace!("step {index}: unambiguous lane guidance, merging into step {previous}");
                merge_into(&mut steps, previous, index);
                merged += 1;
            }
        }
    }

    debug!("collapse_use_lane: merged {merged} of {} steps", steps.len());
    remove_no_turn_instructions(steps)
}

/// Tombstones and suppressed turns may be swallowed by a name change
fn is_minor(step: &RouteStep) -> bool {
    !has_waypoint_type(step) && (!has_turn_type(step) || has_turn_type_of(step, TurnType::Suppressed))
}

fn can_collapse_use_lane(step: &RouteStep) -> bool {
    let ambiguous = TurnLaneType::STRAIGHT | TurnLaneType::NONE;

    // the description runs left to right: the group right next to the turn
    // lanes is the first one on the right, and the last one on the left
    let right_neighbour = step.lanes_to_the_right().first();
    if right_neighbour.is_some_and(|lanes| lanes.contains_any(ambiguous)) {
        return false;
    }

    let left_neighbour = step.lanes_to_the_left().last();
    !left_neighbour.is_some_and(|lanes| lanes.contains_any(ambiguous))
}

/// Closest index before `index` that is not a tombstone; Depart stops the walk
fn previous_instruction(steps: &[RouteStep], index: usize) -> usize {
    debug_assert!(index > 0 && index < steps.len());
    let mut previous = index - 1;
    while previous > 0 && has_turn_type_of(&steps[previous], TurnType::NoTurn) {
        previous -= 1;
    }
    previous
}

/// Elongate `steps[into]` by `steps[from]` and tombstone `steps[from]`
fn merge_into(steps: &mut [RouteStep], into: usize, from: usize) {
    debug_assert!(into < from);
    let (head, tail) = steps.split_at_mut(from);
    head[into].elongate_by(&tail[0]);
    tail[0].invalidate();
}
