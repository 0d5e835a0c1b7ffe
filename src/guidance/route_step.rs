//! Route step model
//!
//! A [`RouteStep`] is one maneuver of a route leg together with the stretch of
//! road driven after it. The passes in this crate only ever mutate steps in
//! place through [`RouteStep::elongate_by`] and [`RouteStep::invalidate`];
//! physical removal happens once, in
//! [`remove_no_turn_instructions`](super::collapsing_utility::remove_no_turn_instructions).

use serde::{Deserialize, Serialize};

use super::lanes::{split_lanes, LaneTupel, TurnLaneType};
use super::turn_instruction::{DirectionModifier, TravelMode, TurnInstruction, TurnType, WaypointType};

/// Name id of steps without a street name
pub const EMPTY_NAMEID: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepManeuver {
    pub instruction: TurnInstruction,
    #[serde(default)]
    pub waypoint_type: WaypointType,
}

/// An intersection passed on a step; the first one is the maneuver location
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Intersection {
    pub bearings: Vec<u16>,
    /// `entry[i]` is true if `bearings[i]` may be entered
    pub entry: Vec<bool>,
    #[serde(default)]
    pub lanes: LaneTupel,
    /// Lane groups from left to right
    #[serde(default)]
    pub lane_description: Vec<TurnLaneType>,
}

impl Intersection {
    /// The single-bearing intersection found on Depart/Arrive steps
    pub fn endpoint(bearing: u16) -> Self {
        Self {
            bearings: vec![bearing],
            entry: vec![true],
            ..Default::default()
        }
    }

    /// Placeholder carried by tombstoned steps
    pub fn invalid() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    #[serde(default = "empty_name_id")]
    pub name_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default)]
    pub mode: TravelMode,
    pub maneuver: StepManeuver,
    pub intersections: Vec<Intersection>,
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub geometry_begin: usize,
    #[serde(default)]
    pub geometry_end: usize,
}

fn empty_name_id() -> u32 {
    EMPTY_NAMEID
}

impl RouteStep {
    /// A step with the given instruction and a single two-way intersection
    pub fn new(turn_type: TurnType, direction_modifier: DirectionModifier) -> Self {
        Self {
            name_id: EMPTY_NAMEID,
            name: String::new(),
            reference: String::new(),
            pronunciation: String::new(),
            mode: TravelMode::Driving,
            maneuver: StepManeuver {
                instruction: TurnInstruction::new(turn_type, direction_modifier),
                waypoint_type: WaypointType::None,
            },
            intersections: vec![Intersection {
                bearings: vec![0, 180],
                entry: vec![false, true],
                ..Default::default()
            }],
            distance: 0.0,
            duration: 0.0,
            weight: 0.0,
            geometry_begin: 0,
            geometry_end: 0,
        }
    }

    pub fn depart() -> Self {
        Self::waypoint(WaypointType::Depart)
    }

    pub fn arrive() -> Self {
        Self::waypoint(WaypointType::Arrive)
    }

    fn waypoint(waypoint_type: WaypointType) -> Self {
        Self {
            maneuver: StepManeuver {
                instruction: TurnInstruction::NO_TURN,
                waypoint_type,
            },
            intersections: vec![Intersection::endpoint(0)],
            ..Self::new(TurnType::NoTurn, DirectionModifier::UTurn)
        }
    }

    pub fn with_name(mut self, name_id: u32, name: &str) -> Self {
        self.name_id = name_id;
        self.name = name.to_string();
        self
    }

    pub fn with_ref(mut self, reference: &str) -> Self {
        self.reference = reference.to_string();
        self
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_extent(mut self, distance: f64, duration: f64) -> Self {
        self.distance = distance;
        self.duration = duration;
        self.weight = duration;
        self
    }

    pub fn with_geometry(mut self, begin: usize, end: usize) -> Self {
        self.geometry_begin = begin;
        self.geometry_end = end;
        self
    }

    pub fn with_intersection(mut self, intersection: Intersection) -> Self {
        self.intersections = vec![intersection];
        self
    }

    pub fn turn_type(&self) -> TurnType {
        self.maneuver.instruction.turn_type
    }

    pub fn waypoint_type(&self) -> WaypointType {
        self.maneuver.waypoint_type
    }

    /// Absorb `other` into this step.
    ///
    /// `other` is normally the step directly following this one; a step that
    /// starts before this one is prepended instead and hands over its maneuver,
    /// since the merged step now begins at `other`'s location. Waypoint steps
    /// only grow in extent: their intersection list stays a single endpoint.
    pub fn elongate_by(&mut self, other: &RouteStep) {
        self.distance += other.distance;
        self.duration += other.duration;
        self.weight += other.weight;

        // tombstone placeholders carry no bearings and are not passed
        let carried = other
            .intersections
            .iter()
            .filter(|intersection| !intersection.bearings.is_empty())
            .cloned();

        if other.geometry_begin >= self.geometry_begin {
            self.geometry_end = self.geometry_end.max(other.geometry_end);
            // Depart/Arrive keep their single endpoint intersection
            if self.maneuver.waypoint_type == WaypointType::None {
                self.intersections.extend(carried);
            }
        } else {
            self.geometry_begin = other.geometry_begin;
            self.maneuver = other.maneuver;
            let mut intersections: Vec<Intersection> = carried.collect();
            intersections.append(&mut self.intersections);
            self.intersections = intersections;
        }
    }

    /// Turn this step into a tombstone.
    ///
    /// Tombstones carry no extent, so removing them later keeps the route's
    /// total distance and duration unchanged.
    pub fn invalidate(&mut self) {
        self.name_id = EMPTY_NAMEID;
        self.name.clear();
        self.reference.clear();
        self.pronunciation.clear();
        self.mode = TravelMode::Inaccessible;
        self.geometry_begin = self.geometry_end;
        self.maneuver = StepManeuver {
            instruction: TurnInstruction::NO_TURN,
            waypoint_type: WaypointType::None,
        };
        self.intersections = vec![Intersection::invalid()];
        self.distance = 0.0;
        self.duration = 0.0;
        self.weight = 0.0;
    }

    /// Lane groups left of the lanes serving this step's maneuver
    pub fn lanes_to_the_left(&self) -> &[TurnLaneType] {
        match self.intersections.first() {
            Some(intersection) => split_lanes(&intersection.lane_description, intersection.lanes).0,
            None => &[],
        }
    }

    /// Lane groups right of the lanes serving this step's maneuver
    pub fn lanes_to_the_right(&self) -> &[TurnLaneType] {
        match self.intersections.first() {
            Some(intersection) => split_lanes(&intersection.lane_description, intersection.lanes).1,
            None => &[],
        }
    }
}
