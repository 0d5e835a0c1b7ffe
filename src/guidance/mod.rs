//! Turn-by-turn guidance post-processing
//!
//! The step model and its vocabulary live in [`route_step`],
//! [`turn_instruction`] and [`lanes`]; the passes that shorten a step
//! sequence live in [`verbosity_reduction`], built on the shared helpers in
//! [`collapsing_utility`].

pub mod collapsing_utility;
pub mod lanes;
pub mod name_announcements;
pub mod route;
pub mod route_step;
pub mod turn_instruction;
pub mod validate;
pub mod verbosity_reduction;

pub use collapsing_utility::{remove_no_turn_instructions, NAME_SEGMENT_CUTOFF_LENGTH};
pub use lanes::{LaneTupel, TurnLaneType};
pub use name_announcements::{NameAnnouncer, StreetName, SuffixTable};
pub use route::{reduce_routes, Route, RouteDocument, RouteLeg};
pub use route_step::{Intersection, RouteStep, StepManeuver, EMPTY_NAMEID};
pub use turn_instruction::{DirectionModifier, TravelMode, TurnInstruction, TurnType, WaypointType};
pub use validate::{validate_collapsed, validate_route};
pub use verbosity_reduction::{collapse_use_lane, suppress_short_name_segments, VerbosityReducer};
