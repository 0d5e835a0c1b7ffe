//! # Butterfly-guidance Library
//!
//! Post-processing for turn-by-turn guidance: takes the classified maneuver
//! steps of a route leg and folds away the ones a driver does not need to
//! hear, while keeping total distance and duration intact.
//!
//! ## Passes
//!
//! - **Short name segments**: a street name that only lasts for a few meters
//!   before the next turn is merged into the preceding instruction
//! - **Use-lane collapsing**: lane guidance on a straight maneuver is dropped
//!   when no neighbouring lane group also goes straight
//!
//! ## Basic Usage
//!
//! ```rust
//! use butterfly_guidance::{RouteStep, TurnType, DirectionModifier, VerbosityReducer};
//!
//! let steps = vec![
//!     RouteStep::depart().with_name(1, "Main Street"),
//!     RouteStep::new(TurnType::NewName, DirectionModifier::Straight)
//!         .with_name(2, "Market Square")
//!         .with_extent(40.0, 4.0),
//!     RouteStep::new(TurnType::Turn, DirectionModifier::Left)
//!         .with_name(3, "Station Road")
//!         .with_extent(300.0, 30.0),
//!     RouteStep::arrive(),
//! ];
//!
//! let reduced = VerbosityReducer::default().reduce(steps);
//! assert_eq!(reduced.len(), 3);
//! assert_eq!(reduced[0].distance, 40.0);
//! ```
//!
//! ## Configuration
//!
//! ```rust,no_run
//! use butterfly_guidance::{ReductionConfig, VerbosityReducer};
//!
//! # fn main() -> butterfly_guidance::Result<()> {
//! let config = ReductionConfig::load("guidance.toml")?;
//! let reducer = VerbosityReducer::new(config);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod guidance;

pub use butterfly_common::{Error, Result};
pub use config::ReductionConfig;
pub use guidance::{
    collapse_use_lane, reduce_routes, suppress_short_name_segments, validate_collapsed,
    validate_route, DirectionModifier, Route, RouteDocument, RouteLeg, RouteStep, TravelMode,
    TurnType, VerbosityReducer, WaypointType,
};
