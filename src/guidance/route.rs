//! Route documents: routes (alternatives) made of legs made of steps
//!
//! Legs are independent step sequences, each anchored by its own Depart and
//! Arrive step, so [`reduce_routes`] fans them out over the rayon pool.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use butterfly_common::Result;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::name_announcements::NameAnnouncer;
use super::route_step::RouteStep;
use super::validate::validate_route;
use super::verbosity_reduction::VerbosityReducer;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteLeg {
    pub steps: Vec<RouteStep>,
}

impl RouteLeg {
    pub fn distance(&self) -> f64 {
        self.steps.iter().map(|step| step.distance).sum()
    }

    pub fn duration(&self) -> f64 {
        self.steps.iter().map(|step| step.duration).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    pub legs: Vec<RouteLeg>,
}

/// Top-level file format: `{ "routes": [ { "legs": [ { "steps": [...] } ] } ] }`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteDocument {
    pub routes: Vec<Route>,
}

impl RouteDocument {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let document = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Read {} routes ({} legs) from {}",
            document.routes.len(),
            document.leg_count(),
            path.as_ref().display()
        );
        Ok(document)
    }

    pub fn to_writer_pretty<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.to_writer_pretty(BufWriter::new(file))
    }

    pub fn leg_count(&self) -> usize {
        self.routes.iter().map(|route| route.legs.len()).sum()
    }

    /// Legs in document order, numbered the way errors refer to them
    pub fn legs(&self) -> impl Iterator<Item = (usize, &RouteLeg)> {
        self.routes.iter().flat_map(|route| route.legs.iter()).enumerate()
    }

    /// Validate every leg, failing on the first broken one
    pub fn validate(&self) -> Result<()> {
        for (leg, route_leg) in self.legs() {
            validate_route(leg, &route_leg.steps)?;
        }
        Ok(())
    }
}

/// Reduce every leg of every route in parallel; order is preserved
pub fn reduce_routes<A>(reducer: &VerbosityReducer<A>, routes: Vec<Route>) -> Vec<Route>
where
    A: NameAnnouncer + Sync,
{
    let steps_before: usize = count_steps(&routes);

    let reduced: Vec<Route> = routes
        .into_par_iter()
        .map(|route| Route {
            legs: route
                .legs
                .into_par_iter()
                .map(|leg| RouteLeg {
                    steps: reducer.reduce(leg.steps),
                })
                .collect(),
        })
        .collect();

    info!(
        "Reduced {} routes: {} -> {} steps",
        reduced.len(),
        steps_before,
        count_steps(&reduced)
    );
    reduced
}

fn count_steps(routes: &[Route]) -> usize {
    routes
        .iter()
        .flat_map(|route| route.legs.iter())
        .map(|leg| leg.steps.len())
        .sum()
}
