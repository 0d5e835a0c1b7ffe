//! Deciding whether a change of street identity must be announced
//!
//! The collapsing passes treat this as an opaque predicate behind the
//! [`NameAnnouncer`] trait. [`SuffixTable`] is the stock implementation: it
//! ignores changes that only add or drop a directional suffix ("Main Street
//! North"), a ref that is contained in the other ref, or a name that is a
//! prefix of the other.

use std::collections::HashSet;

use super::route_step::RouteStep;

/// Suffixes and prefixes that do not make a street a different street
pub const DEFAULT_SUFFIXES: &[&str] = &[
    "N", "NE", "E", "SE", "S", "SW", "W", "NW", "North", "South", "West", "East", "Nor", "Sou",
    "We", "Ea",
];

/// The identity fields of a step that take part in announcements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreetName<'a> {
    pub name: &'a str,
    pub reference: &'a str,
    pub pronunciation: &'a str,
}

impl<'a> StreetName<'a> {
    pub fn of(step: &'a RouteStep) -> Self {
        Self {
            name: &step.name,
            reference: &step.reference,
            pronunciation: &step.pronunciation,
        }
    }
}

pub trait NameAnnouncer {
    /// True if travelling from `from` onto `to` has to be announced as a new street
    fn requires_name_announced(&self, from: StreetName<'_>, to: StreetName<'_>) -> bool;
}

impl<F> NameAnnouncer for F
where
    F: Fn(StreetName<'_>, StreetName<'_>) -> bool,
{
    fn requires_name_announced(&self, from: StreetName<'_>, to: StreetName<'_>) -> bool {
        self(from, to)
    }
}

/// Case-insensitive set of name suffixes
#[derive(Debug, Clone)]
pub struct SuffixTable {
    suffixes: HashSet<String>,
}

impl Default for SuffixTable {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIXES.iter().copied())
    }
}

impl SuffixTable {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_suffix(&self, candidate: &str) -> bool {
        self.suffixes.contains(&candidate.to_lowercase())
    }

    /// True if the shorter name occurs in the longer one and everything around
    /// it is a known suffix
    fn is_suffix_change(&self, first: &str, second: &str) -> bool {
        let (short, long) = if first.len() <= second.len() {
            (first, second)
        } else {
            (second, first)
        };
        if short.is_empty() {
            return false;
        }

        let Some(pos) = long.find(short) else {
            return false;
        };
        let prefix = long[..pos].trim();
        let suffix = long[pos + short.len()..].trim();
        let allowed = |part: &str| part.is_empty() || self.is_suffix(part);
        allowed(prefix) && allowed(suffix)
    }
}

impl NameAnnouncer for SuffixTable {
    fn requires_name_announced(&self, from: StreetName<'_>, to: StreetName<'_>) -> bool {
        // an unnamed road leading onto a named one
        if from.name.is_empty() && from.reference.is_empty() && !(to.name.is_empty() && to.reference.is_empty()) {
            return true;
        }

        let names_are_empty = from.name.is_empty() && to.name.is_empty();
        let name_is_contained = from.name.starts_with(to.name) || to.name.starts_with(from.name);
        let names_are_equal =
            from.name == to.name || name_is_contained || self.is_suffix_change(from.name, to.name);
        let name_is_removed = !from.name.is_empty() && to.name.is_empty();

        let refs_are_empty = from.reference.is_empty() && to.reference.is_empty();
        let ref_is_contained = from.reference.is_empty()
            || to.reference.is_empty()
            || from.reference.contains(to.reference)
            || to.reference.contains(from.reference);
        let ref_is_removed = !from.reference.is_empty() && to.reference.is_empty();

        let obvious_change = (names_are_empty && refs_are_empty)
            || (names_are_equal && ref_is_contained)
            || (names_are_equal && refs_are_empty)
            || (ref_is_removed && name_is_removed);

        // "(Ref)" onto "Name" and the other way around
        let switches_identity = (from.name.is_empty() && !from.reference.is_empty() && !to.name.is_empty() && to.reference.is_empty())
            || (!from.name.is_empty() && from.reference.is_empty() && to.name.is_empty() && !to.reference.is_empty());

        let pronunciation_changes = from.pronunciation != to.pronunciation;

        !obvious_change || switches_identity || pronunciation_changes
    }
}
