// Arrival/departure estimation over an ordered route

use crate::duration::{format_clock, format_span, parse_duration};
use crate::model::{NodeId, RouteEdge, RouteNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_DAY_START: u32 = 9 * 60;
pub const DEFAULT_GAP_MINUTES: u32 = 15;
pub const DEFAULT_STAY_MINUTES: u32 = 30;

/// A figure that is either read from the plan or filled in with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "minutes", rename_all = "snake_case")]
pub enum Resolved {
    Parsed(u32),
    Defaulted(u32),
}

impl Resolved {
    pub fn minutes(&self) -> u32 {
        match *self {
            Resolved::Parsed(m) | Resolved::Defaulted(m) => m,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Resolved::Defaulted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineOptions {
    /// Minutes since midnight of the first arrival.
    pub start_minutes: u32,
    /// Travel time assumed when no edge joins two consecutive stops.
    pub default_gap: u32,
    /// Dwell time assumed when a stay is missing or unreadable.
    pub default_stay: u32,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            start_minutes: DEFAULT_DAY_START,
            default_gap: DEFAULT_GAP_MINUTES,
            default_stay: DEFAULT_STAY_MINUTES,
        }
    }
}

impl TimelineOptions {
    pub fn starting_at(start_minutes: u32) -> Self {
        Self {
            start_minutes,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub node_id: NodeId,
    /// Minutes since the start of the first day; not wrapped.
    pub arrival_minutes: u32,
    pub departure_minutes: u32,
    /// Travel into this stop; `None` for the first stop.
    pub travel: Option<Resolved>,
    pub stay: Resolved,
}

impl TimelineEntry {
    pub fn arrival(&self) -> String {
        format_clock(self.arrival_minutes)
    }

    pub fn departure(&self) -> String {
        format_clock(self.departure_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSummary {
    pub start: String,
    pub end: String,
    pub total_minutes: u32,
    pub total: String,
}

impl Timeline {
    pub fn get(&self, id: NodeId) -> Option<&TimelineEntry> {
        self.entries.iter().find(|e| e.node_id == id)
    }

    /// Clock strings keyed by node id.
    pub fn clock_times(&self) -> HashMap<NodeId, (String, String)> {
        self.entries
            .iter()
            .map(|e| (e.node_id, (e.arrival(), e.departure())))
            .collect()
    }

    /// First arrival to last departure; `None` for an empty route.
    pub fn summary(&self) -> Option<TripSummary> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        let total_minutes = last
            .departure_minutes
            .saturating_sub(first.arrival_minutes);
        Some(TripSummary {
            start: first.arrival(),
            end: last.departure(),
            total_minutes,
            total: format_span(total_minutes),
        })
    }
}

fn leg_between<'a>(edges: &'a [RouteEdge], from: NodeId, to: NodeId) -> Option<&'a RouteEdge> {
    edges.iter().find(|e| e.from == from && e.to == to)
}

fn resolve_stay(node: &RouteNode, default_stay: u32) -> Resolved {
    match node.estimated_stay.as_deref().map(parse_duration) {
        Some(minutes) if minutes > 0 => Resolved::Parsed(minutes),
        _ => Resolved::Defaulted(default_stay),
    }
}

/// Walk `ordered` with a running clock, as produced by
/// [`order_nodes`](crate::order::order_nodes).
pub fn compute_timeline(
    ordered: &[RouteNode],
    edges: &[RouteEdge],
    options: &TimelineOptions,
) -> Timeline {
    let mut clock = options.start_minutes;
    let mut entries = Vec::with_capacity(ordered.len());
    let mut previous: Option<&RouteNode> = None;

    for node in ordered {
        let travel = previous.map(|prev| match leg_between(edges, prev.id, node.id) {
            Some(edge) => Resolved::Parsed(parse_duration(&edge.duration)),
            None => {
                debug!(
                    "No leg from {} to {}, assuming {} minutes",
                    prev.id, node.id, options.default_gap
                );
                Resolved::Defaulted(options.default_gap)
            }
        });

        clock = clock.saturating_add(travel.map_or(0, |t| t.minutes()));
        let arrival_minutes = clock;

        let stay = resolve_stay(node, options.default_stay);
        clock = clock.saturating_add(stay.minutes());

        entries.push(TimelineEntry {
            node_id: node.id,
            arrival_minutes,
            departure_minutes: clock,
            travel,
            stay,
        });
        previous = Some(node);
    }

    Timeline { entries }
}
