// Greedy grouping of nearby map pins into cluster markers

use crate::model::{MapZone, Point};
use serde::Serialize;

pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 8.0;

/// Anything that can be dropped on the map as a pin.
pub trait Pin {
    fn position(&self) -> Point;
    fn is_hazardous(&self) -> bool;
}

impl Pin for MapZone {
    fn position(&self) -> Point {
        MapZone::position(self)
    }

    fn is_hazardous(&self) -> bool {
        self.level.is_hazardous()
    }
}

/// How membership is decided once a seed pin has been taken off the worklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Linkage {
    /// Only pins within range of the seed join. Grouping depends on input
    /// order when pins form a chain.
    #[default]
    SeedRadius,
    /// Pins within range of any member join, i.e. single-linkage.
    Transitive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary<T> {
    pub center: Point,
    pub count: usize,
    pub hazardous: bool,
    pub members: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClusterMarker<T> {
    Single { item: T },
    Group(ClusterSummary<T>),
}

impl<T: Pin> ClusterMarker<T> {
    pub fn position(&self) -> Point {
        match self {
            ClusterMarker::Single { item } => item.position(),
            ClusterMarker::Group(summary) => summary.center,
        }
    }

    pub fn is_hazardous(&self) -> bool {
        match self {
            ClusterMarker::Single { item } => item.is_hazardous(),
            ClusterMarker::Group(summary) => summary.hazardous,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ClusterMarker::Single { .. } => 1,
            ClusterMarker::Group(summary) => summary.count,
        }
    }
}

fn into_marker<T: Pin>(mut members: Vec<T>) -> ClusterMarker<T> {
    if members.len() == 1
        && let Some(item) = members.pop()
    {
        return ClusterMarker::Single { item };
    }

    let count = members.len();
    let (sum_x, sum_y) = members.iter().fold((0.0, 0.0), |(x, y), m| {
        let p = m.position();
        (x + p.x, y + p.y)
    });
    ClusterMarker::Group(ClusterSummary {
        center: Point::new(sum_x / count as f64, sum_y / count as f64),
        count,
        hazardous: members.iter().any(|m| m.is_hazardous()),
        members,
    })
}

/// Cluster with the seed-radius rule: pins strictly closer than `threshold`
/// to the seed join it.
pub fn cluster_points<T: Pin>(items: Vec<T>, threshold: f64) -> Vec<ClusterMarker<T>> {
    cluster_points_with(items, threshold, Linkage::SeedRadius)
}

pub fn cluster_points_with<T: Pin>(
    items: Vec<T>,
    threshold: f64,
    linkage: Linkage,
) -> Vec<ClusterMarker<T>> {
    let mut worklist = items;
    let mut markers = Vec::new();

    while !worklist.is_empty() {
        let seed = worklist.remove(0);
        let mut members = vec![seed];
        let mut frontier = 0;

        while frontier < members.len() {
            let anchor = members[frontier].position();
            let (near, far): (Vec<T>, Vec<T>) = worklist
                .into_iter()
                .partition(|p| p.position().distance(&anchor) < threshold);
            worklist = far;
            members.extend(near);

            frontier = match linkage {
                Linkage::SeedRadius => members.len(),
                Linkage::Transitive => frontier + 1,
            };
        }

        markers.push(into_marker(members));
    }

    markers
}
