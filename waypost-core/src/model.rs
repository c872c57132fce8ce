// Data shapes returned by the AI backend and consumed by the layout core

use serde::{Deserialize, Serialize};

pub type NodeId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeCategory {
    #[serde(alias = "food")]
    Food,
    #[serde(alias = "scenery")]
    Scenery,
    #[serde(alias = "hotel")]
    Hotel,
    #[serde(other)]
    Other,
}

impl NodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Food => "food",
            NodeCategory::Scenery => "scenery",
            NodeCategory::Hotel => "hotel",
            NodeCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportMode {
    #[serde(alias = "walk")]
    Walk,
    #[serde(alias = "taxi")]
    Taxi,
    #[serde(alias = "bus")]
    Bus,
    #[serde(alias = "subway")]
    Subway,
    #[serde(other)]
    Other,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Walk => "walk",
            TransportMode::Taxi => "taxi",
            TransportMode::Bus => "bus",
            TransportMode::Subway => "subway",
            TransportMode::Other => "other",
        }
    }
}

/// A stop on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default = "default_category")]
    pub category: NodeCategory,
    /// Free text such as "2小时" or "45 mins".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_stay: Option<String>,
}

fn default_category() -> NodeCategory {
    NodeCategory::Other
}

/// A transit leg between two stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub transport_mode: TransportMode,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub distance: String,
    /// Line name or other transit detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub title: String,
    #[serde(default)]
    pub nodes: Vec<RouteNode>,
    #[serde(default)]
    pub edges: Vec<RouteEdge>,
}

impl RoutePlan {
    pub fn node(&self, id: NodeId) -> Option<&RouteNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges whose endpoints both exist in the node list.
    pub fn resolved_edges(&self) -> impl Iterator<Item = &RouteEdge> {
        self.edges
            .iter()
            .filter(|e| self.node(e.from).is_some() && self.node(e.to).is_some())
    }
}

// Map zones

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HazardLevel {
    #[serde(alias = "red")]
    Red,
    #[serde(alias = "green")]
    Green,
}

impl HazardLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardLevel::Red => "red",
            HazardLevel::Green => "green",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "risk" => Some(HazardLevel::Red),
            "green" | "safe" => Some(HazardLevel::Green),
            _ => None,
        }
    }

    pub fn is_hazardous(&self) -> bool {
        matches!(self, HazardLevel::Red)
    }
}

/// A point in normalized map space, percent of the map bounds on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapZone {
    pub id: String,
    pub city: String,
    pub name: String,
    pub level: HazardLevel,
    #[serde(default)]
    pub description: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub community: bool,
}

impl MapZone {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(SubmissionStatus::Pending),
            "approved" => Some(SubmissionStatus::Approved),
            "rejected" => Some(SubmissionStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}

/// Fields a user fills in when proposing a community zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDraft {
    pub city: String,
    pub name: String,
    pub level: HazardLevel,
    pub description: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSubmission {
    pub id: String,
    pub city: String,
    pub name: String,
    pub level: HazardLevel,
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub status: SubmissionStatus,
    pub submitted_at: i64,
}

impl ZoneSubmission {
    pub fn into_zone(self) -> MapZone {
        MapZone {
            id: self.id,
            city: self.city,
            name: self.name,
            level: self.level,
            description: self.description,
            x: self.x,
            y: self.y,
            community: true,
        }
    }
}

// Pass-through analysis payloads, rendered but never computed on

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    #[serde(alias = "high")]
    High,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub location: String,
    pub level: RiskLevel,
    pub reason: String,
    #[serde(default)]
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub score: u8,
    pub summary: String,
    #[serde(default, alias = "riskPoints")]
    pub points: Vec<RiskPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    #[serde(alias = "safe")]
    Safe,
    #[serde(alias = "caution")]
    Caution,
    #[serde(alias = "danger")]
    Danger,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Safe => "safe",
            Verdict::Caution => "caution",
            Verdict::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuAnalysis {
    #[serde(default)]
    pub traps: Vec<String>,
    pub verdict: Verdict,
    #[serde(default)]
    pub explanation: String,
}
