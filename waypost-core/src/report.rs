// Report generation for route plans and analysis payloads

use crate::model::{MenuAnalysis, NodeCategory, RiskAnalysis, RouteEdge, RoutePlan, TransportMode};
use crate::order::order_nodes;
use crate::timeline::{Resolved, TimelineOptions, TripSummary, compute_timeline};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────────────────────────\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopData {
    pub id: i64,
    pub name: String,
    pub category: NodeCategory,
    pub description: String,
    pub arrival: String,
    pub departure: String,
    pub stay_minutes: u32,
    pub stay_estimated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegData {
    pub from: i64,
    pub to: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TransportMode>,
    pub minutes: u32,
    pub estimated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteReport {
    pub title: String,
    pub stops: Vec<StopData>,
    pub legs: Vec<LegData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TripSummary>,
    pub skipped_edges: usize,
}

fn find_leg<'a>(edges: &'a [RouteEdge], from: i64, to: i64) -> Option<&'a RouteEdge> {
    edges.iter().find(|e| e.from == from && e.to == to)
}

/// Order the plan, run the timeline and collect what a report shows.
pub fn gather_route_report(plan: &RoutePlan, options: &TimelineOptions) -> RouteReport {
    let ordered = order_nodes(&plan.nodes, &plan.edges);
    let timeline = compute_timeline(&ordered, &plan.edges, options);

    let stops = ordered
        .iter()
        .zip(&timeline.entries)
        .map(|(node, entry)| StopData {
            id: node.id,
            name: node.name.clone(),
            category: node.category,
            description: node.description.clone(),
            arrival: entry.arrival(),
            departure: entry.departure(),
            stay_minutes: entry.stay.minutes(),
            stay_estimated: entry.stay.is_default(),
        })
        .collect();

    let legs = ordered
        .windows(2)
        .zip(timeline.entries.iter().skip(1))
        .map(|(pair, entry)| {
            let edge = find_leg(&plan.edges, pair[0].id, pair[1].id);
            let travel = entry.travel.unwrap_or(Resolved::Defaulted(options.default_gap));
            LegData {
                from: pair[0].id,
                to: pair[1].id,
                mode: edge.map(|e| e.transport_mode),
                minutes: travel.minutes(),
                estimated: travel.is_default(),
                distance: edge.map(|e| e.distance.clone()).filter(|d| !d.is_empty()),
                details: edge.and_then(|e| e.details.clone()),
            }
        })
        .collect();

    RouteReport {
        title: plan.title.clone(),
        stops,
        legs,
        summary: timeline.summary(),
        skipped_edges: plan.edges.len() - plan.resolved_edges().count(),
    }
}

pub fn generate_text_report(data: &RouteReport) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str(&format!("  {}\n", data.title));
    report.push_str(RULE);
    report.push('\n');

    if let Some(ref summary) = data.summary {
        report.push_str(&format!("Start:        {}\n", summary.start));
        report.push_str(&format!("End:          {}\n", summary.end));
        report.push_str(&format!("Duration:     {}\n", summary.total));
    }
    report.push_str(&format!("Stops:        {}\n", data.stops.len()));
    if data.skipped_edges > 0 {
        report.push_str(&format!(
            "Skipped legs: {} (unknown stops)\n",
            data.skipped_edges
        ));
    }
    report.push('\n');

    if data.stops.is_empty() {
        report.push_str("  (no stops)\n\n");
        return report;
    }

    report.push_str(RULE);
    report.push_str("ITINERARY\n");
    report.push_str(RULE);
    report.push('\n');

    for (idx, stop) in data.stops.iter().enumerate() {
        if idx > 0
            && let Some(leg) = data.legs.get(idx - 1)
        {
            report.push_str(&format_leg(leg));
        }

        let stay_marker = if stop.stay_estimated { " ~" } else { "" };
        report.push_str(&format!(
            "[{}] {} - {}  {} ({}){}\n",
            idx + 1,
            stop.arrival,
            stop.departure,
            stop.name,
            stop.category.as_str(),
            stay_marker
        ));
        if !stop.description.is_empty() {
            report.push_str(&wrap_text(&stop.description, 80, "      "));
        }
    }

    report.push('\n');
    report.push_str(THIN_RULE);
    report.push_str("~ estimated with a default duration\n\n");

    report
}

fn format_leg(leg: &LegData) -> String {
    let mode = leg.mode.map_or("transfer", |m| m.as_str());
    let mut line = format!("      ↓ {} {} min", mode, leg.minutes);
    if leg.estimated {
        line.push_str(" ~");
    }
    if let Some(ref distance) = leg.distance {
        line.push_str(&format!(", {}", distance));
    }
    if let Some(ref details) = leg.details {
        line.push_str(&format!(" ({})", details));
    }
    line.push('\n');
    line
}

pub fn generate_json_report(data: &RouteReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Waypost",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "plan": data
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_risk_report(analysis: &RiskAnalysis) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("RISK ANALYSIS\n");
    report.push_str(RULE);
    report.push('\n');
    report.push_str(&format!("Score:        {}/100\n\n", analysis.score.min(100)));
    report.push_str(&wrap_text(&analysis.summary, 80, "  "));
    report.push('\n');

    for (idx, point) in analysis.points.iter().enumerate() {
        report.push_str(&format!(
            "[{}] {} [{}]\n",
            idx + 1,
            point.location,
            point.level.as_str().to_uppercase()
        ));
        report.push_str(&wrap_text(&point.reason, 80, "  "));
        if !point.suggestion.is_empty() {
            report.push_str("  Suggestion:\n");
            report.push_str(&wrap_text(&point.suggestion, 80, "    "));
        }
        report.push_str(THIN_RULE);
    }

    report
}

pub fn generate_menu_report(analysis: &MenuAnalysis) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("MENU CHECK\n");
    report.push_str(RULE);
    report.push('\n');
    report.push_str(&format!(
        "Verdict:      {}\n\n",
        analysis.verdict.as_str().to_uppercase()
    ));

    if analysis.traps.is_empty() {
        report.push_str("  No traps spotted.\n");
    } else {
        for trap in &analysis.traps {
            report.push_str(&wrap_text(&format!("- {}", trap), 80, "  "));
        }
    }
    report.push('\n');

    if !analysis.explanation.is_empty() {
        report.push_str(&wrap_text(&analysis.explanation, 80, ""));
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.chars().count() + word.chars().count() + 1 > width - indent.chars().count()
            && !current_line.is_empty()
        {
            result.push_str(indent);
            result.push_str(&current_line);
            result.push('\n');
            current_line.clear();
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        result.push_str(indent);
        result.push_str(&current_line);
        result.push('\n');
    }

    result
}
