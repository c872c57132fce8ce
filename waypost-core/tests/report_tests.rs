// Tests for route reports, layout and AI response decoding

use tempfile::TempDir;
use waypost_core::config::Settings;
use waypost_core::layout::{LayoutOptions, layout_route};
use waypost_core::model::{MenuAnalysis, RiskAnalysis, RoutePlan, TransportMode, Verdict};
use waypost_core::order::order_nodes;
use waypost_core::report::{
    ReportFormat, gather_route_report, generate_json_report, generate_menu_report,
    generate_risk_report, generate_text_report,
};
use waypost_core::response::{demo_plan_source, parse_ai_json};
use waypost_core::timeline::TimelineOptions;

fn sample_plan() -> RoutePlan {
    parse_ai_json(
        r#"```json
        {
          "title": "Old Town Loop",
          "nodes": [
            { "id": 3, "name": "Night Market", "type": "FOOD", "estimatedStay": "1小时" },
            { "id": 1, "name": "Hostel", "type": "HOTEL" },
            { "id": 2, "name": "City Wall", "description": "Rent bikes at the south gate", "type": "SCENERY", "estimatedStay": "2小时" },
            { "id": 4, "name": "Museum", "type": "museum", "estimatedStay": "45分钟" }
          ],
          "edges": [
            { "from": 1, "to": 2, "transportMode": "WALK", "duration": "10分钟", "distance": "800米" },
            { "from": 2, "to": 3, "transportMode": "taxi", "duration": "20分钟", "distance": "4公里" },
            { "from": 3, "to": 99, "transportMode": "BUS", "duration": "5分钟", "distance": "1公里" }
          ]
        }
        ```"#,
    )
    .unwrap()
}

// ============================================================================
// Response Decoding Tests
// ============================================================================

#[test]
fn test_unknown_category_becomes_other() {
    let plan = sample_plan();
    let museum = plan.node(4).unwrap();
    assert_eq!(museum.category.as_str(), "other");
}

#[test]
fn test_lowercase_transport_mode_accepted() {
    let plan = sample_plan();
    assert_eq!(plan.edges[1].transport_mode.as_str(), "taxi");
}

#[test]
fn test_unknown_transport_mode_becomes_other() {
    let plan: RoutePlan = parse_ai_json(
        r#"{"title": "Rail day", "nodes": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}],
            "edges": [{"from": 1, "to": 2, "transportMode": "TRAIN", "duration": "2小时"}]}"#,
    )
    .unwrap();

    assert_eq!(plan.edges[0].transport_mode, TransportMode::Other);
    let text = generate_text_report(&gather_route_report(&plan, &TimelineOptions::default()));
    assert!(text.contains("↓ other 120 min"));
}

#[test]
fn test_resolved_edges_skip_dangling() {
    let plan = sample_plan();
    assert_eq!(plan.resolved_edges().count(), 2);
}

#[test]
fn test_risk_analysis_decodes() {
    let analysis: RiskAnalysis = parse_ai_json(
        r#"{"score": 72, "summary": "Busy tourist core", "riskPoints": [
            {"location": "East gate", "level": "HIGH", "reason": "Ticket touts", "suggestion": "Buy online"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(analysis.points.len(), 1);
    let report = generate_risk_report(&analysis);
    assert!(report.contains("72/100"));
    assert!(report.contains("East gate [HIGH]"));
    assert!(report.contains("Buy online"));
}

#[test]
fn test_menu_analysis_report() {
    let analysis: MenuAnalysis = parse_ai_json(
        r#"{"traps": ["Seafood priced per 50g"], "verdict": "DANGER", "explanation": "Ask for the weight first."}"#,
    )
    .unwrap();

    assert_eq!(analysis.verdict, Verdict::Danger);
    let report = generate_menu_report(&analysis);
    assert!(report.contains("Verdict:      DANGER"));
    assert!(report.contains("- Seafood priced per 50g"));
}

// ============================================================================
// Route Report Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("pdf"), None);
}

#[test]
fn test_route_report_orders_and_times_stops() {
    let report = gather_route_report(&sample_plan(), &TimelineOptions::default());

    // The museum has no incoming leg, so it is seeded right after the hostel
    let order: Vec<i64> = report.stops.iter().map(|s| s.id).collect();
    assert_eq!(order, vec![1, 4, 2, 3]);

    assert_eq!(report.stops[0].arrival, "09:00");
    assert_eq!(report.stops[0].departure, "09:30");
    assert!(report.stops[0].stay_estimated);
    assert_eq!(report.stops[1].arrival, "09:45");
    assert_eq!(report.stops[2].arrival, "10:45");
    assert_eq!(report.stops[3].arrival, "13:05");

    assert!(report.legs[0].estimated);
    assert_eq!(report.legs[0].mode, None);
    assert!(!report.legs[2].estimated);
    assert_eq!(report.legs[2].mode, Some(TransportMode::Taxi));

    assert_eq!(report.skipped_edges, 1);
    let summary = report.summary.unwrap();
    assert_eq!(summary.end, "14:05");
    assert_eq!(summary.total, "5h 5m");
}

#[test]
fn test_text_report_contents() {
    let data = gather_route_report(&sample_plan(), &TimelineOptions::default());
    let text = generate_text_report(&data);

    assert!(text.contains("Old Town Loop"));
    assert!(text.contains("[1] 09:00 - 09:30  Hostel (hotel) ~"));
    assert!(text.contains("↓ transfer 15 min ~"));
    assert!(text.contains("↓ taxi 20 min, 4公里"));
    assert!(text.contains("Rent bikes at the south gate"));
    assert!(text.contains("Skipped legs: 1"));
    assert!(text.contains("Duration:     5h 5m"));
}

#[test]
fn test_text_report_wraps_cjk_by_characters() {
    let mut plan = sample_plan();
    let description = vec!["成都美食"; 20].join(" ");
    plan.nodes[1].description = description;

    let text = generate_text_report(&gather_route_report(&plan, &TimelineOptions::default()));
    let wrapped: Vec<&str> = text.lines().filter(|l| l.contains("成都美食")).collect();

    assert_eq!(wrapped.len(), 2);
    assert!(wrapped.iter().all(|l| l.chars().count() <= 80));
}

#[test]
fn test_json_report_structure() {
    let data = gather_route_report(&sample_plan(), &TimelineOptions::default());
    let json = generate_json_report(&data).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["report"]["metadata"]["generator"], "Waypost");
    assert_eq!(value["report"]["plan"]["stops"].as_array().unwrap().len(), 4);
    assert_eq!(value["report"]["plan"]["summary"]["start"], "09:00");
}

#[test]
fn test_empty_plan_report() {
    let plan = RoutePlan {
        title: "Nothing yet".to_string(),
        nodes: Vec::new(),
        edges: Vec::new(),
    };
    let data = gather_route_report(&plan, &TimelineOptions::default());

    assert!(data.summary.is_none());
    assert!(generate_text_report(&data).contains("(no stops)"));
}

#[test]
fn test_demo_plan_reports_cleanly() {
    let plan: RoutePlan = parse_ai_json(demo_plan_source()).unwrap();
    let data = gather_route_report(&plan, &TimelineOptions::default());

    assert_eq!(data.stops.len(), plan.nodes.len());
    assert_eq!(data.skipped_edges, 0);
    assert!(data.legs.iter().all(|l| !l.estimated));
}

// ============================================================================
// Layout Tests
// ============================================================================

#[test]
fn test_layout_stacks_nodes_in_order() {
    let plan = sample_plan();
    let ordered = order_nodes(&plan.nodes, &plan.edges);
    let layout = layout_route(&ordered, &plan.edges, &LayoutOptions::default());

    let ids: Vec<i64> = layout.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 4, 2, 3]);
    assert_eq!(layout.nodes[0].position.y, 50.0);
    assert_eq!(layout.nodes[3].position.y, 500.0);
    assert!(layout.nodes.iter().all(|n| n.position.x == 250.0));
}

#[test]
fn test_layout_skips_dangling_edges() {
    let plan = sample_plan();
    let ordered = order_nodes(&plan.nodes, &plan.edges);
    let layout = layout_route(&ordered, &plan.edges, &LayoutOptions::default());

    assert_eq!(layout.connectors.len(), 2);
    assert!(layout.connectors.iter().all(|c| !c.backward));
}

#[test]
fn test_layout_flags_backward_connectors() {
    let mut plan = sample_plan();
    plan.edges[0].from = 2;
    plan.edges[0].to = 1;
    plan.edges[0].details = Some("return".to_string());
    // Keep the original ordering so 1 stays above 2
    let layout = layout_route(
        &[plan.node(1).unwrap().clone(), plan.node(2).unwrap().clone()],
        &plan.edges,
        &LayoutOptions::default(),
    );

    let connector = &layout.connectors[0];
    assert!(connector.backward);
    assert_eq!(connector.label, "10分钟 · return");
}

// ============================================================================
// Settings Tests
// ============================================================================

#[test]
fn test_settings_default_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::load(temp_dir.path()).unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.timeline_options().unwrap(), TimelineOptions::default());
}

#[test]
fn test_settings_round_trip_and_partial_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings {
        day_start: "07:30".to_string(),
        ..Settings::default()
    };
    settings.save(temp_dir.path()).unwrap();
    assert_eq!(Settings::load(temp_dir.path()).unwrap(), settings);

    std::fs::write(
        temp_dir.path().join("config.json"),
        r#"{"cluster_threshold": 4.5}"#,
    )
    .unwrap();
    let partial = Settings::load(temp_dir.path()).unwrap();
    assert_eq!(partial.cluster_threshold, 4.5);
    assert_eq!(partial.day_start, "09:00");
}

#[test]
fn test_settings_reject_bad_clock() {
    let settings = Settings {
        day_start: "25:00".to_string(),
        ..Settings::default()
    };
    assert!(settings.timeline_options().is_err());
}
