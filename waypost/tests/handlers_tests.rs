use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};
use waypost::handlers::*;
use waypost_core::cluster::{ClusterMarker, cluster_points};
use waypost_core::config::{DATABASE_FILE, Settings};
use waypost_core::data::{Database, SubmissionStore};
use waypost_core::model::{HazardLevel, MapZone, ZoneDraft};
use waypost_core::report::ReportFormat;
use waypost_core::timeline::TimelineOptions;

fn zone(name: &str, x: f64, y: f64, level: HazardLevel, community: bool) -> MapZone {
    MapZone {
        id: name.to_lowercase(),
        city: "Chengdu".to_string(),
        name: name.to_string(),
        level,
        description: String::new(),
        x,
        y,
        community,
    }
}

fn draft(x: f64, y: f64) -> ZoneDraft {
    ZoneDraft {
        city: "Chengdu".to_string(),
        name: "Ticket tout".to_string(),
        level: HazardLevel::Red,
        description: String::new(),
        x,
        y,
    }
}

// ============================================================================
// Plan Loading Tests
// ============================================================================

#[test]
fn test_load_plan_falls_back_to_demo() {
    let plan = load_plan(None).unwrap();
    assert!(plan.title.contains("Chengdu"));
    assert!(!plan.nodes.is_empty());
}

#[test]
fn test_load_plan_from_fenced_response() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "Here is your route:")?;
    writeln!(temp_file, "```json")?;
    writeln!(
        temp_file,
        r#"{{"title": "Short hop", "nodes": [{{"id": 1, "name": "Cafe", "type": "FOOD"}}], "edges": []}}"#
    )?;
    writeln!(temp_file, "```")?;

    let path = PathBuf::from(temp_file.path());
    let plan = load_plan(Some(&path))?;

    assert_eq!(plan.title, "Short hop");
    assert_eq!(plan.nodes.len(), 1);
    Ok(())
}

#[test]
fn test_load_plan_missing_file() {
    let path = PathBuf::from("/nonexistent/plan.json");
    let err = load_plan(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read plan file"));
}

#[test]
fn test_load_plan_without_json() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "Sorry, I cannot help with that.").unwrap();

    let path = PathBuf::from(temp_file.path());
    assert!(load_plan(Some(&path)).is_err());
}

// ============================================================================
// Timeline Option Tests
// ============================================================================

#[test]
fn test_resolve_options_uses_settings() {
    let options = resolve_timeline_options(&Settings::default(), None, None, None).unwrap();
    assert_eq!(options, TimelineOptions::default());
}

#[test]
fn test_resolve_options_applies_overrides() {
    let options =
        resolve_timeline_options(&Settings::default(), Some("07:15"), Some(10), Some(45)).unwrap();

    assert_eq!(options.start_minutes, 7 * 60 + 15);
    assert_eq!(options.default_gap, 10);
    assert_eq!(options.default_stay, 45);
}

#[test]
fn test_resolve_options_rejects_bad_start() {
    assert!(resolve_timeline_options(&Settings::default(), Some("noon"), None, None).is_err());
}

#[test]
fn test_render_plan_formats() {
    let plan = load_plan(None).unwrap();
    let options = TimelineOptions::default();

    let text = render_plan(&plan, &options, ReportFormat::Text).unwrap();
    assert!(text.contains("ITINERARY"));
    assert!(text.contains("[1] 09:00"));

    let json = render_plan(&plan, &options, ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["report"]["plan"]["stops"][0]["arrival"], "09:00");
}

// ============================================================================
// Zone Helper Tests
// ============================================================================

#[test]
fn test_open_database_requires_init() {
    let temp_dir = TempDir::new().unwrap();
    let err = open_database(temp_dir.path()).unwrap_err();
    assert!(err.to_string().contains("waypost init"));
}

#[test]
fn test_open_database_after_init() {
    let temp_dir = TempDir::new().unwrap();
    Database::new(&temp_dir.path().join(DATABASE_FILE)).unwrap();

    let db = open_database(temp_dir.path()).unwrap();
    assert!(db.pending().unwrap().is_empty());
}

#[test]
fn test_validate_draft_bounds() {
    assert!(validate_draft(&draft(0.0, 100.0)).is_ok());
    assert!(validate_draft(&draft(-1.0, 50.0)).is_err());
    assert!(validate_draft(&draft(50.0, 100.5)).is_err());
}

#[test]
fn test_validate_draft_requires_name() {
    let mut unnamed = draft(10.0, 10.0);
    unnamed.name = "  ".to_string();
    assert!(validate_draft(&unnamed).is_err());
}

#[test]
fn test_render_single_marker() {
    let markers = cluster_points(
        vec![zone("Night market", 12.0, 30.0, HazardLevel::Red, true)],
        8.0,
    );

    let line = render_marker(&markers[0]);
    assert_eq!(line, "● Night market (red) at (12.0, 30.0) [community]");
}

#[test]
fn test_render_group_marker() {
    let markers = cluster_points(
        vec![
            zone("Gate", 10.0, 10.0, HazardLevel::Green, false),
            zone("Square", 12.0, 10.0, HazardLevel::Red, false),
        ],
        8.0,
    );

    assert!(matches!(markers[0], ClusterMarker::Group(_)));
    let line = render_marker(&markers[0]);
    assert_eq!(line, "◉ 2 zones (red) around (11.0, 10.0): Gate, Square");
}
