use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use waypost_core::cluster::{ClusterMarker, Linkage, cluster_points_with};
use waypost_core::config::{
    CONFIG_FILE, DATABASE_FILE, DEFAULT_CONFIG_DIR, Settings, expand_config_dir,
};
use waypost_core::data::{Database, SubmissionStore};
use waypost_core::duration::parse_clock;
use waypost_core::layout::{LayoutOptions, layout_route};
use waypost_core::model::{
    HazardLevel, MapZone, MenuAnalysis, RiskAnalysis, RoutePlan, ZoneDraft, ZoneSubmission,
};
use waypost_core::order::order_nodes;
use waypost_core::report::{
    ReportFormat, gather_route_report, generate_json_report, generate_menu_report,
    generate_risk_report, generate_text_report, save_report,
};
use waypost_core::response::{demo_plan_source, parse_ai_json};
use waypost_core::timeline::TimelineOptions;
use waypost_core::zones::{seed_cities, seed_zones_for, visible_zones};

// Helper functions for plan handlers

/// Read a route plan from an AI response file, or the bundled demo plan
/// when no file is given.
pub fn load_plan(file: Option<&PathBuf>) -> Result<RoutePlan> {
    let raw = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file {}", path.display()))?,
        None => {
            info!("No plan file given, using the bundled demo plan");
            demo_plan_source().to_string()
        }
    };

    parse_ai_json(&raw).context("Response did not contain a usable route plan")
}

/// Apply command line overrides on top of the configured timeline defaults.
pub fn resolve_timeline_options(
    settings: &Settings,
    start: Option<&str>,
    gap: Option<u32>,
    stay: Option<u32>,
) -> Result<TimelineOptions> {
    let mut options = settings
        .timeline_options()
        .context("Invalid day_start in config.json")?;

    if let Some(start) = start {
        options.start_minutes = parse_clock(start)?;
    }
    if let Some(gap) = gap {
        options.default_gap = gap;
    }
    if let Some(stay) = stay {
        options.default_stay = stay;
    }

    Ok(options)
}

/// Render a route plan in the requested format.
pub fn render_plan(
    plan: &RoutePlan,
    options: &TimelineOptions,
    format: ReportFormat,
) -> Result<String> {
    let data = gather_route_report(plan, options);
    let content = match format {
        ReportFormat::Text => generate_text_report(&data),
        ReportFormat::Json => generate_json_report(&data)?,
    };
    Ok(content)
}

// Helper functions for zone handlers

pub fn config_dir_arg(args: &ArgMatches) -> PathBuf {
    let dir = args
        .get_one::<String>("config-dir")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_DIR);
    expand_config_dir(dir)
}

/// Open the zone database, refusing to create one outside of `init`.
pub fn open_database(config_dir: &Path) -> Result<Database> {
    let db_path = config_dir.join(DATABASE_FILE);
    if !Database::exists(&db_path) {
        bail!(
            "No database at {}. Run `waypost init` first.",
            db_path.display()
        );
    }
    Database::new(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))
}

/// Check a draft before it reaches the store.
pub fn validate_draft(draft: &ZoneDraft) -> Result<()> {
    if draft.city.trim().is_empty() {
        bail!("City must not be empty");
    }
    if draft.name.trim().is_empty() {
        bail!("Zone name must not be empty");
    }
    for (axis, value) in [("x", draft.x), ("y", draft.y)] {
        if !(0.0..=100.0).contains(&value) {
            bail!("{} must be between 0 and 100 (percent of the map), got {}", axis, value);
        }
    }
    Ok(())
}

/// One line describing a map marker, without colour.
pub fn render_marker(marker: &ClusterMarker<MapZone>) -> String {
    let position = marker.position();
    match marker {
        ClusterMarker::Single { item } => {
            let source = if item.community { " [community]" } else { "" };
            format!(
                "● {} ({}) at ({:.1}, {:.1}){}",
                item.name,
                item.level.as_str(),
                position.x,
                position.y,
                source
            )
        }
        ClusterMarker::Group(summary) => {
            let names: Vec<&str> = summary.members.iter().map(|z| z.name.as_str()).collect();
            let level = if summary.hazardous { "red" } else { "green" };
            format!(
                "◉ {} zones ({}) around ({:.1}, {:.1}): {}",
                summary.count,
                level,
                position.x,
                position.y,
                names.join(", ")
            )
        }
    }
}

fn render_submission(submission: &ZoneSubmission) -> String {
    format!(
        "{}  {} / {} ({}) at ({:.1}, {:.1})",
        submission.id,
        submission.city,
        submission.name,
        submission.level.as_str(),
        submission.x,
        submission.y
    )
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_prompt(msg: &str) -> io::Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().to_lowercase())
}

fn print_saved(path: &Path) {
    println!(
        "{} Report saved to: {}",
        "✓".green().bold(),
        path.display().to_string().bright_white()
    );
}

pub fn handle_init(args: &ArgMatches) -> Result<()> {
    print_divider();
    println!("{}", "  WAYPOST INITIALIZATION".bright_white().bold());
    print_divider();
    println!();

    let force = args.get_flag("force");
    let config_dir = config_dir_arg(args);
    let db_path = config_dir.join(DATABASE_FILE);

    println!(
        "{} Target: {}",
        "→".blue(),
        config_dir.display().to_string().bright_white()
    );
    println!();

    let settings_path = config_dir.join(CONFIG_FILE);
    let settings_exist = settings_path.exists();
    let db_exists = Database::exists(&db_path);

    // Check for existing installation
    if (settings_exist || db_exists) && !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!("Waypost is already initialized here:");
        if settings_exist {
            println!(
                "  {} {}",
                "•".yellow(),
                settings_path.display().to_string().bright_white()
            );
        }
        if db_exists {
            println!(
                "  {} {}",
                "•".yellow(),
                db_path.display().to_string().bright_white()
            );
        }
        println!();
        println!(
            "{}",
            "Settings will be reset and pending submissions lost.".yellow()
        );

        let response = print_prompt("Do you want to continue? [y/N]:")?;
        println!();

        if response != "y" && response != "yes" {
            println!("{} Initialization cancelled.", "✗".red().bold());
            return Ok(());
        }
        println!("{} Proceeding with overwrite", "→".yellow().bold());
        println!();
    }

    println!("{} Creating directory structure...", "→".blue());
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;

    Settings::default().save(&config_dir)?;
    println!(
        "  {} {}",
        "✓".green(),
        settings_path.display().to_string().bright_white()
    );

    if Database::exists(&db_path) {
        Database::drop(&db_path)?;
        println!("{} Existing database removed", "✓".green().bold());
    }
    println!("{} Creating database...", "→".blue());
    Database::new(&db_path)?;

    println!();
    print_divider();
    println!("{}", "  INITIALIZATION COMPLETE".green().bold());
    print_divider();
    println!();
    println!(
        "{} Settings: {}",
        "✓".green().bold(),
        settings_path.display().to_string().bright_white()
    );
    println!(
        "{} Database: {}",
        "✓".green().bold(),
        db_path.display().to_string().bright_white()
    );
    println!();
    Ok(())
}

pub fn handle_plan(args: &ArgMatches) -> Result<()> {
    let settings = Settings::load(&config_dir_arg(args))?;
    let options = resolve_timeline_options(
        &settings,
        args.get_one::<String>("start").map(String::as_str),
        args.get_one::<u32>("gap").copied(),
        args.get_one::<u32>("stay").copied(),
    )?;

    let format_str = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = ReportFormat::from_str(format_str)
        .with_context(|| format!("Unknown report format '{}'", format_str))?;

    let plan = load_plan(args.get_one::<PathBuf>("FILE"))?;
    let content = render_plan(&plan, &options, format)?;

    match args.get_one::<PathBuf>("output") {
        Some(path) => {
            save_report(&content, path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            print_saved(path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

pub fn handle_layout(args: &ArgMatches) -> Result<()> {
    let plan = load_plan(args.get_one::<PathBuf>("FILE"))?;
    let options = LayoutOptions {
        spacing_y: args.get_one::<f64>("spacing").copied().unwrap_or(150.0),
        ..LayoutOptions::default()
    };

    let ordered = order_nodes(&plan.nodes, &plan.edges);
    let layout = layout_route(&ordered, &plan.edges, &options);
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

pub fn handle_zones_list(args: &ArgMatches) -> Result<()> {
    let config_dir = config_dir_arg(args);
    let settings = Settings::load(&config_dir)?;
    let threshold = args
        .get_one::<f64>("threshold")
        .copied()
        .unwrap_or(settings.cluster_threshold);
    let linkage = if args.get_flag("transitive") {
        Linkage::Transitive
    } else {
        Linkage::SeedRadius
    };

    let cities = match args.get_one::<String>("city") {
        Some(city) => vec![city.clone()],
        None => seed_cities()?,
    };

    let db_path = config_dir.join(DATABASE_FILE);
    let db = if Database::exists(&db_path) {
        Some(Database::new(&db_path)?)
    } else {
        warn!("No database at {}, showing bundled zones only", db_path.display());
        None
    };

    for city in cities {
        let zones = match db {
            Some(ref db) => visible_zones(db, &city)?,
            None => seed_zones_for(&city)?,
        };

        print_divider();
        println!(
            "{} {}",
            format!("  {}", city).bright_white().bold(),
            format!("({} zones)", zones.len()).bright_black()
        );
        print_divider();

        if zones.is_empty() {
            println!("  {}", "No zones recorded.".bright_black());
            println!();
            continue;
        }

        for marker in cluster_points_with(zones, threshold, linkage) {
            let line = render_marker(&marker);
            if marker.is_hazardous() {
                println!("  {}", line.red());
            } else {
                println!("  {}", line.green());
            }
        }
        println!();
    }
    Ok(())
}

pub fn handle_zones_submit(args: &ArgMatches) -> Result<()> {
    let level_str = args.get_one::<String>("level").map(String::as_str).unwrap_or("");
    let level = HazardLevel::from_str(level_str)
        .with_context(|| format!("Unknown hazard level '{}'", level_str))?;

    let draft = ZoneDraft {
        city: args.get_one::<String>("city").cloned().unwrap_or_default(),
        name: args.get_one::<String>("name").cloned().unwrap_or_default(),
        level,
        description: args.get_one::<String>("description").cloned().unwrap_or_default(),
        x: args.get_one::<f64>("x").copied().unwrap_or_default(),
        y: args.get_one::<f64>("y").copied().unwrap_or_default(),
    };
    validate_draft(&draft)?;

    let db = open_database(&config_dir_arg(args))?;
    let submission = db.submit(&draft)?;

    println!("{} Submission queued for review", "✓".green().bold());
    println!("  {} {}", "→".blue(), render_submission(&submission));
    Ok(())
}

pub fn handle_zones_pending(args: &ArgMatches) -> Result<()> {
    let db = open_database(&config_dir_arg(args))?;
    let pending = db.pending()?;

    if pending.is_empty() {
        println!("{} No submissions awaiting review", "✓".green().bold());
        return Ok(());
    }

    println!(
        "{} {} submission(s) awaiting review",
        "→".blue(),
        pending.len().to_string().cyan()
    );
    for submission in &pending {
        println!("  {} {}", "•".yellow(), render_submission(submission));
        if !submission.description.is_empty() {
            println!("      {}", submission.description.bright_black());
        }
    }
    Ok(())
}

pub fn handle_zones_approve(args: &ArgMatches) -> Result<()> {
    let id = args.get_one::<String>("id").map(String::as_str).unwrap_or("");
    let db = open_database(&config_dir_arg(args))?;
    let submission = db.approve(id)?;

    println!("{} Approved", "✓".green().bold());
    println!("  {} {}", "→".blue(), render_submission(&submission));
    Ok(())
}

pub fn handle_zones_reject(args: &ArgMatches) -> Result<()> {
    let id = args.get_one::<String>("id").map(String::as_str).unwrap_or("");
    let db = open_database(&config_dir_arg(args))?;
    let submission = db.reject(id)?;

    println!("{} Rejected", "✓".green().bold());
    println!("  {} {}", "→".blue(), render_submission(&submission));
    Ok(())
}

fn read_response(args: &ArgMatches) -> Result<String> {
    let path = args
        .get_one::<PathBuf>("FILE")
        .context("A response file is required")?;
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn handle_risk(args: &ArgMatches) -> Result<()> {
    let analysis: RiskAnalysis =
        parse_ai_json(&read_response(args)?).context("Response did not contain a risk analysis")?;
    print!("{}", generate_risk_report(&analysis));
    Ok(())
}

pub fn handle_menu(args: &ArgMatches) -> Result<()> {
    let analysis: MenuAnalysis =
        parse_ai_json(&read_response(args)?).context("Response did not contain a menu analysis")?;
    print!("{}", generate_menu_report(&analysis));
    Ok(())
}
