use colored::Colorize;
use commands::command_argument_builder;
use tracing::Level;
use waypost::handlers::*;
use waypost_core::print_banner;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    // Logs go to stderr so reports on stdout can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        Some(("init", primary_command)) => handle_init(primary_command),
        Some(("plan", primary_command)) => handle_plan(primary_command),
        Some(("layout", primary_command)) => handle_layout(primary_command),
        Some(("zones", primary_command)) => match primary_command.subcommand() {
            Some(("list", secondary_command)) => handle_zones_list(secondary_command),
            Some(("submit", secondary_command)) => handle_zones_submit(secondary_command),
            Some(("pending", secondary_command)) => handle_zones_pending(secondary_command),
            Some(("approve", secondary_command)) => handle_zones_approve(secondary_command),
            Some(("reject", secondary_command)) => handle_zones_reject(secondary_command),
            _ => unreachable!("clap should ensure we don't get here"),
        },
        Some(("risk", primary_command)) => handle_risk(primary_command),
        Some(("menu", primary_command)) => handle_menu(primary_command),
        // No subcommand provided, just show the banner
        None => return,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
