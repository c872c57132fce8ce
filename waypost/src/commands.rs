use crate::CLAP_STYLING;
use clap::{arg, command};
use waypost_core::config::DEFAULT_CONFIG_DIR;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("waypost")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("waypost")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Log debug output to stderr").required(false))
        .arg(
            arg!(-c --"config-dir" <DIR>)
                .required(false)
                .global(true)
                .help("Directory holding config.json and the zone database")
                .default_value(DEFAULT_CONFIG_DIR),
        )
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Creates the waypost config directory, settings file and database")
                .arg(
                    arg!(-f - -"force")
                        .help(
                            "Overwrites any existing settings and database in the config \
                        directory.",
                        )
                        .required(false),
                ),
        )
        .subcommand(
            command!("plan")
                .about(
                    "Orders an AI route plan and estimates arrival and departure times. Uses the \
                bundled demo plan when no file is given.",
                )
                .arg(
                    arg!([FILE])
                        .required(false)
                        .help("AI response containing a route plan (JSON, fenced or not)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-s --"start" <HH_MM>)
                        .required(false)
                        .help("Clock time of the first arrival (default: from config, 09:00)"),
                )
                .arg(
                    arg!(--"gap" <MINUTES>)
                        .required(false)
                        .help("Travel minutes assumed between stops with no leg")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--"stay" <MINUTES>)
                        .required(false)
                        .help("Minutes spent at a stop with no readable stay")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("layout")
                .about("Prints node-graph coordinates for a route plan as JSON")
                .arg(
                    arg!([FILE])
                        .required(false)
                        .help("AI response containing a route plan")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"spacing" <PIXELS>)
                        .required(false)
                        .help("Vertical distance between stops")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("150"),
                ),
        )
        .subcommand(
            command!("zones")
                .about("Browse hazard zones and moderate community submissions")
                .subcommand_required(true)
                .subcommand(
                    command!("list")
                        .about("Lists visible zones for a city, clustered for display")
                        .arg(
                            arg!(--"city" <CITY>)
                                .required(false)
                                .help("City to show (default: every bundled city)"),
                        )
                        .arg(
                            arg!(-t --"threshold" <DISTANCE>)
                                .required(false)
                                .help("Merge pins closer than this, in map percent")
                                .value_parser(clap::value_parser!(f64)),
                        )
                        .arg(
                            arg!(--"transitive")
                                .required(false)
                                .help("Chain clusters through neighbours instead of the seed pin only")
                                .action(clap::ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    command!("submit")
                        .about("Queues a community zone for review")
                        .arg(arg!(--"city" <CITY>).required(true).help("City of the zone"))
                        .arg(arg!(-n --"name" <NAME>).required(true).help("Short place name"))
                        .arg(
                            arg!(-l --"level" <LEVEL>)
                                .required(true)
                                .help("red (risk) or green (safe)")
                                .value_parser(["red", "green"]),
                        )
                        .arg(
                            arg!(-x --"x" <X>)
                                .required(true)
                                .help("Horizontal position, percent of map width")
                                .value_parser(clap::value_parser!(f64)),
                        )
                        .arg(
                            arg!(-y --"y" <Y>)
                                .required(true)
                                .help("Vertical position, percent of map height")
                                .value_parser(clap::value_parser!(f64)),
                        )
                        .arg(
                            arg!(-d --"description" <TEXT>)
                                .required(false)
                                .help("What happened there")
                                .default_value(""),
                        ),
                )
                .subcommand(command!("pending").about("Lists submissions awaiting review"))
                .subcommand(
                    command!("approve").about("Approves a pending submission").arg(
                        arg!(--"id" <ID>)
                            .required(true)
                            .help("Submission id"),
                    ),
                )
                .subcommand(
                    command!("reject").about("Rejects a pending submission").arg(
                        arg!(--"id" <ID>)
                            .required(true)
                            .help("Submission id"),
                    ),
                ),
        )
        .subcommand(
            command!("risk")
                .about("Renders an AI risk analysis")
                .arg(
                    arg!(<FILE>)
                        .help("AI response containing a risk analysis")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("menu")
                .about("Renders an AI menu analysis")
                .arg(
                    arg!(<FILE>)
                        .help("AI response containing a menu analysis")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
