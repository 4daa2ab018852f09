use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("urlscan")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("urlscan")
        .about("Submit URLs to the urlvalidator service and show the verdict")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(arg!(-v --"verbose" "Log requests and state transitions to stderr").required(false))
        .arg(
            arg!(-c --"config" <PATH>)
                .required(false)
                .global(true)
                .help("Settings file (default: ~/.config/urlscan/config.toml)"),
        )
        .arg(
            arg!(--"origin" <URL>)
                .required(false)
                .global(true)
                .help("Origin the base API is resolved against [env: URLSCAN_ORIGIN]"),
        )
        .arg(
            arg!(--"base-api" <PREFIX>)
                .required(false)
                .global(true)
                .help("Prefix for /urlvalidator endpoints; empty means same origin [env: URLSCAN_BASE_API]"),
        )
        .subcommand_required(true)
        .subcommand(
            command!("scan")
                .about("Scan a single URL and print the verdict")
                .arg(arg!(<URL>).help("The URL to submit"))
                .arg(
                    arg!(-w --"wait")
                        .required(false)
                        .help("Ask the service to wait for the full analysis")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-r --"raw")
                        .required(false)
                        .help("Show the raw response payload")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(command!("health").about("Check that the urlvalidator service is up"))
        .subcommand(
            command!("interactive")
                .about("Prompt for URLs and scan each one on Enter")
                .arg(
                    arg!(-w --"wait")
                        .required(false)
                        .help("Start with 'wait for full result' enabled")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-r --"raw")
                        .required(false)
                        .help("Start with 'show raw response' enabled")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
