use clap::ArgMatches;
use commands::command_argument_builder;
use tracing_subscriber::filter::LevelFilter;
use urlscan::config::load_settings;
use urlscan::handlers::{handle_health, handle_interactive, handle_scan, print_banner};

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_tracing(chosen_command.get_flag("verbose"));

    let settings = match settings_from_args(&chosen_command) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    };

    let outcome = match chosen_command.subcommand() {
        Some(("scan", primary_command)) => handle_scan(primary_command, &settings, quiet).await,
        Some(("health", _)) => handle_health(&settings).await,
        Some(("interactive", primary_command)) => {
            if !quiet {
                print_banner();
            }
            handle_interactive(primary_command, &settings, quiet).await
        }
        _ => unreachable!("clap should ensure we don't get here"),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn settings_from_args(args: &ArgMatches) -> anyhow::Result<urlscan::Settings> {
    load_settings(
        args.get_one::<String>("config").map(String::as_str),
        args.get_one::<String>("origin").map(String::as_str),
        args.get_one::<String>("base-api").map(String::as_str),
    )
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
