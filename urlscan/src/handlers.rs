use crate::config::Settings;
use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use urlscan_client::{HealthStatus, ScanClient};
use urlscan_core::report::{ReportFormat, render, render_text};
use urlscan_core::{ScanController, Screen, StateCallback, UiState};

pub fn print_banner() {
    println!("{}", "═".repeat(60).bright_blue().bold());
    println!(
        "{}  {}",
        "  URLSCAN".bright_white().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", "═".repeat(60).bright_blue().bold());
    println!();
}

pub fn build_client(settings: &Settings) -> Result<ScanClient> {
    let client = match settings.user_agent {
        Some(ref user_agent) => {
            ScanClient::with_user_agent(&settings.origin, &settings.base_api, user_agent)
        }
        None => ScanClient::new(&settings.origin, &settings.base_api),
    }
    .context("Invalid service address")?;
    info!("Scan endpoint: {}", client.scan_endpoint());
    Ok(client)
}

pub fn build_controller(settings: &Settings, show_progress: bool) -> Result<ScanController> {
    let controller = ScanController::new(build_client(settings)?);
    Ok(if show_progress {
        controller.with_state_callback(spinner_callback())
    } else {
        controller
    })
}

/// Shows a spinner carrying the status text while a scan is busy.
pub fn spinner_callback() -> StateCallback {
    let current: Mutex<Option<ProgressBar>> = Mutex::new(None);

    Arc::new(move |screen: &Screen| {
        let Ok(mut current) = current.lock() else {
            return;
        };
        if screen.is_busy() {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                pb.set_style(style);
            }
            pb.set_message(screen.status.clone());
            pb.enable_steady_tick(Duration::from_millis(100));
            *current = Some(pb);
        } else if let Some(pb) = current.take() {
            pb.finish_and_clear();
        }
    })
}

/// Runs one scan for `url` and returns the settled screen.
pub async fn run_scan(
    settings: &Settings,
    url: &str,
    wait: bool,
    show_raw: bool,
    show_progress: bool,
) -> Result<Screen> {
    let controller = build_controller(settings, show_progress)?;
    let screen = Screen::new()
        .with_url(url)
        .with_wait(wait)
        .with_show_raw(show_raw);
    Ok(controller.perform_scan(screen).await)
}

pub async fn check_health(settings: &Settings) -> Result<HealthStatus> {
    let client = build_client(settings)?;
    client
        .health()
        .await
        .with_context(|| format!("Health check against {} failed", client.health_endpoint()))
}

/// Returns whether the scan reached a verdict.
pub async fn handle_scan(args: &ArgMatches, settings: &Settings, quiet: bool) -> Result<bool> {
    let url = args.get_one::<String>("URL").map(String::as_str).unwrap_or("");
    let wait = args.get_flag("wait");
    let show_raw = args.get_flag("raw");
    let format = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);

    let screen = run_scan(settings, url, wait, show_raw, !quiet).await?;

    let output = render(&screen, format);
    let mut stdout = io::stdout();
    write!(stdout, "{}", output)?;
    if !output.ends_with('\n') {
        writeln!(stdout)?;
    }

    Ok(matches!(screen.state, UiState::Success(_)))
}

pub async fn handle_health(settings: &Settings) -> Result<bool> {
    let status = check_health(settings).await?;
    if status.urlvalidator {
        println!("{} urlvalidator is up", "✓".green().bold());
    } else {
        println!("{} urlvalidator reported unhealthy", "✗".red().bold());
    }
    Ok(status.urlvalidator)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    /// A line of input: becomes the URL field and triggers a scan.
    Submit(String),
    ToggleWait,
    ToggleRaw,
    Help,
    Quit,
}

pub fn parse_interactive_line(line: &str) -> InteractiveCommand {
    match line.trim() {
        ":wait" | ":w" => InteractiveCommand::ToggleWait,
        ":raw" | ":r" => InteractiveCommand::ToggleRaw,
        ":help" | ":h" | "?" => InteractiveCommand::Help,
        ":quit" | ":q" | "exit" | "quit" => InteractiveCommand::Quit,
        _ => InteractiveCommand::Submit(line.to_string()),
    }
}

fn print_interactive_help() {
    println!("{}", "Type a URL and press Enter to scan it.".bright_white());
    println!("  {}  toggle 'wait for full result'", ":wait".cyan());
    println!("  {}   toggle 'show raw response'", ":raw".cyan());
    println!("  {}  quit", ":quit".cyan());
    println!();
}

fn print_toggles(screen: &Screen) {
    println!(
        "{} wait={} raw={}",
        "→".blue(),
        screen.wait.to_string().bright_white(),
        screen.show_raw.to_string().bright_white()
    );
}

pub async fn handle_interactive(
    args: &ArgMatches,
    settings: &Settings,
    quiet: bool,
) -> Result<bool> {
    let controller = build_controller(settings, !quiet)?;
    let mut screen = Screen::new()
        .with_wait(args.get_flag("wait"))
        .with_show_raw(args.get_flag("raw"));

    print_interactive_help();
    print_toggles(&screen);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "url>".bright_cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_interactive_line(&line) {
            InteractiveCommand::Quit => break,
            InteractiveCommand::Help => print_interactive_help(),
            InteractiveCommand::ToggleWait => {
                screen.wait = !screen.wait;
                print_toggles(&screen);
            }
            InteractiveCommand::ToggleRaw => {
                screen.set_show_raw(!screen.show_raw);
                print_toggles(&screen);
                if screen.raw.visible {
                    println!("{}", screen.raw.content);
                }
            }
            InteractiveCommand::Submit(text) => {
                screen.url_input = text;
                screen.prompt = None;
                screen = controller.perform_scan(screen).await;
                print!("{}", render_text(&screen));
                println!();
            }
        }
    }

    Ok(true)
}
