// Terminal rendering of a settled scan screen

use crate::interpret::{StatsSummary, VerdictBadge, interpret};
use crate::screen::{Screen, UiState};
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Machine readable record of a successful scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub url: String,
    pub verdict: String,
    pub badge: VerdictBadge,
    pub source: String,
    pub stats: StatsSummary,
}

impl ScanSummary {
    pub fn from_screen(screen: &Screen) -> Option<Self> {
        let UiState::Success(ref response) = screen.state else {
            return None;
        };
        let interpretation = interpret(response);
        Some(Self {
            url: screen.result.url_echo.clone(),
            verdict: interpretation.label,
            badge: interpretation.badge,
            source: screen.result.method.clone(),
            stats: interpretation.stats,
        })
    }
}

fn paint_badge(badge: VerdictBadge, text: &str) -> ColoredString {
    match badge {
        VerdictBadge::Malicious => text.red().bold(),
        VerdictBadge::Caution => text.yellow().bold(),
        VerdictBadge::Benign => text.green().bold(),
        VerdictBadge::Unknown => text.dimmed(),
    }
}

fn paint_status(screen: &Screen) -> ColoredString {
    match screen.state {
        UiState::Success(_) => screen.status.green(),
        UiState::Failure(_) => screen.status.red(),
        _ => screen.status.normal(),
    }
}

/// Renders the visible parts of `screen` as terminal text.
pub fn render_text(screen: &Screen) -> String {
    let mut out = String::new();

    if let Some(ref prompt) = screen.prompt {
        out.push_str(&format!("{} {}\n", "!".yellow().bold(), prompt));
        return out;
    }

    out.push_str(&format!("{} {}\n", "Status:".bright_blue(), paint_status(screen)));

    if screen.result.visible {
        let badge = screen.result.badge.unwrap_or(VerdictBadge::Unknown);
        out.push('\n');
        out.push_str(&format!(
            "  {:<9} [{}] {}\n",
            "Verdict:",
            paint_badge(badge, &screen.result.badge_text),
            badge.as_str().dimmed()
        ));
        out.push_str(&format!("  {:<9} {}\n", "Method:", screen.result.method));
        out.push_str(&format!("  {:<9} {}\n", "URL:", screen.result.url_echo));
        out.push_str(&format!("  {:<9} {}\n", "Stats:", screen.result.stats));
    }

    if screen.raw.visible {
        out.push('\n');
        out.push_str(&format!("{}\n", "Raw response:".bright_blue()));
        out.push_str(&screen.raw.content);
        out.push('\n');
    }

    out
}

/// Renders `screen` as JSON: the summary record, or the payload itself when the
/// raw panel is shown. Failures render as `{"error": ...}`.
pub fn render_json(screen: &Screen) -> String {
    let value = match &screen.state {
        UiState::Success(response) if screen.raw.visible => response.raw().clone(),
        UiState::Success(_) => ScanSummary::from_screen(screen)
            .and_then(|summary| serde_json::to_value(summary).ok())
            .unwrap_or_default(),
        UiState::Failure(message) => serde_json::json!({ "error": message }),
        _ => match screen.prompt {
            Some(ref prompt) => serde_json::json!({ "error": prompt }),
            None => serde_json::json!({ "status": screen.status }),
        },
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

pub fn render(screen: &Screen, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => render_text(screen),
        ReportFormat::Json => render_json(screen),
    }
}
