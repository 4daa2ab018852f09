// Explicit UI state for a single scan form

use crate::interpret::{Interpretation, VerdictBadge};
use urlscan_client::{ScanError, ScanResponse};

pub const STATUS_IDLE: &str = "Idle";
pub const STATUS_BUSY: &str = "Scanning…";
pub const STATUS_DONE: &str = "Completed";
pub const STATUS_ERROR_PREFIX: &str = "Error: ";
pub const PROMPT_ENTER_URL: &str = urlscan_client::error::VALIDATION_MESSAGE;

/// Shown in the method label when the service does not name its source.
pub const SOURCE_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Busy,
    Success(ScanResponse),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPanel {
    pub visible: bool,
    pub badge: Option<VerdictBadge>,
    pub badge_text: String,
    pub method: String,
    pub url_echo: String,
    pub stats: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPanel {
    pub visible: bool,
    pub content: String,
}

/// Everything the rendering layer reads or writes around a scan.
///
/// `url_input`, `wait` and `show_raw` belong to the input surface and are read
/// when a scan is triggered. The remaining fields are written by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub url_input: String,
    pub wait: bool,
    pub show_raw: bool,

    pub state: UiState,
    pub trigger_enabled: bool,
    pub input_focused: bool,
    /// Blocking message for the user (input validation).
    pub prompt: Option<String>,
    pub status: String,
    pub result: ResultPanel,
    pub raw: RawPanel,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            url_input: String::new(),
            wait: false,
            show_raw: false,
            state: UiState::Idle,
            trigger_enabled: true,
            input_focused: false,
            prompt: None,
            status: STATUS_IDLE.to_string(),
            result: ResultPanel::default(),
            raw: RawPanel::default(),
        }
    }
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url_input = url.into();
        self
    }

    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_show_raw(mut self, show_raw: bool) -> Self {
        self.show_raw = show_raw;
        self
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, UiState::Busy)
    }

    /// Flips the raw toggle outside of a scan. The panel only has something to
    /// show after a successful scan.
    pub fn set_show_raw(&mut self, show_raw: bool) {
        self.show_raw = show_raw;
        self.raw.visible = show_raw && matches!(self.state, UiState::Success(_));
    }

    pub fn reject_input(&mut self, err: &ScanError) {
        self.prompt = Some(err.to_string());
        self.input_focused = true;
    }

    pub fn enter_busy(&mut self) {
        self.state = UiState::Busy;
        self.trigger_enabled = false;
        self.input_focused = false;
        self.prompt = None;
        self.status = STATUS_BUSY.to_string();
        self.result.visible = false;
        self.raw.visible = false;
    }

    pub fn apply_success(
        &mut self,
        typed_url: &str,
        response: ScanResponse,
        interpretation: Interpretation,
    ) {
        self.result = ResultPanel {
            visible: true,
            badge: Some(interpretation.badge),
            badge_text: interpretation.label,
            method: response
                .source
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| SOURCE_PLACEHOLDER.to_string()),
            url_echo: response
                .url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| typed_url.to_string()),
            stats: interpretation.stats.to_string(),
        };

        // Filled either way so a later toggle has something to show.
        self.raw = RawPanel {
            visible: self.show_raw,
            content: response.to_pretty_json(),
        };

        self.status = STATUS_DONE.to_string();
        self.state = UiState::Success(response);
    }

    pub fn apply_failure(&mut self, err: &ScanError) {
        let message = err.to_string();
        self.result.visible = false;
        self.status = format!("{}{}", STATUS_ERROR_PREFIX, message);
        self.state = UiState::Failure(message);
    }

    /// Re-enables the trigger. Leaves the terminal status message in place.
    pub fn release(&mut self) {
        self.trigger_enabled = true;
        if self.is_busy() {
            self.state = UiState::Idle;
            self.status = STATUS_IDLE.to_string();
        }
    }
}
