use crate::interpret::{Interpretation, interpret};
use crate::screen::Screen;
use std::sync::Arc;
use tracing::{debug, warn};
use urlscan_client::error::Result;
use urlscan_client::{ScanClient, ScanRequest, ScanResponse};

/// Called with the screen after every visible transition (busy, settled, rejected).
pub type StateCallback = Arc<dyn Fn(&Screen) + Send + Sync>;

/// Drives one scan from trigger to settled screen.
pub struct ScanController {
    client: ScanClient,
    state_callback: Option<StateCallback>,
}

impl ScanController {
    pub fn new(client: ScanClient) -> Self {
        Self {
            client,
            state_callback: None,
        }
    }

    pub fn with_state_callback(mut self, callback: StateCallback) -> Self {
        self.state_callback = Some(callback);
        self
    }

    pub fn client(&self) -> &ScanClient {
        &self.client
    }

    /// Runs a scan for the URL currently typed into `screen`.
    ///
    /// A blank input is rejected without touching the busy state. Otherwise the
    /// screen goes busy, exactly one request is sent, and the outcome is applied.
    /// Every path that went busy hands back a screen with the trigger enabled.
    pub async fn perform_scan(&self, mut screen: Screen) -> Screen {
        let request = match ScanRequest::new(&screen.url_input, screen.wait) {
            Ok(request) => request,
            Err(e) => {
                debug!("Scan rejected: {}", e);
                screen.reject_input(&e);
                self.notify(&screen);
                return screen;
            }
        };

        screen.enter_busy();
        self.notify(&screen);

        match self.run(&request).await {
            Ok((response, interpretation)) => {
                debug!("Scan of {} settled as {}", request.url, interpretation.badge);
                screen.apply_success(&request.url, response, interpretation);
            }
            Err(e) => {
                warn!("Scan of {} failed: {}", request.url, e);
                screen.apply_failure(&e);
            }
        }

        screen.release();
        self.notify(&screen);
        screen
    }

    async fn run(&self, request: &ScanRequest) -> Result<(ScanResponse, Interpretation)> {
        let response = self.client.scan(request).await?;
        // The stats live under details.data.attributes; a reply without that
        // chain is not a scan result.
        response.attributes()?;
        let interpretation = interpret(&response);
        Ok((response, interpretation))
    }

    fn notify(&self, screen: &Screen) {
        if let Some(ref callback) = self.state_callback {
            callback(screen);
        }
    }
}
