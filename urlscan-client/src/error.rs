use thiserror::Error;

/// Message for a blank URL, shared with the screen's input prompt.
pub const VALIDATION_MESSAGE: &str = "Please enter a URL.";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ScanError {
    /// Builds the error for a non-2xx reply, preferring the service's `detail` text.
    pub fn from_status(status: u16, detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) if !detail.is_empty() => detail.to_string(),
            _ => format!("Request failed ({})", status),
        };
        ScanError::Http { status, message }
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(e: serde_json::Error) -> Self {
        ScanError::MalformedResponse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        assert_eq!(ScanError::Validation.to_string(), VALIDATION_MESSAGE);
    }

    #[test]
    fn test_from_status_uses_detail() {
        let err = ScanError::from_status(500, Some("rate limited"));
        assert_eq!(err.to_string(), "rate limited");
        assert!(matches!(err, ScanError::Http { status: 500, .. }));
    }

    #[test]
    fn test_from_status_without_detail_embeds_code() {
        assert_eq!(
            ScanError::from_status(502, None).to_string(),
            "Request failed (502)"
        );
        assert_eq!(
            ScanError::from_status(404, Some("")).to_string(),
            "Request failed (404)"
        );
    }

    #[test]
    fn test_json_error_is_malformed_response() {
        let err: ScanError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, ScanError::MalformedResponse(_)));
    }
}
