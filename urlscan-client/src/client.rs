use crate::error::{Result, ScanError};
use crate::response::{HealthStatus, ScanResponse, detail_message};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

pub const SCAN_PATH: &str = "/urlvalidator/scan";
pub const HEALTH_PATH: &str = "/urlvalidator/health";

const DEFAULT_USER_AGENT: &str = concat!("urlscan/", env!("CARGO_PKG_VERSION"));

/// Body of a scan submission. Built fresh for every scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub url: String,
    pub wait: bool,
}

impl ScanRequest {
    /// Trims `url`; an empty result is a validation error.
    pub fn new(url: &str, wait: bool) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScanError::Validation);
        }
        Ok(Self {
            url: url.to_string(),
            wait,
        })
    }
}

pub struct ScanClient {
    client: Client,
    scan_endpoint: Url,
    health_endpoint: Url,
}

impl ScanClient {
    /// `base_api` is resolved against `origin`: empty means same origin, a path
    /// is mounted under the origin and an absolute URL replaces it.
    pub fn new(origin: &str, base_api: &str) -> Result<Self> {
        Self::with_user_agent(origin, base_api, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(origin: &str, base_api: &str, user_agent: &str) -> Result<Self> {
        // No request timeout: the transport decides when a scan gives up.
        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            scan_endpoint: resolve_endpoint(origin, base_api, SCAN_PATH)?,
            health_endpoint: resolve_endpoint(origin, base_api, HEALTH_PATH)?,
        })
    }

    pub fn scan_endpoint(&self) -> &Url {
        &self.scan_endpoint
    }

    pub fn health_endpoint(&self) -> &Url {
        &self.health_endpoint
    }

    /// Submits one scan. The body is read as JSON whatever the status, so a
    /// non-2xx reply can contribute its `detail` text to the error.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanResponse> {
        info!("Submitting {} (wait={})", request.url, request.wait);
        debug!("POST {}", self.scan_endpoint);

        let response = self
            .client
            .post(self.scan_endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Scan reply {} ({} bytes)", status, body.len());

        let value: Value = serde_json::from_slice(&body)?;
        if !status.is_success() {
            let err = ScanError::from_status(status.as_u16(), detail_message(&value).as_deref());
            warn!("Scan of {} rejected: {}", request.url, err);
            return Err(err);
        }

        let parsed = ScanResponse::from_value(value)?;
        info!(
            "Scan of {} finished: {}",
            request.url,
            parsed.result.as_deref().unwrap_or("unknown")
        );
        Ok(parsed)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        debug!("GET {}", self.health_endpoint);
        let response = self.client.get(self.health_endpoint.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|v| detail_message(&v));
            return Err(ScanError::from_status(status.as_u16(), detail.as_deref()));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

pub fn resolve_endpoint(origin: &str, base_api: &str, path: &str) -> Result<Url> {
    let origin_url = Url::parse(origin)
        .map_err(|e| ScanError::InvalidUrl(format!("origin '{}': {}", origin, e)))?;

    let base = base_api.trim().trim_end_matches('/');
    let target = format!("{}{}", base, path);
    origin_url
        .join(&target)
        .map_err(|e| ScanError::InvalidUrl(format!("'{}': {}", target, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    #[test]
    fn test_request_trims_url() {
        let request = ScanRequest::new("  http://example.com \n", true).unwrap();
        assert_eq!(request.url, "http://example.com");
        assert!(request.wait);
    }

    #[test]
    fn test_request_rejects_blank_url() {
        assert!(matches!(
            ScanRequest::new("", false),
            Err(ScanError::Validation)
        ));
        assert!(matches!(
            ScanRequest::new(" \t ", false),
            Err(ScanError::Validation)
        ));
    }

    #[test]
    fn test_resolve_endpoint_same_origin() {
        let url = resolve_endpoint("http://localhost:8000", "", SCAN_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/urlvalidator/scan");
    }

    #[test]
    fn test_resolve_endpoint_path_prefix() {
        let url = resolve_endpoint("http://localhost:8000", "/api/", SCAN_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/urlvalidator/scan");
    }

    #[test]
    fn test_resolve_endpoint_absolute_base() {
        let url = resolve_endpoint(
            "http://localhost:8000",
            "https://scan.example.org/v1",
            HEALTH_PATH,
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://scan.example.org/v1/urlvalidator/health");
    }

    #[test]
    fn test_resolve_endpoint_bad_origin() {
        assert!(matches!(
            resolve_endpoint("not a url", "", SCAN_PATH),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_scan_posts_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/urlvalidator/scan"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"url": "http://example.com", "wait": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": "정상",
                "source": "vt",
                "url": "http://example.com",
                "details": {"data": {"attributes": {"stats": {"harmless": 70}}}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScanClient::new(&mock_server.uri(), "").unwrap();
        let request = ScanRequest::new("http://example.com", false).unwrap();
        let response = client.scan(&request).await.unwrap();

        assert_eq!(response.result.as_deref(), Some("정상"));
        assert_eq!(response.stats().unwrap().harmless, 70);
    }

    #[tokio::test]
    async fn test_scan_error_uses_detail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/urlvalidator/scan"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"detail": "rate limited"})),
            )
            .mount(&mock_server)
            .await;

        let client = ScanClient::new(&mock_server.uri(), "").unwrap();
        let request = ScanRequest::new("http://example.com", true).unwrap();

        match client.scan(&request).await {
            Err(ScanError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scan_error_without_detail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/urlvalidator/scan"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let client = ScanClient::new(&mock_server.uri(), "").unwrap();
        let request = ScanRequest::new("http://example.com", false).unwrap();
        let err = client.scan(&request).await.unwrap_err();

        assert_eq!(err.to_string(), "Request failed (403)");
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/urlvalidator/scan"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let client = ScanClient::new(&mock_server.uri(), "").unwrap();
        let request = ScanRequest::new("http://example.com", false).unwrap();

        assert!(matches!(
            client.scan(&request).await,
            Err(ScanError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_base_api_prefix_is_used() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/urlvalidator/scan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "주의"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScanClient::new(&mock_server.uri(), "/api").unwrap();
        let request = ScanRequest::new("example.com", false).unwrap();
        let response = client.scan(&request).await.unwrap();

        assert_eq!(response.result.as_deref(), Some("주의"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Nothing listens on port 1.
        let client = ScanClient::new("http://127.0.0.1:1", "").unwrap();
        let request = ScanRequest::new("http://example.com", false).unwrap();

        assert!(matches!(
            client.scan(&request).await,
            Err(ScanError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_health() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/urlvalidator/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"urlvalidator": true})))
            .mount(&mock_server)
            .await;

        let client = ScanClient::new(&mock_server.uri(), "").unwrap();
        assert!(client.health().await.unwrap().urlvalidator);
    }

    #[tokio::test]
    async fn test_health_failure_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/urlvalidator/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = ScanClient::new(&mock_server.uri(), "").unwrap();
        assert!(matches!(
            client.health().await,
            Err(ScanError::Http { status: 503, .. })
        ));
    }
}
