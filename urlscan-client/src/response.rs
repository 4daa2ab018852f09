use crate::error::{Result, ScanError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Payload returned by `POST /urlvalidator/scan`.
///
/// Every field is optional on the wire. The parsed document is kept alongside
/// the typed view so it can be shown verbatim in the raw panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScanResponse {
    pub result: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub details: Option<Details>,
    #[serde(skip)]
    raw: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub data: Option<AnalysisData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisData {
    pub attributes: Option<AnalysisAttributes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisAttributes {
    pub stats: Option<EngineStats>,
    /// Analysis status reported by the upstream engine ("queued", "completed").
    pub status: Option<String>,
}

/// Per-category engine counters. Missing or `null` counters read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineStats {
    #[serde(deserialize_with = "null_as_zero")]
    pub malicious: i64,
    #[serde(deserialize_with = "null_as_zero")]
    pub suspicious: i64,
    #[serde(deserialize_with = "null_as_zero")]
    pub harmless: i64,
    #[serde(deserialize_with = "null_as_zero")]
    pub undetected: i64,
    #[serde(deserialize_with = "null_as_zero")]
    pub timeout: i64,
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET /urlvalidator/health`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub urlvalidator: bool,
}

impl ScanResponse {
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ScanError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        let mut response: ScanResponse = serde_json::from_value(value.clone())?;
        response.raw = value;
        Ok(response)
    }

    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Self::from_value(serde_json::from_slice(body)?)
    }

    /// The `details.data.attributes` record, or a malformed-response error when
    /// any link of that chain is missing.
    pub fn attributes(&self) -> Result<&AnalysisAttributes> {
        let details = self
            .details
            .as_ref()
            .ok_or_else(|| missing("details"))?;
        let data = details.data.as_ref().ok_or_else(|| missing("details.data"))?;
        data.attributes
            .as_ref()
            .ok_or_else(|| missing("details.data.attributes"))
    }

    pub fn stats(&self) -> Option<&EngineStats> {
        self.details
            .as_ref()?
            .data
            .as_ref()?
            .attributes
            .as_ref()?
            .stats
            .as_ref()
    }

    /// The full payload as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

/// Extracts a human readable message from an error body's `detail` field.
pub fn detail_message(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn missing(path: &str) -> ScanError {
    ScanError::MalformedResponse(format!("missing `{}` in response", path))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
