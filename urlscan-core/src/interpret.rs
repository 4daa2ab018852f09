// Verdict classification and stats normalization for scan responses

use serde::{Deserialize, Serialize};
use std::fmt;
use urlscan_client::{EngineStats, ScanResponse};

/// Verdict codes emitted by the urlvalidator service.
pub const VERDICT_MALICIOUS: &str = "악성";
pub const VERDICT_CAUTION: &str = "주의";
pub const VERDICT_BENIGN: &str = "정상";

/// Badge text used when the service sent no verdict.
pub const UNKNOWN_LABEL: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictBadge {
    Malicious,
    Caution,
    Benign,
    Unknown,
}

impl VerdictBadge {
    /// Total mapping: anything outside the service vocabulary is `Unknown`.
    pub fn from_verdict(verdict: Option<&str>) -> Self {
        match verdict {
            Some(VERDICT_MALICIOUS) => VerdictBadge::Malicious,
            Some(VERDICT_CAUTION) => VerdictBadge::Caution,
            Some(VERDICT_BENIGN) => VerdictBadge::Benign,
            _ => VerdictBadge::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictBadge::Malicious => "malicious",
            VerdictBadge::Caution => "caution",
            VerdictBadge::Benign => "benign",
            VerdictBadge::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VerdictBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub malicious: i64,
    pub suspicious: i64,
    pub harmless: i64,
    pub undetected: i64,
    pub timeout: i64,
}

impl From<&EngineStats> for StatsSummary {
    fn from(stats: &EngineStats) -> Self {
        Self {
            malicious: stats.malicious,
            suspicious: stats.suspicious,
            harmless: stats.harmless,
            undetected: stats.undetected,
            timeout: stats.timeout,
        }
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malicious={}, suspicious={}, harmless={}, undetected={}, timeout={}",
            self.malicious, self.suspicious, self.harmless, self.undetected, self.timeout
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub badge: VerdictBadge,
    /// Text shown inside the badge: the verdict as sent, or "unknown".
    pub label: String,
    pub stats: StatsSummary,
}

pub fn interpret(response: &ScanResponse) -> Interpretation {
    let verdict = response.result.as_deref().filter(|v| !v.is_empty());

    Interpretation {
        badge: VerdictBadge::from_verdict(verdict),
        label: verdict.unwrap_or(UNKNOWN_LABEL).to_string(),
        stats: response.stats().map(StatsSummary::from).unwrap_or_default(),
    }
}
