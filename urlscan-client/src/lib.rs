pub mod client;
pub mod error;
pub mod response;

pub use client::{ScanClient, ScanRequest};
pub use error::ScanError;
pub use response::{EngineStats, HealthStatus, ScanResponse};
