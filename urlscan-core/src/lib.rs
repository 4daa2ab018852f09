pub mod controller;
pub mod interpret;
pub mod report;
pub mod screen;

pub use controller::{ScanController, StateCallback};
pub use interpret::{Interpretation, StatsSummary, VerdictBadge, interpret};
pub use screen::{RawPanel, ResultPanel, Screen, UiState};
