use thiserror::Error;

use super::model::PeakLabel;

/// Domain failures raised while building the displayed window.
///
/// I/O and parse failures travel as `anyhow` errors with context; these are
/// the cases a caller may want to match on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("lead '{lead}' not found in signal table (available: {})", available.join(", "))]
    LeadNotFound { lead: String, available: Vec<String> },

    #[error("{label} peak index {index} is out of range for a signal of {len} samples")]
    PeakIndexOutOfRange {
        label: PeakLabel,
        index: usize,
        len: usize,
    },
}
