use std::time::Duration;
use thiserror::Error;

/// A failure that aborts the current poll cycle. The previously published
/// snapshot stays current and the scheduler retries on the next tick.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("constraint discovery failed: {0}")]
    Discovery(#[source] kube::Error),

    #[error("listing {kind} constraints failed: {source}")]
    Fetch {
        kind: String,
        #[source]
        source: kube::Error,
    },

    #[error("poll cycle did not finish within {0:?}")]
    Timeout(Duration),
}

/// A problem with a single document or violation entry. Logged and skipped,
/// never fatal to the cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    #[error("constraint document has no metadata.name")]
    MissingName,

    #[error("status.totalViolations is not a non-negative number: {0}")]
    BadTotalViolations(String),

    #[error("violation entry {index} has the wrong shape: {reason}")]
    MalformedViolation { index: usize, reason: String },
}
