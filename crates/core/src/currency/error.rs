//! Exchange rate error types.

use thiserror::Error;

/// Errors from exchange-rate collaborators.
///
/// Soft conditions (unknown currency, stale cache) are handled with
/// documented fallbacks and never surface here; only collaborator
/// unavailability does.
#[derive(Debug, Error)]
pub enum RateError {
    /// The rate store could not be reached or failed.
    #[error("Rate store unavailable: {0}")]
    Store(String),

    /// The currency registry could not be reached or failed.
    #[error("Currency registry unavailable: {0}")]
    Registry(String),
}
