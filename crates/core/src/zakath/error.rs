//! Zakath engine error types.

use thiserror::Error;

use crate::currency::RateError;

/// Errors surfaced by the calculation engine.
///
/// Expected absences (no madhab rule, no Hijri conversion, unknown
/// currency, zero records) resolve to documented fallbacks and never
/// appear here. Only collaborator unavailability is fatal to a request;
/// retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum ZakathError {
    /// The record reader or calculation store could not be reached.
    #[error("Storage unavailable: {0}")]
    Storage(String),

    /// An exchange-rate collaborator failed.
    #[error(transparent)]
    Rate(#[from] RateError),
}
