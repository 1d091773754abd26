//! Hydraulic model errors.

use pf_core::CoreError;
use thiserror::Error;

/// Result type for hydraulic computations.
pub type HydroResult<T> = Result<T, HydroError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydroError {
    /// Friction-factor fixed-point iteration exhausted its budget. Fatal to
    /// the enclosing head-loss computation; never replaced by a stale value.
    #[error("Friction factor failed to converge after {iterations} iterations (Re = {re:.3e})")]
    ConvergenceFailed { iterations: usize, re: f64 },

    /// Lookup on a nominal size label that is not in the size table.
    #[error("Unknown nominal pipe size: {label:?}")]
    UnknownSize { label: String },

    /// Precondition violation (non-positive target flow, bad geometry, ...).
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}
