//! pf-match: pump curve matching for pumpflow.
//!
//! Transforms a system curve for N identical pumps in parallel and finds
//! NPSH-safe operating points against a pump catalog.

pub mod error;
pub mod matcher;
pub mod parallel;

pub use error::{MatchError, MatchResult};
pub use matcher::{CatalogMatcher, IMAG_ROOT_TOL, MatchOutcome, OperatingPoint};
pub use parallel::per_pump_curve;
