//! pf-core: stable foundation for pumpflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - poly (fixed degree-5 polynomial: eval, least-squares fit, roots)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod poly;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use poly::{QUINTIC_COEFF_COUNT, Quintic};
pub use units::*;
