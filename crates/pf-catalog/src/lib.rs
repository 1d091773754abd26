//! pf-catalog: pump performance catalog for pumpflow.
//!
//! Read-only store of externally digitized pump curves. Each record carries
//! four degree-5 polynomials (head, efficiency, NPSHr, power) over flow in
//! m³/h, a hard operating range and a best-efficiency-point window used to
//! pre-filter candidates.

pub mod error;
pub mod record;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use record::PumpCurveRecord;
pub use store::{CatalogQuery, CatalogStore, InMemoryCatalog};
