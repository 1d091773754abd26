//! pf-hydraulics: hydraulic models for pumpflow.
//!
//! Provides:
//! - Fluid properties with a vapor-pressure correlation
//! - Darcy friction factor solver (Colebrook-White fixed point)
//! - Pipe fitting catalog with equivalent-length tables
//! - Segment head-loss model (Darcy-Weisbach, vectorized over flow)
//! - System curve builder (suction + discharge, degree-5 fit)
//! - NPSH available model
//!
//! All flow values at the curve level are volumetric, in m³/h, matching the
//! catalog polynomials; heads are meters of fluid column. Physical inputs
//! cross the API as `uom` quantities and are reduced to SI floats internally.

pub mod error;
pub mod fittings;
pub mod fluid;
pub mod friction;
pub mod npsh;
pub mod segment;
pub mod system_curve;

// Re-exports for ergonomics
pub use error::{HydroError, HydroResult};
pub use fittings::{EquivalentLengthTable, FITTING_COUNT, Fitting, NominalSize, SIZE_COUNT};
pub use fluid::{ATMOSPHERIC_PRESSURE_PA, FluidProperties};
pub use friction::{FrictionFactorSolver, LAMINAR_RE_LIMIT};
pub use npsh::NpshAvailableModel;
pub use segment::{SegmentGeometry, SegmentLossModel};
pub use system_curve::{SegmentInput, SystemCurve, SystemCurveBuilder};
