//! Catalog intersection matcher.

use crate::error::{MatchError, MatchResult};
use pf_catalog::{CatalogQuery, PumpCurveRecord};
use pf_core::Quintic;
use pf_hydraulics::{FluidProperties, NpshAvailableModel, SystemCurve};
use rayon::prelude::*;

/// Roots with |imaginary part| below this are treated as real.
pub const IMAG_ROOT_TOL: f64 = 1e-6;

/// One feasible operating point for a catalog pump.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingPoint {
    pub brand: String,
    pub model: String,
    pub impeller_diameter_mm: f64,
    pub speed_rpm: u32,
    pub stages: u32,

    /// Per-pump flow at the intersection, m³/h
    pub flow_m3h: f64,
    /// Head at the intersection, m (evaluated from the system curve)
    pub head_m: f64,
    pub efficiency_pct: f64,
    pub npshr_m: f64,
    pub power_kw: f64,
    pub npsh_available_m: f64,
    /// available - required; positive for every emitted point
    pub npsh_margin_m: f64,
}

/// Outcome of a catalog match.
///
/// `NoCandidates` (the store had nothing in the BEP window) is distinct from
/// `NoSafeIntersection` (candidates existed but none produced a valid,
/// NPSH-safe intersection).
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    NoCandidates,
    NoSafeIntersection,
    Matches(Vec<OperatingPoint>),
}

/// Matches a (possibly parallel-transformed) system curve against catalog
/// pump curves.
#[derive(Debug, Clone, Copy)]
pub struct CatalogMatcher {
    npsh: NpshAvailableModel,
    imag_tol: f64,
}

impl Default for CatalogMatcher {
    fn default() -> Self {
        Self {
            npsh: NpshAvailableModel::default(),
            imag_tol: IMAG_ROOT_TOL,
        }
    }
}

impl CatalogMatcher {
    pub fn new(npsh: NpshAvailableModel, imag_tol: f64) -> Self {
        Self { npsh, imag_tol }
    }

    /// Find one best operating point per candidate pump.
    ///
    /// `per_pump` is the system curve over per-pump flow (see
    /// [`crate::per_pump_curve`]); `system` supplies the suction scalars for
    /// NPSH; `target_flow_per_pump` is the design flow each unit should carry.
    /// Candidates are evaluated independently and in parallel.
    pub fn match_pumps(
        &self,
        per_pump: &Quintic,
        system: &SystemCurve,
        fluid: &FluidProperties,
        target_flow_per_pump: f64,
        store: &(impl CatalogQuery + Sync),
    ) -> MatchResult<MatchOutcome> {
        if !target_flow_per_pump.is_finite() || target_flow_per_pump <= 0.0 {
            return Err(MatchError::InvalidArg {
                what: "target flow per pump must be positive",
            });
        }

        let candidates = store.candidates_for(target_flow_per_pump);
        if candidates.is_empty() {
            tracing::debug!(target_flow_per_pump, "no catalog candidates in BEP window");
            return Ok(MatchOutcome::NoCandidates);
        }

        let evaluated: Vec<Option<OperatingPoint>> = candidates
            .par_iter()
            .map(|record| self.evaluate_entry(per_pump, system, fluid, target_flow_per_pump, record))
            .collect::<MatchResult<_>>()?;

        let mut points: Vec<OperatingPoint> = evaluated.into_iter().flatten().collect();
        if points.is_empty() {
            return Ok(MatchOutcome::NoSafeIntersection);
        }

        // Best efficiency first; model name breaks exact ties
        points.sort_by(|a, b| {
            b.efficiency_pct
                .total_cmp(&a.efficiency_pct)
                .then_with(|| a.model.cmp(&b.model))
        });
        Ok(MatchOutcome::Matches(points))
    }

    /// Evaluate one catalog entry; `None` when it has no valid, NPSH-safe
    /// intersection (data, not an error).
    fn evaluate_entry(
        &self,
        per_pump: &Quintic,
        system: &SystemCurve,
        fluid: &FluidProperties,
        target_flow_per_pump: f64,
        record: &PumpCurveRecord,
    ) -> MatchResult<Option<OperatingPoint>> {
        let difference = per_pump.sub(&record.head);

        // Intersections must satisfy both the hard envelope and the BEP window
        let lo = record.flow_min_m3h.max(record.bep_window_min_m3h);
        let hi = record.flow_max_m3h.min(record.bep_window_max_m3h);
        if lo > hi {
            return Ok(None);
        }

        let roots = difference.real_roots_within(lo, hi, self.imag_tol);
        // Deterministic tie-break: the intersection closest to the requested flow
        let Some(flow) = roots
            .into_iter()
            .min_by(|a, b| {
                (a - target_flow_per_pump)
                    .abs()
                    .total_cmp(&(b - target_flow_per_pump).abs())
            })
        else {
            tracing::debug!(model = %record.model, "no intersection in validity window");
            return Ok(None);
        };

        let head = per_pump.eval(flow);
        let efficiency = record.efficiency.eval(flow);
        let npshr = record.npshr.eval(flow);
        let power = record.power.eval(flow);

        // Static head is positive when the supply sits above the pump, the
        // opposite sign of the suction segment's elevation.
        let npsh_available = self.npsh.available_at(
            -system.suction_static_head_m(),
            system.suction_friction_loss_m(),
            fluid,
            target_flow_per_pump,
            flow,
        )?;

        if npshr >= npsh_available {
            tracing::debug!(
                model = %record.model,
                npshr,
                npsh_available,
                "rejected: insufficient NPSH margin"
            );
            return Ok(None);
        }

        Ok(Some(OperatingPoint {
            brand: record.brand.clone(),
            model: record.model.clone(),
            impeller_diameter_mm: record.impeller_diameter_mm,
            speed_rpm: record.speed_rpm,
            stages: record.stages,
            flow_m3h: flow,
            head_m: head,
            efficiency_pct: efficiency,
            npshr_m: npshr,
            power_kw: power,
            npsh_available_m: npsh_available,
            npsh_margin_m: npsh_available - npshr,
        }))
    }
}
