//! System curve construction: suction + discharge losses fitted to a quintic.

use crate::error::{HydroError, HydroResult};
use crate::fittings::{EquivalentLengthTable, Fitting, NominalSize};
use crate::fluid::FluidProperties;
use crate::segment::{SegmentGeometry, SegmentLossModel};
use pf_core::{Length, Quintic, VolumeRate, linspace, m};
use uom::si::volume_rate::cubic_meter_per_hour;

/// Flow-domain headroom above the design flow: curves span [0, 1.4 · Q_design].
const DOMAIN_FACTOR: f64 = 1.4;

/// Smallest sampled flow, m³/h; keeps velocity and Reynolds number nonzero.
const FLOW_EPSILON_M3H: f64 = 0.001;

const MAX_SAMPLE_POINTS: usize = 1000;

/// One side of the installation (suction or discharge).
#[derive(Debug, Clone)]
pub struct SegmentInput {
    /// Physical pipe length
    pub length: Length,
    /// Signed elevation change; positive = rise
    pub elevation: Length,
    /// Fittings present on this side, with quantities
    pub fittings: Vec<(Fitting, u32)>,
}

/// Fitted head-loss curve for the whole installation.
///
/// Immutable once built. Carries the two suction-side scalars the NPSH model
/// needs: friction loss at the design flow (elevation excluded) and the
/// static suction elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemCurve {
    coeffs: Quintic,
    design_flow_m3h: f64,
    max_flow_m3h: f64,
    suction_friction_loss_m: f64,
    suction_static_head_m: f64,
}

impl SystemCurve {
    pub fn new(
        coeffs: Quintic,
        design_flow_m3h: f64,
        max_flow_m3h: f64,
        suction_friction_loss_m: f64,
        suction_static_head_m: f64,
    ) -> HydroResult<Self> {
        if design_flow_m3h <= 0.0 {
            return Err(HydroError::InvalidArg {
                what: "design flow must be positive",
            });
        }
        if max_flow_m3h < design_flow_m3h {
            return Err(HydroError::InvalidArg {
                what: "system curve domain must contain the design flow",
            });
        }
        Ok(Self {
            coeffs,
            design_flow_m3h,
            max_flow_m3h,
            suction_friction_loss_m,
            suction_static_head_m,
        })
    }

    pub fn coeffs(&self) -> &Quintic {
        &self.coeffs
    }

    /// Head loss at `q` m³/h, from the fitted polynomial.
    pub fn head_at(&self, q_m3h: f64) -> f64 {
        self.coeffs.eval(q_m3h)
    }

    pub fn design_flow_m3h(&self) -> f64 {
        self.design_flow_m3h
    }

    pub fn max_flow_m3h(&self) -> f64 {
        self.max_flow_m3h
    }

    /// Valid flow domain is [0, max].
    pub fn contains(&self, q_m3h: f64) -> bool {
        (0.0..=self.max_flow_m3h).contains(&q_m3h)
    }

    /// Suction-side friction loss at the design flow, m (elevation excluded).
    pub fn suction_friction_loss_m(&self) -> f64 {
        self.suction_friction_loss_m
    }

    /// Suction-side static elevation as entered, m; positive = rise toward
    /// the pump.
    pub fn suction_static_head_m(&self) -> f64 {
        self.suction_static_head_m
    }
}

/// Samples suction + discharge segment losses over the flow domain and fits
/// the degree-5 system curve.
#[derive(Debug, Clone)]
pub struct SystemCurveBuilder {
    table: EquivalentLengthTable,
    model: SegmentLossModel,
}

impl Default for SystemCurveBuilder {
    fn default() -> Self {
        Self {
            table: EquivalentLengthTable::standard().clone(),
            model: SegmentLossModel::default(),
        }
    }
}

impl SystemCurveBuilder {
    pub fn new(table: EquivalentLengthTable, model: SegmentLossModel) -> Self {
        Self { table, model }
    }

    pub fn build(
        &self,
        suction: &SegmentInput,
        suction_size: NominalSize,
        discharge: &SegmentInput,
        discharge_size: NominalSize,
        target_flow: VolumeRate,
        fluid: &FluidProperties,
        roughness: Length,
    ) -> HydroResult<SystemCurve> {
        let target_m3h = target_flow.get::<cubic_meter_per_hour>();
        if !target_m3h.is_finite() || target_m3h <= 0.0 {
            return Err(HydroError::InvalidArg {
                what: "target flow must be positive",
            });
        }

        let max_flow = target_m3h * DOMAIN_FACTOR;
        let n_points = ((max_flow / FLOW_EPSILON_M3H) as usize)
            .min(MAX_SAMPLE_POINTS)
            .max(pf_core::QUINTIC_COEFF_COUNT);
        let flows = linspace(FLOW_EPSILON_M3H, max_flow, n_points);

        let suction_geometry = self.side_geometry(suction, suction_size, roughness);
        let discharge_geometry = self.side_geometry(discharge, discharge_size, roughness);

        let suction_losses = self.model.head_loss(&suction_geometry, &flows, fluid)?;
        let discharge_losses = self.model.head_loss(&discharge_geometry, &flows, fluid)?;

        let total: Vec<f64> = suction_losses
            .iter()
            .zip(&discharge_losses)
            .map(|(s, d)| s + d)
            .collect();

        let coeffs = Quintic::fit(&flows, &total)?;

        // Friction component only: same suction geometry, elevation zeroed.
        let mut suction_friction_only = suction_geometry.clone();
        suction_friction_only.elevation = m(0.0);
        let suction_friction_loss =
            self.model
                .head_loss_at(&suction_friction_only, target_m3h, fluid)?;

        tracing::debug!(
            target_m3h,
            n_points,
            suction_friction_loss,
            "system curve fitted"
        );

        SystemCurve::new(
            coeffs,
            target_m3h,
            max_flow,
            suction_friction_loss,
            suction.elevation.value,
        )
    }

    /// Effective length = physical length + quantity-weighted equivalent
    /// lengths; local losses carried as length, so K = 0.
    fn side_geometry(
        &self,
        side: &SegmentInput,
        size: NominalSize,
        roughness: Length,
    ) -> SegmentGeometry {
        let equivalent = self.table.total_for(size, &side.fittings);
        SegmentGeometry {
            diameter: size.inner_diameter(),
            effective_length: side.length + m(equivalent),
            elevation: side.elevation,
            k_local: 0.0,
            roughness,
        }
    }
}
