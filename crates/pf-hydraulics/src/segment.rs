//! Head loss for one pipe segment (Darcy-Weisbach).

use crate::error::{HydroError, HydroResult};
use crate::fluid::FluidProperties;
use crate::friction::FrictionFactorSolver;
use pf_core::units::constants::G_MPS2;
use pf_core::{Length, ensure_finite};

/// Geometry of one serial pipe segment.
///
/// Local losses may be carried either as an explicit `k_local` coefficient or
/// folded into `effective_length` (the primary representation here, with
/// `k_local = 0`).
#[derive(Debug, Clone)]
pub struct SegmentGeometry {
    /// Internal diameter
    pub diameter: Length,
    /// Physical length plus any equivalent lengths
    pub effective_length: Length,
    /// Signed elevation change; positive = rise
    pub elevation: Length,
    /// Explicit local loss coefficient (sum of K factors)
    pub k_local: f64,
    /// Absolute roughness
    pub roughness: Length,
}

impl SegmentGeometry {
    fn validate(&self) -> HydroResult<()> {
        if self.diameter.value <= 0.0 {
            return Err(HydroError::InvalidArg {
                what: "segment diameter must be positive",
            });
        }
        if self.effective_length.value < 0.0 {
            return Err(HydroError::InvalidArg {
                what: "segment effective length must be non-negative",
            });
        }
        if self.k_local < 0.0 {
            return Err(HydroError::InvalidArg {
                what: "local loss coefficient must be non-negative",
            });
        }
        if self.roughness.value < 0.0 {
            return Err(HydroError::InvalidArg {
                what: "roughness must be non-negative",
            });
        }
        Ok(())
    }
}

/// Segment head-loss model, vectorized over flow samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentLossModel {
    solver: FrictionFactorSolver,
}

impl SegmentLossModel {
    pub fn new(solver: FrictionFactorSolver) -> Self {
        Self { solver }
    }

    /// Head loss in meters of fluid column for each flow sample (m³/h).
    ///
    /// Friction (Darcy-Weisbach) + local losses + signed elevation. Each
    /// sample gets its own friction factor; the laminar and turbulent
    /// branches behave exactly as the scalar solver does.
    pub fn head_loss(
        &self,
        segment: &SegmentGeometry,
        flows_m3h: &[f64],
        fluid: &FluidProperties,
    ) -> HydroResult<Vec<f64>> {
        segment.validate()?;

        let d = segment.diameter.value;
        let l = segment.effective_length.value;
        let h = segment.elevation.value;
        let rel_roughness = segment.roughness.value / d;
        let area = std::f64::consts::PI * (d / 2.0) * (d / 2.0);
        let rho = fluid.rho_kg_m3();
        let mu = fluid.mu_pa_s();

        let mut losses = Vec::with_capacity(flows_m3h.len());
        for &q_m3h in flows_m3h {
            if q_m3h <= 0.0 {
                return Err(HydroError::InvalidArg {
                    what: "flow sample must be positive",
                });
            }
            let q = q_m3h / 3600.0;
            let velocity = q / area;
            let re = rho * velocity * d / mu;

            let f = self.solver.solve(re, rel_roughness)?;

            let dynamic_head = velocity * velocity / (2.0 * G_MPS2);
            let friction = f * (l / d) * dynamic_head;
            let local = segment.k_local * dynamic_head;
            let total = ensure_finite(friction + local + h, "segment head loss")?;
            losses.push(total);
        }
        Ok(losses)
    }

    /// Scalar form of [`head_loss`](Self::head_loss) for a single flow.
    pub fn head_loss_at(
        &self,
        segment: &SegmentGeometry,
        flow_m3h: f64,
        fluid: &FluidProperties,
    ) -> HydroResult<f64> {
        Ok(self.head_loss(segment, &[flow_m3h], fluid)?[0])
    }
}
