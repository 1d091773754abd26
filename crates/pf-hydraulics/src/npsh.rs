//! Net positive suction head available.

use crate::error::{HydroError, HydroResult};
use crate::fluid::{ATMOSPHERIC_PRESSURE_PA, FluidProperties};

/// NPSH available as a function of flow.
///
/// Static head is signed: positive when the supply level sits above the pump
/// centerline (flooded suction). A suction segment whose elevation rises
/// toward the pump therefore enters here with its sign flipped.
#[derive(Debug, Clone, Copy)]
pub struct NpshAvailableModel {
    pub atmospheric_pressure_pa: f64,
}

impl Default for NpshAvailableModel {
    fn default() -> Self {
        Self {
            atmospheric_pressure_pa: ATMOSPHERIC_PRESSURE_PA,
        }
    }
}

impl NpshAvailableModel {
    /// NPSH available at the design flow, meters of fluid:
    /// `h_atm + h_static - h_vapor - friction_loss`.
    pub fn available_at_design(
        &self,
        static_head_m: f64,
        friction_loss_m: f64,
        fluid: &FluidProperties,
    ) -> f64 {
        let h_atm = fluid.pressure_head_m(self.atmospheric_pressure_pa);
        h_atm + static_head_m - fluid.vapor_head_m() - friction_loss_m
    }

    /// NPSH available at each sampled flow.
    ///
    /// The suction friction loss known at the design flow is rescaled by the
    /// quadratic similarity law, `loss(Q) = loss_design · (Q/Q_design)²`;
    /// zero flow carries zero friction loss. A non-positive design flow is a
    /// hard precondition failure.
    pub fn available_curve(
        &self,
        static_head_m: f64,
        friction_loss_at_design_m: f64,
        fluid: &FluidProperties,
        design_flow_m3h: f64,
        flows_m3h: &[f64],
    ) -> HydroResult<Vec<f64>> {
        if !design_flow_m3h.is_finite() || design_flow_m3h <= 0.0 {
            return Err(HydroError::InvalidArg {
                what: "NPSH design flow must be positive",
            });
        }

        let zero_flow_value = self.available_at_design(static_head_m, 0.0, fluid);
        Ok(flows_m3h
            .iter()
            .map(|&q| {
                let ratio = q / design_flow_m3h;
                zero_flow_value - friction_loss_at_design_m * ratio * ratio
            })
            .collect())
    }

    /// Curve form for a single flow value.
    pub fn available_at(
        &self,
        static_head_m: f64,
        friction_loss_at_design_m: f64,
        fluid: &FluidProperties,
        design_flow_m3h: f64,
        flow_m3h: f64,
    ) -> HydroResult<f64> {
        Ok(self.available_curve(
            static_head_m,
            friction_loss_at_design_m,
            fluid,
            design_flow_m3h,
            &[flow_m3h],
        )?[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{celsius, kg_m3, pa_s};

    fn water() -> FluidProperties {
        FluidProperties::new(pa_s(8.9e-4), kg_m3(1000.0), celsius(25.0)).unwrap()
    }

    #[test]
    fn curve_form_matches_single_point_at_design() {
        let model = NpshAvailableModel::default();
        let fluid = water();
        let static_head = 3.0;
        let friction = 0.4;
        let design = 20.0;

        let curve = model
            .available_curve(static_head, friction, &fluid, design, &[0.0, design])
            .unwrap();
        let at_design = model.available_at_design(static_head, friction, &fluid);
        assert!((curve[1] - at_design).abs() < 1e-12);
    }

    #[test]
    fn zero_flow_has_no_friction_loss() {
        let model = NpshAvailableModel::default();
        let fluid = water();
        let curve = model
            .available_curve(3.0, 0.4, &fluid, 20.0, &[0.0])
            .unwrap();
        let expected = fluid.pressure_head_m(ATMOSPHERIC_PRESSURE_PA) + 3.0 - fluid.vapor_head_m();
        assert!((curve[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn friction_scales_quadratically() {
        let model = NpshAvailableModel::default();
        let fluid = water();
        let design = 20.0;
        let friction = 0.8;
        let base = model.available_at_design(0.0, 0.0, &fluid);

        let at_half = model
            .available_at(0.0, friction, &fluid, design, design / 2.0)
            .unwrap();
        assert!((base - at_half - friction * 0.25).abs() < 1e-12);

        let at_double = model
            .available_at(0.0, friction, &fluid, design, design * 2.0)
            .unwrap();
        assert!((base - at_double - friction * 4.0).abs() < 1e-12);
    }

    #[test]
    fn non_positive_design_flow_is_rejected() {
        let model = NpshAvailableModel::default();
        let fluid = water();
        let err = model
            .available_curve(3.0, 0.4, &fluid, 0.0, &[1.0])
            .unwrap_err();
        assert!(matches!(err, HydroError::InvalidArg { .. }));
    }

    #[test]
    fn flooded_suction_raises_available_head() {
        let model = NpshAvailableModel::default();
        let fluid = water();
        let flooded = model.available_at_design(3.0, 0.4, &fluid);
        let lifted = model.available_at_design(-3.0, 0.4, &fluid);
        assert!((flooded - lifted - 6.0).abs() < 1e-12);
    }
}
