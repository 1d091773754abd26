//! Darcy friction factor solver.

use crate::error::{HydroError, HydroResult};

/// Below this Reynolds number the laminar closed form applies.
pub const LAMINAR_RE_LIMIT: f64 = 2000.0;

/// Computes the Darcy friction factor from Reynolds number and relative
/// roughness.
///
/// Laminar flow uses `f = 64/Re`. Turbulent flow solves the implicit
/// Colebrook-White equation by fixed-point iteration, seeded with the
/// explicit fully-rough estimate.
#[derive(Debug, Clone, Copy)]
pub struct FrictionFactorSolver {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for FrictionFactorSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl FrictionFactorSolver {
    /// Solve for the friction factor. Pure function of its inputs.
    pub fn solve(&self, re: f64, relative_roughness: f64) -> HydroResult<f64> {
        if !re.is_finite() || re <= 0.0 {
            return Err(HydroError::InvalidArg {
                what: "Reynolds number must be positive and finite",
            });
        }
        if !relative_roughness.is_finite() || relative_roughness < 0.0 {
            return Err(HydroError::InvalidArg {
                what: "relative roughness must be non-negative and finite",
            });
        }

        if re < LAMINAR_RE_LIMIT {
            return Ok(64.0 / re);
        }

        let mut f = self.initial_guess(relative_roughness);
        for _ in 0..self.max_iterations {
            let f_new = (-2.0
                * (relative_roughness / 3.7 + 2.51 / (re * f.sqrt())).log10())
            .powi(-2);
            if (f_new - f).abs() < self.tolerance {
                return Ok(f_new);
            }
            f = f_new;
        }

        Err(HydroError::ConvergenceFailed {
            iterations: self.max_iterations,
            re,
        })
    }

    /// Explicit fully-rough seed; falls back to a flat 0.02 for hydraulically
    /// smooth pipe where the rough-pipe form is singular.
    fn initial_guess(&self, relative_roughness: f64) -> f64 {
        if relative_roughness > 0.0 {
            (1.14 + 2.0 * (1.0 / relative_roughness).log10()).powi(-2)
        } else {
            0.02
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn laminar_closed_form() {
        let solver = FrictionFactorSolver::default();
        let f = solver.solve(1000.0, 1e-4).unwrap();
        assert!((f - 0.064).abs() < 1e-12);
    }

    #[test]
    fn turbulent_smooth_pipe_reference_value() {
        // Colebrook, smooth pipe, Re = 1e5: f ~ 0.0180
        let solver = FrictionFactorSolver::default();
        let f = solver.solve(1e5, 0.0).unwrap();
        assert!((f - 0.0180).abs() < 5e-4, "f = {f}");
    }

    #[test]
    fn rough_pipe_reference_value() {
        // Re = 1e6, eps/D = 0.01: fully rough region, f ~ 0.038
        let solver = FrictionFactorSolver::default();
        let f = solver.solve(1e6, 0.01).unwrap();
        assert!((f - 0.038).abs() < 2e-3, "f = {f}");
    }

    #[test]
    fn rejects_non_positive_reynolds() {
        let solver = FrictionFactorSolver::default();
        assert!(solver.solve(0.0, 1e-4).is_err());
        assert!(solver.solve(-10.0, 1e-4).is_err());
        assert!(solver.solve(f64::NAN, 1e-4).is_err());
    }

    #[test]
    fn no_discontinuity_spike_near_transition() {
        // Sweep Re across the laminar/turbulent switch: the laminar value and
        // one Colebrook fixed-point step from it stay within a bounded band.
        let rel_roughness = 8.57e-4;
        for i in 0..=80 {
            let re = 1000.0 + 50.0 * i as f64;
            let f_lam = 64.0 / re;
            let f_step = (-2.0
                * (rel_roughness / 3.7 + 2.51 / (re * f_lam.sqrt())).log10())
            .powi(-2);
            assert!(
                (f_step - f_lam).abs() < 0.05,
                "spike at Re={re}: laminar {f_lam}, step {f_step}"
            );
        }
    }

    proptest! {
        #[test]
        fn converges_over_turbulent_envelope(
            re in 2000.0..1e8f64,
            rel_roughness in 1e-6..0.05f64,
        ) {
            let solver = FrictionFactorSolver::default();
            let f = solver.solve(re, rel_roughness).unwrap();
            prop_assert!(f > 0.0);
            prop_assert!(f < 0.2);
        }
    }
}
