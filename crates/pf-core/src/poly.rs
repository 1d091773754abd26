//! Fixed degree-5 polynomials.
//!
//! Every curve in the system (head loss, pump head, efficiency, NPSHr, power)
//! is a quintic in flow, coefficients stored highest degree first. Fitting
//! uses a Vandermonde least-squares solve; root finding uses the eigenvalues
//! of the companion matrix.

use crate::error::{CoreError, CoreResult};
use crate::numeric::ensure_finite;
use nalgebra::{Complex, DMatrix, DVector};

/// Coefficient count for a degree-5 polynomial.
pub const QUINTIC_COEFF_COUNT: usize = 6;

/// Degree-5 polynomial, coefficients highest degree first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Quintic {
    coeffs: [f64; QUINTIC_COEFF_COUNT],
}

impl Quintic {
    pub fn new(coeffs: [f64; QUINTIC_COEFF_COUNT]) -> Self {
        Self { coeffs }
    }

    /// Build from a slice, rejecting anything that is not exactly six
    /// coefficients (malformed catalog data).
    pub fn from_slice(coeffs: &[f64]) -> CoreResult<Self> {
        if coeffs.len() != QUINTIC_COEFF_COUNT {
            return Err(CoreError::DegreeMismatch {
                expected: QUINTIC_COEFF_COUNT,
                got: coeffs.len(),
            });
        }
        let mut out = [0.0; QUINTIC_COEFF_COUNT];
        out.copy_from_slice(coeffs);
        Ok(Self { coeffs: out })
    }

    pub fn zero() -> Self {
        Self {
            coeffs: [0.0; QUINTIC_COEFF_COUNT],
        }
    }

    pub fn coeffs(&self) -> &[f64; QUINTIC_COEFF_COUNT] {
        &self.coeffs
    }

    /// Evaluate at `x` (Horner).
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Coefficient-wise difference `self - other`.
    pub fn sub(&self, other: &Quintic) -> Quintic {
        let mut out = [0.0; QUINTIC_COEFF_COUNT];
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.coeffs[i] - other.coeffs[i];
        }
        Quintic::new(out)
    }

    /// Least-squares degree-5 fit of `(xs, ys)` samples.
    ///
    /// Requires at least six samples; the normal system is solved through the
    /// SVD of the Vandermonde matrix.
    pub fn fit(xs: &[f64], ys: &[f64]) -> CoreResult<Quintic> {
        if xs.len() != ys.len() {
            return Err(CoreError::InvalidArg {
                what: "fit sample arrays must have equal length",
            });
        }
        if xs.len() < QUINTIC_COEFF_COUNT {
            return Err(CoreError::FitFailed {
                what: "need at least six samples for a degree-5 fit",
            });
        }
        for &x in xs {
            ensure_finite(x, "fit abscissa")?;
        }
        for &y in ys {
            ensure_finite(y, "fit ordinate")?;
        }

        let n = xs.len();
        let vandermonde = DMatrix::from_fn(n, QUINTIC_COEFF_COUNT, |i, j| {
            xs[i].powi((QUINTIC_COEFF_COUNT - 1 - j) as i32)
        });
        let rhs = DVector::from_column_slice(ys);

        let svd = vandermonde.svd(true, true);
        let solution = svd.solve(&rhs, 1e-12).map_err(|_| CoreError::FitFailed {
            what: "SVD solve did not converge",
        })?;

        let mut coeffs = [0.0; QUINTIC_COEFF_COUNT];
        for (i, c) in coeffs.iter_mut().enumerate() {
            *c = ensure_finite(solution[i], "fitted coefficient")?;
        }
        Ok(Quintic::new(coeffs))
    }

    /// All complex roots, via the companion matrix of the monic polynomial.
    ///
    /// Exactly-zero leading coefficients are stripped first (a quintic built
    /// as the difference of two curves with equal high-order terms degrades
    /// to a lower degree). A constant polynomial has no roots.
    pub fn roots(&self) -> Vec<Complex<f64>> {
        let mut start = 0;
        while start < QUINTIC_COEFF_COUNT - 1 && self.coeffs[start] == 0.0 {
            start += 1;
        }
        let c = &self.coeffs[start..];
        let degree = c.len() - 1;
        if degree == 0 {
            return Vec::new();
        }

        let lead = c[0];
        let mut companion = DMatrix::zeros(degree, degree);
        for i in 1..degree {
            companion[(i, i - 1)] = 1.0;
        }
        for j in 0..degree {
            companion[(0, j)] = -c[j + 1] / lead;
        }
        companion.complex_eigenvalues().iter().copied().collect()
    }

    /// Numerically-real roots inside `[lo, hi]`, sorted ascending.
    pub fn real_roots_within(&self, lo: f64, hi: f64, imag_tol: f64) -> Vec<f64> {
        let mut roots: Vec<f64> = self
            .roots()
            .into_iter()
            .filter(|r| r.im.abs() < imag_tol)
            .map(|r| r.re)
            .filter(|&x| x >= lo && x <= hi)
            .collect();
        roots.sort_by(|a, b| a.total_cmp(b));
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_horner_matches_direct() {
        let p = Quintic::new([1.0, -2.0, 0.5, 0.0, 3.0, -7.0]);
        let x = 1.7_f64;
        let direct = x.powi(5) - 2.0 * x.powi(4) + 0.5 * x.powi(3) + 3.0 * x - 7.0;
        assert!((p.eval(x) - direct).abs() < 1e-12);
    }

    #[test]
    fn from_slice_rejects_wrong_degree() {
        let err = Quintic::from_slice(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, CoreError::DegreeMismatch { got: 3, .. }));
    }

    #[test]
    fn fit_recovers_known_quintic() {
        let truth = Quintic::new([2.0e-6, -3.0e-4, 1.2e-2, -0.15, 0.8, 12.0]);
        let xs: Vec<f64> = (1..=200).map(|i| i as f64 * 0.2).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| truth.eval(x)).collect();

        let fitted = Quintic::fit(&xs, &ys).unwrap();
        for x in [0.5, 4.0, 11.0, 25.0, 39.0] {
            let err = (fitted.eval(x) - truth.eval(x)).abs();
            assert!(err < 1e-6, "fit error {} at x={}", err, x);
        }
    }

    #[test]
    fn fit_needs_six_samples() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [1.0, 2.0, 3.0];
        let err = Quintic::fit(&xs, &ys).unwrap_err();
        assert!(matches!(err, CoreError::FitFailed { .. }));
    }

    #[test]
    fn roots_of_degraded_quadratic() {
        // x^2 - 5x + 6 embedded in a quintic: roots 2 and 3
        let p = Quintic::new([0.0, 0.0, 0.0, 1.0, -5.0, 6.0]);
        let roots = p.real_roots_within(0.0, 10.0, 1e-9);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - 2.0).abs() < 1e-9);
        assert!((roots[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn constant_polynomial_has_no_roots() {
        let p = Quintic::new([0.0, 0.0, 0.0, 0.0, 0.0, 4.2]);
        assert!(p.roots().is_empty());
    }

    #[test]
    fn real_roots_filter_complex_pairs() {
        // (x^2 + 1)(x - 1) = x^3 - x^2 + x - 1: only x = 1 is real
        let p = Quintic::new([0.0, 0.0, 1.0, -1.0, 1.0, -1.0]);
        let roots = p.real_roots_within(-10.0, 10.0, 1e-6);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sub_is_coefficient_wise() {
        let a = Quintic::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Quintic::new([0.5, 2.0, 1.0, 4.0, 0.0, 1.0]);
        let d = a.sub(&b);
        assert_eq!(d.coeffs(), &[0.5, 0.0, 2.0, 0.0, 5.0, 5.0]);
    }
}
