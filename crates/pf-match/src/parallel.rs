//! Parallel-pump transform of the system curve.

use crate::error::{MatchError, MatchResult};
use pf_core::{Quintic, linspace};
use pf_hydraulics::SystemCurve;

const RESAMPLE_POINTS: usize = 100;

/// Rescale a system curve so head is a function of per-pump flow when
/// `n_pumps` identical units share the load equally.
///
/// Parallel pumps split flow at equal head, so each unit sees `Q/n` of the
/// total. The curve is resampled over its domain, flow samples divided by
/// `n_pumps`, and refitted. `n_pumps = 1` takes the same resample+refit path;
/// the tiny refit residue is expected and tolerated.
pub fn per_pump_curve(curve: &SystemCurve, n_pumps: u32) -> MatchResult<Quintic> {
    if n_pumps == 0 {
        return Err(MatchError::InvalidArg {
            what: "pump count must be at least 1",
        });
    }

    let flows = linspace(0.0, curve.max_flow_m3h(), RESAMPLE_POINTS);
    let heads: Vec<f64> = flows.iter().map(|&q| curve.head_at(q)).collect();
    let per_pump_flows: Vec<f64> = flows.iter().map(|&q| q / f64::from(n_pumps)).collect();

    Ok(Quintic::fit(&per_pump_flows, &heads)?)
}
