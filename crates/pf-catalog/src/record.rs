//! Catalog record types.

use crate::error::{CatalogError, CatalogResult};
use pf_core::Quintic;
use serde::{Deserialize, Serialize};

/// One digitized pump curve set.
///
/// All four polynomials are functions of flow in m³/h. The BEP window
/// [`bep_window_min_m3h`, `bep_window_max_m3h`] restricts intersection search
/// to flows near the best efficiency point (typically 80%–110% of Q_bep).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpCurveRecord {
    pub brand: String,
    pub model: String,
    pub impeller_diameter_mm: f64,
    pub speed_rpm: u32,
    pub stages: u32,

    /// Hard operating envelope, m³/h
    pub flow_min_m3h: f64,
    pub flow_max_m3h: f64,

    /// Head (m) vs flow
    pub head: Quintic,
    /// Efficiency (%) vs flow
    pub efficiency: Quintic,
    /// NPSH required (m) vs flow
    pub npshr: Quintic,
    /// Shaft power (kW) vs flow
    pub power: Quintic,

    pub bep_efficiency_pct: f64,
    pub bep_flow_m3h: f64,
    pub bep_window_min_m3h: f64,
    pub bep_window_max_m3h: f64,
}

impl PumpCurveRecord {
    /// Validate a record at load time; malformed data never reaches the
    /// matcher. (A wrong coefficient count already fails deserialization.)
    pub fn validate(&self) -> CatalogResult<()> {
        let check = |ok: bool, what: &'static str| -> CatalogResult<()> {
            if ok {
                Ok(())
            } else {
                Err(CatalogError::InvalidRecord {
                    model: self.model.clone(),
                    what,
                })
            }
        };

        check(!self.model.trim().is_empty(), "empty model name")?;
        check(
            self.flow_min_m3h.is_finite() && self.flow_max_m3h.is_finite(),
            "non-finite flow bounds",
        )?;
        check(self.flow_min_m3h >= 0.0, "negative minimum flow")?;
        check(
            self.flow_min_m3h < self.flow_max_m3h,
            "flow range is empty or inverted",
        )?;
        check(
            self.bep_flow_m3h.is_finite() && self.bep_flow_m3h > 0.0,
            "non-positive BEP flow",
        )?;
        check(
            self.bep_window_min_m3h.is_finite()
                && self.bep_window_max_m3h.is_finite()
                && self.bep_window_min_m3h < self.bep_window_max_m3h,
            "BEP window is empty or inverted",
        )?;
        check(
            self.bep_window_min_m3h <= self.bep_flow_m3h
                && self.bep_flow_m3h <= self.bep_window_max_m3h,
            "BEP flow outside its own window",
        )?;
        check(self.stages >= 1, "stage count must be at least 1")?;
        check(
            self.head.coeffs().iter().all(|c| c.is_finite())
                && self.efficiency.coeffs().iter().all(|c| c.is_finite())
                && self.npshr.coeffs().iter().all(|c| c.is_finite())
                && self.power.coeffs().iter().all(|c| c.is_finite()),
            "non-finite polynomial coefficient",
        )?;
        Ok(())
    }

    /// True when the BEP window contains `q`.
    pub fn window_contains(&self, q_m3h: f64) -> bool {
        (self.bep_window_min_m3h..=self.bep_window_max_m3h).contains(&q_m3h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_record() -> PumpCurveRecord {
        PumpCurveRecord {
            brand: "KSB".into(),
            model: "MEGANORM-25-200".into(),
            impeller_diameter_mm: 200.0,
            speed_rpm: 3500,
            stages: 1,
            flow_min_m3h: 0.12,
            flow_max_m3h: 18.0,
            head: Quintic::new([
                1.6203366293119338e-5,
                -6.504262846409288e-4,
                7.837100137631333e-3,
                -0.10339741918416842,
                0.11683996767802679,
                94.15548733348413,
            ]),
            efficiency: Quintic::new([
                -7.761887470387009e-4,
                3.3911048199121115e-2,
                -0.5576200263934282,
                4.241235763784843,
                -15.590336323464351,
                115.48640858022397,
            ]),
            npshr: Quintic::new([
                -5.9633593936612955e-5,
                3.076816279138715e-3,
                -5.9727118368036666e-2,
                0.5692279008187227,
                -2.4263270913352737,
                4.095657732597875,
            ]),
            power: Quintic::new([
                1.1285529591079345e-5,
                -4.6960392949810037e-4,
                7.490625515566242e-3,
                -5.418332751654858e-2,
                0.46983129211803865,
                3.078216968283303,
            ]),
            bep_efficiency_pct: 62.0,
            bep_flow_m3h: 12.0,
            bep_window_min_m3h: 9.6,
            bep_window_max_m3h: 13.2,
        }
    }

    #[test]
    fn sample_record_validates() {
        sample_record().validate().unwrap();
    }

    #[test]
    fn inverted_flow_range_is_rejected() {
        let mut record = sample_record();
        record.flow_min_m3h = 20.0;
        let err = record.validate().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { .. }));
    }

    #[test]
    fn bep_flow_must_sit_inside_window() {
        let mut record = sample_record();
        record.bep_flow_m3h = 20.0;
        assert!(record.validate().is_err());
    }

    #[test]
    fn window_containment() {
        let record = sample_record();
        assert!(record.window_contains(12.0));
        assert!(record.window_contains(9.6));
        assert!(record.window_contains(13.2));
        assert!(!record.window_contains(9.0));
        assert!(!record.window_contains(14.0));
    }

    #[test]
    fn json_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: PumpCurveRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn wrong_coefficient_count_fails_deserialization() {
        let record = sample_record();
        let mut value = serde_json::to_value(&record).unwrap();
        value["head"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<PumpCurveRecord>(value).is_err());
    }
}
