// pf-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Density = UomMassDensity;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn m3h(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_hour;
    VolumeRate::new::<cubic_meter_per_hour>(v)
}

pub mod constants {
    /// Standard gravitational acceleration used by every head-loss formula.
    pub const G_MPS2: f64 = 9.81;
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::volume_rate::cubic_meter_per_hour;

    #[test]
    fn constructors_smoke() {
        let _l = m(5.0);
        let _d = mm(52.51);
        let _p = pa(101_325.0);
        let _t = celsius(25.0);
        let _mu = pa_s(8.9e-4);
        let _rho = kg_m3(1000.0);
        let _q = m3h(20.0);
    }

    #[test]
    fn flow_round_trips_through_si() {
        let q = m3h(20.0);
        assert!((q.get::<cubic_meter_per_hour>() - 20.0).abs() < 1e-12);
        // SI value is m³/s
        assert!((q.value - 20.0 / 3600.0).abs() < 1e-12);
    }
}
