//! Fluid properties for a calculation run.

use crate::error::{HydroError, HydroResult};
use pf_core::units::constants::G_MPS2;
use pf_core::{Density, DynVisc, Temperature, ensure_finite};
use uom::si::thermodynamic_temperature::degree_celsius;

/// Standard atmospheric pressure, Pa. Fixed for every NPSH computation.
pub const ATMOSPHERIC_PRESSURE_PA: f64 = 101_325.0;

const MMHG_TO_PA: f64 = 133.322;

/// Immutable fluid state for one calculation run.
#[derive(Debug, Clone, Copy)]
pub struct FluidProperties {
    mu: DynVisc,
    rho: Density,
    temperature: Temperature,
}

impl FluidProperties {
    pub fn new(mu: DynVisc, rho: Density, temperature: Temperature) -> HydroResult<Self> {
        let mu_v = ensure_finite(mu.value, "dynamic viscosity")?;
        let rho_v = ensure_finite(rho.value, "density")?;
        ensure_finite(temperature.value, "temperature")?;
        if mu_v <= 0.0 {
            return Err(HydroError::InvalidArg {
                what: "dynamic viscosity must be positive",
            });
        }
        if rho_v <= 0.0 {
            return Err(HydroError::InvalidArg {
                what: "density must be positive",
            });
        }
        Ok(Self {
            mu,
            rho,
            temperature,
        })
    }

    /// Dynamic viscosity, Pa·s.
    pub fn mu_pa_s(&self) -> f64 {
        self.mu.value
    }

    /// Density, kg/m³.
    pub fn rho_kg_m3(&self) -> f64 {
        self.rho.value
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature.get::<degree_celsius>()
    }

    /// Saturation (vapor) pressure, Pa.
    ///
    /// Two-branch Antoine correlation for water, switching coefficient sets
    /// at 60 °C (mmHg / °C form, converted to Pa).
    pub fn vapor_pressure_pa(&self) -> f64 {
        let t = self.temperature_c();
        let (a, b, c) = if t < 60.0 {
            (8.07131, 1730.63, 233.426)
        } else {
            (8.14019, 1810.94, 244.485)
        };
        let p_mmhg = 10f64.powf(a - b / (c + t));
        p_mmhg * MMHG_TO_PA
    }

    /// Vapor pressure expressed as meters of this fluid.
    pub fn vapor_head_m(&self) -> f64 {
        self.vapor_pressure_pa() / (self.rho_kg_m3() * G_MPS2)
    }

    /// Head equivalent of an absolute pressure, meters of this fluid.
    pub fn pressure_head_m(&self, pressure_pa: f64) -> f64 {
        pressure_pa / (self.rho_kg_m3() * G_MPS2)
    }
}
