use serde::{Deserialize, Serialize};

use crate::constants::{
    ATMOSPHERE_SCALE_HEIGHT, SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE,
    SPECIFIC_GAS_CONSTANT_AIR, TROPOSPHERE_HEIGHT, TROPOSPHERE_TEMP_GRADIENT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub temperature: f64, // K
    pub pressure: f64,    // Pa
    pub density: f64,     // kg/m³
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentData {
    pub external_temperature: f64, // K
    pub external_pressure: f64,    // Pa
}

// Below sea level reads as sea level
pub fn calculate_atmosphere(altitude: f64) -> Atmosphere {
    let altitude = altitude.max(0.0);

    let temperature =
        SEA_LEVEL_TEMPERATURE + TROPOSPHERE_TEMP_GRADIENT * altitude.min(TROPOSPHERE_HEIGHT);
    let pressure = SEA_LEVEL_PRESSURE * (-altitude / ATMOSPHERE_SCALE_HEIGHT).exp();
    let density = pressure / (SPECIFIC_GAS_CONSTANT_AIR * temperature);

    Atmosphere {
        temperature,
        pressure,
        density,
    }
}

impl From<Atmosphere> for EnvironmentData {
    fn from(atmosphere: Atmosphere) -> Self {
        EnvironmentData {
            external_temperature: atmosphere.temperature,
            external_pressure: atmosphere.pressure,
        }
    }
}
