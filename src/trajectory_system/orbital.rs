use serde::{Deserialize, Serialize};

use crate::control::mission::CelestialBody;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalParameters {
    pub target_apogee: f64,  // m
    pub current_apogee: f64, // m
    pub perigee: f64,        // m
    pub inclination: f64,    // degrees
    pub eccentricity: f64,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// ε = v²/2 - μ/r, a = -μ/(2ε); eccentricity is not bounded to [0, 1)
pub fn estimate_orbit(
    body: &CelestialBody,
    altitude: f64,
    speed: f64,
    target_apogee: f64,
    inclination: f64,
) -> OrbitalParameters {
    let mu = body.gravitational_parameter();
    let radius = body.radius + altitude;
    let energy = speed.powi(2) / 2.0 - mu / radius;
    let semi_major_axis = -mu / (2.0 * energy);

    let apogee = finite_or_zero(2.0 * semi_major_axis - radius - body.radius).max(0.0);
    let perigee = finite_or_zero(radius - body.radius).max(0.0);
    let eccentricity = finite_or_zero((1.0 + 2.0 * energy * radius.powi(2) / mu).max(0.0).sqrt());

    OrbitalParameters {
        target_apogee,
        current_apogee: apogee,
        perigee,
        inclination,
        eccentricity,
    }
}
