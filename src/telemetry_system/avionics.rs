use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AVIONICS_DEGRADE_ALTITUDE, AVIONICS_DEGRADE_CHANCE, LINK_DEGRADE_ALTITUDE,
    LINK_DEGRADE_CHANCE, LINK_FLOOR_ALTITUDE, LINK_FLOOR_FRACTION, NOMINAL_DOWNLINK_RATE,
    NOMINAL_UPLINK_RATE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemStatus {
    Nominal,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvionicsData {
    pub status: SystemStatus,
    pub cpu_load: f64,     // 0-1
    pub memory_usage: f64, // 0-1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryLinkData {
    pub status: SystemStatus,
    pub uplink_rate: f64,   // bps
    pub downlink_rate: f64, // bps
}

pub fn link_rate_scale(altitude: f64) -> f64 {
    let falloff = (1.0 - LINK_FLOOR_FRACTION) * altitude / LINK_FLOOR_ALTITUDE;
    (1.0 - falloff).clamp(LINK_FLOOR_FRACTION, 1.0)
}

pub fn avionics_status<R: Rng + ?Sized>(altitude: f64, rng: &mut R) -> AvionicsData {
    let degrade_roll: f64 = rng.gen();
    let cpu_load = 0.3 + rng.gen::<f64>() * 0.2;
    let memory_usage = 0.4 + rng.gen::<f64>() * 0.1;

    let status = if altitude > AVIONICS_DEGRADE_ALTITUDE && degrade_roll < AVIONICS_DEGRADE_CHANCE
    {
        SystemStatus::Degraded
    } else {
        SystemStatus::Nominal
    };

    AvionicsData {
        status,
        cpu_load,
        memory_usage,
    }
}

pub fn link_status<R: Rng + ?Sized>(altitude: f64, rng: &mut R) -> TelemetryLinkData {
    let degrade_roll: f64 = rng.gen();
    let status = if altitude > LINK_DEGRADE_ALTITUDE && degrade_roll < LINK_DEGRADE_CHANCE {
        SystemStatus::Degraded
    } else {
        SystemStatus::Nominal
    };

    let scale = link_rate_scale(altitude);
    TelemetryLinkData {
        status,
        uplink_rate: NOMINAL_UPLINK_RATE * scale,
        downlink_rate: NOMINAL_DOWNLINK_RATE * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_link_rate_scale() {
        assert_eq!(link_rate_scale(0.0), 1.0);
        assert_abs_diff_eq!(link_rate_scale(250_000.0), 0.55, epsilon = 1e-12);
        assert_abs_diff_eq!(link_rate_scale(500_000.0), 0.1, epsilon = 1e-12);
        assert_eq!(link_rate_scale(2_000_000.0), 0.1);
        assert_eq!(link_rate_scale(-10_000.0), 1.0);
    }

    #[test]
    fn test_nominal_at_low_altitude() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1_000 {
            let avionics = avionics_status(50_000.0, &mut rng);
            assert_eq!(avionics.status, SystemStatus::Nominal);
            assert!(avionics.cpu_load >= 0.3 && avionics.cpu_load <= 0.5);
            assert!(avionics.memory_usage >= 0.4 && avionics.memory_usage <= 0.5);

            let link = link_status(150_000.0, &mut rng);
            assert_eq!(link.status, SystemStatus::Nominal);
        }
    }

    #[test]
    fn test_occasional_degradation_high_up() {
        let mut rng = StdRng::seed_from_u64(17);
        let degraded = (0..20_000)
            .filter(|_| avionics_status(300_000.0, &mut rng).status == SystemStatus::Degraded)
            .count();

        // ~1% expected; generous bounds
        assert!(degraded > 50 && degraded < 400, "degraded count {}", degraded);
    }

    #[test]
    fn test_link_rates_at_altitude() {
        let mut rng = StdRng::seed_from_u64(2);
        let link = link_status(500_000.0, &mut rng);
        assert_abs_diff_eq!(link.uplink_rate, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(link.downlink_rate, 1_000.0, epsilon = 1e-9);
    }
}
