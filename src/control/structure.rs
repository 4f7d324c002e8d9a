use rand::Rng;
use serde::{Deserialize, Serialize};

use super::launch_stages::{StageSequence, StageStatus};
use super::payload::Payload;
use crate::constants::MAX_DYNAMIC_PRESSURE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructuralData {
    pub stress: f64,
    pub vibration: f64,
}

pub struct Structure {
    pub stages: StageSequence, // Rocket stages
    pub payload: Payload,      // Rocket payload
}

impl Structure {
    pub fn new(stages: StageSequence, payload: Payload) -> Self {
        Structure { stages, payload }
    }

    // Stages below separated_through were jettisoned by command
    pub fn stage_mass(&self, index: usize, time: f64, separated_through: usize) -> f64 {
        let stage = match self.stages.get(index) {
            Some(stage) => stage,
            None => return 0.0,
        };
        if index < separated_through {
            return 0.0;
        }

        match self.stages.status(index, time) {
            StageStatus::Pending => stage.get_total_mass(),
            StageStatus::Burning { progress } => {
                stage.dry_mass + stage.propellant_mass * (1.0 - progress)
            }
            StageStatus::BurnedOut => stage.dry_mass,
            StageStatus::Separated => 0.0,
        }
    }

    pub fn get_total_mass(&self, time: f64, separated_through: usize) -> f64 {
        let stages_mass: f64 = (0..self.stages.len())
            .map(|index| self.stage_mass(index, time, separated_through))
            .sum();
        stages_mass + self.payload.get_mass()
    }

    pub fn calculate_stress(dynamic_pressure: f64) -> f64 {
        (dynamic_pressure / MAX_DYNAMIC_PRESSURE).clamp(0.0, 1.0)
    }

    pub fn calculate_vibration<R: Rng + ?Sized>(
        altitude: f64,
        engine_running: bool,
        rng: &mut R,
    ) -> f64 {
        let jitter: f64 = rng.gen::<f64>() * 0.1;
        let base = if engine_running { 0.3 } else { 0.05 };
        let atmospheric = 0.2 * (-altitude / 50_000.0).exp();
        (base + atmospheric + jitter).clamp(0.0, 1.0)
    }

    pub fn loads<R: Rng + ?Sized>(
        dynamic_pressure: f64,
        altitude: f64,
        engine_running: bool,
        rng: &mut R,
    ) -> StructuralData {
        StructuralData {
            stress: Self::calculate_stress(dynamic_pressure),
            vibration: Self::calculate_vibration(altitude, engine_running, rng),
        }
    }
}
