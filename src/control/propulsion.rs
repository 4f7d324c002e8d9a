use rand::Rng;
use serde::{Deserialize, Serialize};

use super::launch_stages::RocketStage;
use crate::constants::{
    CHAMBER_PRESSURE_BAND, ENGINE_AMBIENT_TEMPERATURE, ENGINE_HEATING_RANGE, FUEL_FRACTION,
    MAX_CHAMBER_PRESSURE, MAX_TURBINE_SPEED, NOMINAL_CHAMBER_PRESSURE, NOMINAL_TURBINE_SPEED,
    OXIDIZER_FRACTION, TURBINE_SPEED_BAND,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineStatus {
    Off,
    Running,
    Shutdown,
    Backup,
}

impl EngineStatus {
    pub fn is_firing(&self) -> bool {
        matches!(self, EngineStatus::Running | EngineStatus::Backup)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineData {
    pub status: EngineStatus,
    pub thrust: f64, // N
    pub max_thrust: f64,
    pub chamber_pressure: f64, // MPa
    pub max_chamber_pressure: f64,
    pub turbine_speed: f64, // RPM
    pub max_turbine_speed: f64,
    pub fuel: f64, // kg
    pub initial_fuel: f64,
    pub oxidizer: f64, // kg
    pub initial_oxidizer: f64,
    pub fuel_flow_rate: f64, // kg/s
    pub temperature: f64,    // K
}

#[derive(Debug, Clone, Copy)]
pub struct PropulsionInputs<'a> {
    pub stage: &'a RocketStage,
    pub burning: bool,
    pub burn_progress: f64,
    pub status_override: Option<EngineStatus>,
    pub thrust_factor: f64,
    pub fuel_cap: Option<f64>,
}

pub struct PropulsionSystem;

impl PropulsionSystem {
    // Backup only runs inside the burn window
    pub fn resolve_status(burning: bool, status_override: Option<EngineStatus>) -> EngineStatus {
        match status_override {
            Some(EngineStatus::Shutdown) => EngineStatus::Shutdown,
            Some(EngineStatus::Backup) if burning => EngineStatus::Backup,
            _ if burning => EngineStatus::Running,
            _ => EngineStatus::Off,
        }
    }

    // (fuel, oxidizer) in kg, split 70/30
    pub fn remaining_propellant(
        stage: &RocketStage,
        burn_progress: f64,
        fuel_cap: Option<f64>,
    ) -> (f64, f64) {
        let remaining = stage.propellant_mass * (1.0 - burn_progress.clamp(0.0, 1.0));
        let mut fuel = remaining * FUEL_FRACTION;
        if let Some(cap) = fuel_cap {
            fuel = fuel.min(cap);
        }
        (fuel.max(0.0), (remaining * OXIDIZER_FRACTION).max(0.0))
    }

    pub fn calculate<R: Rng + ?Sized>(inputs: PropulsionInputs, rng: &mut R) -> EngineData {
        // Always draw in the same order so seeded runs stay reproducible
        let thrust_jitter = rng.gen_range(0.9..=1.0);
        let chamber_jitter: f64 = rng.gen();
        let turbine_jitter: f64 = rng.gen();

        let stage = inputs.stage;
        let status = Self::resolve_status(inputs.burning, inputs.status_override);
        let firing = status.is_firing();
        let (fuel, oxidizer) =
            Self::remaining_propellant(stage, inputs.burn_progress, inputs.fuel_cap);

        let (thrust, chamber_pressure, turbine_speed, fuel_flow_rate, temperature) = if firing {
            (
                (stage.thrust * thrust_jitter * inputs.thrust_factor).max(0.0),
                NOMINAL_CHAMBER_PRESSURE + chamber_jitter * CHAMBER_PRESSURE_BAND,
                NOMINAL_TURBINE_SPEED + turbine_jitter * TURBINE_SPEED_BAND,
                stage.propellant_flow_rate(),
                ENGINE_AMBIENT_TEMPERATURE + ENGINE_HEATING_RANGE * inputs.burn_progress,
            )
        } else {
            (0.0, 0.0, 0.0, 0.0, ENGINE_AMBIENT_TEMPERATURE)
        };

        EngineData {
            status,
            thrust,
            max_thrust: stage.thrust,
            chamber_pressure,
            max_chamber_pressure: MAX_CHAMBER_PRESSURE,
            turbine_speed,
            max_turbine_speed: MAX_TURBINE_SPEED,
            fuel,
            initial_fuel: stage.propellant_mass * FUEL_FRACTION,
            oxidizer,
            initial_oxidizer: stage.propellant_mass * OXIDIZER_FRACTION,
            fuel_flow_rate,
            temperature,
        }
    }
}
