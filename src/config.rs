use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    LAUNCH_LATITUDE, LAUNCH_LONGITUDE, MAX_SIMULATION_TIME, PAYLOAD_DEPLOY_TIME, PAYLOAD_MASS,
    ROCKET_CROSS_SECTIONAL_AREA, ROCKET_DRAG_COEFFICIENT, TARGET_APOGEE, TICK_INTERVAL_MS,
    TIME_STEP,
};
use crate::control::launch_stages::RocketStage;
use crate::control::mission::{MissionPhase, MissionTimeline};
use crate::errors::SimulationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub max_time: f64,         // s
    pub time_step: f64,        // s of mission time per tick at speed 1
    pub tick_interval_ms: u64, // wall-clock tick period
    pub stages: Vec<RocketStage>,
    pub payload_mass: f64,        // kg
    pub payload_deploy_time: f64, // s
    pub target_apogee: f64,       // m
    pub launch_latitude: f64,     // degrees
    pub launch_longitude: f64,    // degrees
    pub drag_coefficient: f64,
    pub reference_area: f64, // m²
    pub mission_phases: Vec<MissionPhase>,
    // None seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            max_time: MAX_SIMULATION_TIME,
            time_step: TIME_STEP,
            tick_interval_ms: TICK_INTERVAL_MS,
            stages: vec![
                RocketStage::new("First Stage", 22_200.0, 411_000.0, 7_607_000.0, 282.0, 162.0),
                RocketStage::new("Second Stage", 4_000.0, 107_500.0, 934_000.0, 348.0, 397.0),
            ],
            payload_mass: PAYLOAD_MASS,
            payload_deploy_time: PAYLOAD_DEPLOY_TIME,
            target_apogee: TARGET_APOGEE,
            launch_latitude: LAUNCH_LATITUDE,
            launch_longitude: LAUNCH_LONGITUDE,
            drag_coefficient: ROCKET_DRAG_COEFFICIENT,
            reference_area: ROCKET_CROSS_SECTIONAL_AREA,
            mission_phases: MissionTimeline::default().phases().to_vec(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let invalid = |message: String| Err(SimulationError::InitializationError(message));

        if !(self.max_time > 0.0) {
            return invalid(format!("max_time must be positive, got {}", self.max_time));
        }
        if !(self.time_step > 0.0) {
            return invalid(format!("time_step must be positive, got {}", self.time_step));
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be at least 1".to_string());
        }
        if self.stages.is_empty() {
            return invalid("at least one stage is required".to_string());
        }
        if self.stages.iter().all(|stage| stage.separated) {
            return invalid("every stage is marked as separated".to_string());
        }
        if self.payload_mass < 0.0 {
            return invalid(format!("payload_mass must not be negative, got {}", self.payload_mass));
        }
        for stage in &self.stages {
            if !(stage.dry_mass > 0.0) || stage.propellant_mass < 0.0 {
                return invalid(format!("stage '{}' has invalid masses", stage.name));
            }
            if !(stage.burn_time > 0.0) {
                return invalid(format!("stage '{}' needs a positive burn time", stage.name));
            }
            if stage.thrust < 0.0 {
                return invalid(format!("stage '{}' has negative thrust", stage.name));
            }
        }
        Ok(())
    }
}
