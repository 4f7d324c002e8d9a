use serde::{Deserialize, Serialize};

use super::avionics::{AvionicsData, TelemetryLinkData};
use crate::control::environment::EnvironmentData;
use crate::control::payload::PayloadData;
use crate::control::propulsion::EngineData;
use crate::control::structure::StructuralData;
use crate::errors::SimulationError;
use crate::trajectory_system::orbital::OrbitalParameters;
use crate::utils::vector3d::Vector3D;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    #[serde(flatten)]
    pub vector: Vector3D,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeVector {
    #[serde(flatten)]
    pub vector: Vector3D,
    pub total: f64,
}

impl From<Vector3D> for MagnitudeVector {
    fn from(vector: Vector3D) -> Self {
        MagnitudeVector {
            vector,
            total: vector.magnitude(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub pitch: f64, // radians
    pub yaw: f64,   // radians
    pub roll: f64,  // radians
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagingData {
    // 1-based
    pub current_stage: usize,
    pub total_stages: usize,
    pub ready_for_separation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryData {
    pub deviation: f64,      // 0-1
    pub target_apogee: f64,  // m
    pub current_apogee: f64, // m
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryData {
    pub timestamp: f64, // seconds since launch
    pub max_simulation_time: f64,
    pub position: GeoPosition,
    pub velocity: MagnitudeVector,
    pub acceleration: MagnitudeVector,
    pub orientation: Orientation,
    pub engine: EngineData,
    pub staging: StagingData,
    pub payload: PayloadData,
    pub structural: StructuralData,
    pub trajectory: TrajectoryData,
    pub avionics: AvionicsData,
    pub telemetry: TelemetryLinkData,
    pub environment: EnvironmentData,
    pub trajectory_history: Vec<Vector3D>,
    pub mission_phase: String,
    pub orbital_parameters: OrbitalParameters,
}

impl TelemetryData {
    pub fn altitude(&self) -> f64 {
        self.position.vector.y
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
