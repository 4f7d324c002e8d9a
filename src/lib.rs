pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod simulation;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::SimulationConfig;
pub use constants::*;
pub use control::commands::{CommandEffect, EmergencyScenario, RocketCommand};
pub use control::launch_stages::{RocketStage, StageSequence};
pub use control::mission::{CelestialBody, MissionPhase, MissionTimeline};
pub use control::propulsion::EngineStatus;
pub use errors::SimulationError;

// Re-export the simulation entry points
pub use simulation::clock::RocketSimulation;
pub use simulation::engine::{SimulationEngine, SimulationOptions};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::recorder::TelemetryRecorder;
pub use telemetry_system::telemetry::TelemetryData;

// Re-export commonly used utilities
pub use utils::vector3d::Vector3D;
