use rand::Rng;

use crate::config::SimulationConfig;
use crate::control::commands::CommandOverrides;
use crate::control::environment::{calculate_atmosphere, EnvironmentData};
use crate::control::launch_stages::StageSequence;
use crate::control::mission::{CelestialBody, MissionTimeline};
use crate::control::payload::Payload;
use crate::control::propulsion::{PropulsionInputs, PropulsionSystem};
use crate::control::structure::Structure;
use crate::errors::SimulationError;
use crate::telemetry_system::avionics::{avionics_status, link_status};
use crate::telemetry_system::telemetry::{
    GeoPosition, MagnitudeVector, Orientation, StagingData, TelemetryData, TrajectoryData,
};
use crate::trajectory_system::aerodynamics::Aerodynamics;
use crate::trajectory_system::kinematics::Kinematics;
use crate::trajectory_system::orbital::estimate_orbit;

// Draw order: engine, vibration, deviation, avionics, link
pub struct TelemetryGenerator {
    structure: Structure,
    kinematics: Kinematics,
    timeline: MissionTimeline,
    target_apogee: f64,
    max_time: f64,
}

impl TelemetryGenerator {
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let structure = Structure::new(
            StageSequence::new(config.stages.clone()),
            Payload::new(config.payload_mass, config.payload_deploy_time),
        );
        let kinematics = Kinematics::new(
            CelestialBody::earth(),
            Aerodynamics::new(config.drag_coefficient, config.reference_area),
            config.launch_latitude,
            config.launch_longitude,
        );

        Ok(TelemetryGenerator {
            structure,
            kinematics,
            timeline: MissionTimeline::new(config.mission_phases.clone()),
            target_apogee: config.target_apogee,
            max_time: config.max_time,
        })
    }

    pub fn stages(&self) -> &StageSequence {
        &self.structure.stages
    }

    // Skips stages jettisoned by command
    pub fn active_stage(&self, time: f64, overrides: &CommandOverrides) -> usize {
        let stages = self.stages();
        stages
            .current_stage(time)
            .max(overrides.separated_through)
            .min(stages.len().saturating_sub(1))
    }

    pub fn total_mass(&self, time: f64, overrides: &CommandOverrides) -> f64 {
        self.structure.get_total_mass(time, overrides.separated_through)
    }

    pub fn current_fuel(&self, time: f64, overrides: &CommandOverrides) -> f64 {
        let index = self.active_stage(time, overrides);
        let (fuel, _) = PropulsionSystem::remaining_propellant(
            &self.stages().stages()[index],
            self.stages().burn_progress(index, time),
            overrides.fuel_cap_for(index),
        );
        fuel
    }

    pub fn mission_phase(&self, time: f64, overrides: &CommandOverrides) -> String {
        match &overrides.phase_override {
            Some(phase) => phase.clone(),
            None => self
                .timeline
                .phase_at(time)
                .map(|phase| phase.name.clone())
                .unwrap_or_default(),
        }
    }

    // trajectory_history is filled in by the engine
    pub fn generate<R: Rng + ?Sized>(
        &self,
        time: f64,
        overrides: &CommandOverrides,
        rng: &mut R,
    ) -> TelemetryData {
        let stages = self.stages();
        let active = self.active_stage(time, overrides);
        let burning = stages.is_burning(active, time);
        let burn_progress = stages.burn_progress(active, time);

        let engine = PropulsionSystem::calculate(
            PropulsionInputs {
                stage: &stages.stages()[active],
                burning,
                burn_progress,
                status_override: overrides.engine_status,
                thrust_factor: overrides.thrust_factor(),
                fuel_cap: overrides.fuel_cap_for(active),
            },
            rng,
        );

        let mass = self.total_mass(time, overrides);
        let flight = self.kinematics.flight_state(
            time,
            engine.thrust,
            mass,
            overrides.pitch_offset,
            overrides.aborted,
        );
        let altitude = flight.altitude();
        let speed = flight.speed();

        let atmosphere = calculate_atmosphere(altitude);
        let dynamic_pressure = Aerodynamics::calculate_dynamic_pressure(speed, atmosphere.density);
        let structural =
            Structure::loads(dynamic_pressure, altitude, engine.status.is_firing(), rng);
        let deviation = rng.gen::<f64>() * 0.05;
        let avionics = avionics_status(altitude, rng);
        let link = link_status(altitude, rng);

        let orbital_parameters = estimate_orbit(
            &self.kinematics.body,
            altitude,
            speed,
            self.target_apogee,
            self.kinematics.launch_latitude,
        );

        TelemetryData {
            timestamp: time,
            max_simulation_time: self.max_time,
            position: GeoPosition {
                vector: flight.position,
                lat: flight.latitude,
                lon: flight.longitude,
            },
            velocity: MagnitudeVector::from(flight.velocity),
            acceleration: MagnitudeVector::from(flight.acceleration),
            orientation: Orientation {
                pitch: flight.pitch,
                yaw: 0.0,
                roll: 0.0,
            },
            engine,
            staging: StagingData {
                current_stage: active + 1,
                total_stages: stages.len(),
                ready_for_separation: overrides.separated_through <= active
                    && stages.ready_for_separation(active, time),
            },
            payload: self
                .structure
                .payload
                .data(time, overrides.payload_deployed),
            structural,
            trajectory: TrajectoryData {
                deviation,
                target_apogee: self.target_apogee,
                current_apogee: orbital_parameters.current_apogee,
            },
            avionics,
            telemetry: link,
            environment: EnvironmentData::from(atmosphere),
            trajectory_history: Vec::new(),
            mission_phase: self.mission_phase(time, overrides),
            orbital_parameters,
        }
    }
}
