use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use super::generator::TelemetryGenerator;
use super::state::SimulationState;
use crate::config::SimulationConfig;
use crate::control::commands::{CommandContext, CommandEffect, RocketCommand};
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::TelemetryData;
use crate::utils::vector3d::Vector3D;

pub type TelemetryCallback = Box<dyn FnMut(&TelemetryData) + Send>;
pub type ErrorCallback = Box<dyn FnMut(&SimulationError) + Send>;

pub struct SimulationOptions {
    pub on_telemetry_update: TelemetryCallback,
    // The core never reports errors itself
    pub on_error: Option<ErrorCallback>,
}

impl SimulationOptions {
    pub fn new<F>(on_telemetry_update: F) -> Self
    where
        F: FnMut(&TelemetryData) + Send + 'static,
    {
        SimulationOptions {
            on_telemetry_update: Box::new(on_telemetry_update),
            on_error: None,
        }
    }

    pub fn with_error_handler<F>(mut self, on_error: F) -> Self
    where
        F: FnMut(&SimulationError) + Send + 'static,
    {
        self.on_error = Some(Box::new(on_error));
        self
    }

    pub fn silent() -> Self {
        Self::new(|_| {})
    }
}

pub struct SimulationEngine {
    config: SimulationConfig,
    generator: TelemetryGenerator,
    rng: StdRng,
    state: SimulationState,
    options: SimulationOptions,
    latest: Option<TelemetryData>,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig, options: SimulationOptions) -> Result<Self, SimulationError> {
        let generator = TelemetryGenerator::new(&config)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(
            stages = config.stages.len(),
            max_time = config.max_time,
            seed = ?config.seed,
            "simulation engine created"
        );

        Ok(SimulationEngine {
            config,
            generator,
            rng,
            state: SimulationState::new(),
            options,
            latest: None,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn generator(&self) -> &TelemetryGenerator {
        &self.generator
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    pub fn max_time(&self) -> f64 {
        self.config.max_time
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_aborted(&self) -> bool {
        self.state.overrides.aborted
    }

    pub fn start(&mut self) -> bool {
        if self.state.running {
            return false;
        }
        self.state.running = true;
        info!(time = self.state.current_time, "simulation started");
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        info!(time = self.state.current_time, "simulation paused");
        true
    }

    // Unbounded; negative speed runs time backwards down to zero
    pub fn set_speed(&mut self, speed: f64) {
        self.state.speed = speed;
        info!(speed, "playback speed changed");
    }

    // Emits even while paused
    pub fn set_time(&mut self, time: f64) {
        let clamped = time.clamp(0.0, self.config.max_time);
        self.state.current_time = if clamped.is_nan() { 0.0 } else { clamped };
        info!(time = self.state.current_time, "mission time set");
        self.emit();
    }

    pub fn update(&mut self) {
        if !self.state.running {
            return;
        }

        let next = self.state.current_time + self.config.time_step * self.state.speed;
        self.state.current_time = next.max(0.0);

        if self.state.current_time >= self.config.max_time {
            self.state.running = false;
            self.state.current_time = self.config.max_time;
            info!(time = self.state.current_time, "end of mission reached, simulation paused");
        }

        trace!(time = self.state.current_time, "tick");
        self.emit();
    }

    pub fn send_command(&mut self, token: &str) -> CommandEffect {
        match token.parse::<RocketCommand>() {
            Ok(command) => self.dispatch(command),
            Err(err) => {
                warn!(token, error = %err, "command ignored");
                CommandEffect::Ignored
            }
        }
    }

    pub fn dispatch(&mut self, command: RocketCommand) -> CommandEffect {
        let time = self.state.current_time;
        let context = CommandContext {
            time,
            current_stage: self.generator.active_stage(time, &self.state.overrides),
            total_stages: self.generator.stages().len(),
            current_fuel: self.generator.current_fuel(time, &self.state.overrides),
        };

        let effect = self.state.overrides.apply(&command, &context, &mut self.rng);
        if effect == CommandEffect::Halted {
            self.state.running = false;
            info!(time, "simulation halted by command");
        }
        effect
    }

    // No history recorded and no callback, but the rng advances
    pub fn generate(&mut self) -> TelemetryData {
        let time = self.state.current_time;
        let mut data = self
            .generator
            .generate(time, &self.state.overrides, &mut self.rng);
        data.trajectory_history = self.state.trajectory_history.clone();
        data
    }

    pub fn snapshot(&self) -> Option<&TelemetryData> {
        self.latest.as_ref()
    }

    pub fn trajectory_history(&self) -> &[Vector3D] {
        &self.state.trajectory_history
    }

    pub fn report_error(&mut self, error: &SimulationError) {
        warn!(%error, "simulation error");
        if let Some(on_error) = self.options.on_error.as_mut() {
            on_error(error);
        }
    }

    fn emit(&mut self) {
        let time = self.state.current_time;
        let mut data = self
            .generator
            .generate(time, &self.state.overrides, &mut self.rng);

        self.state.record_trajectory(time, data.position.vector);
        data.trajectory_history = self.state.trajectory_history.clone();

        (self.options.on_telemetry_update)(&data);
        self.latest = Some(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::propulsion::EngineStatus;
    use approx::assert_abs_diff_eq;
    use std::sync::mpsc;

    fn seeded_engine() -> SimulationEngine {
        SimulationEngine::new(SimulationConfig::default().with_seed(42), SimulationOptions::silent())
            .unwrap()
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = seeded_engine();
        assert_eq!(engine.current_time(), 0.0);
        assert_eq!(engine.speed(), 1.0);
        assert!(!engine.is_running());
        assert!(engine.snapshot().is_none());
        assert!(engine.trajectory_history().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimulationConfig {
            time_step: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            SimulationEngine::new(config, SimulationOptions::silent()),
            Err(SimulationError::InitializationError(_))
        ));
    }

    #[test]
    fn test_update_requires_running() {
        let mut engine = seeded_engine();
        engine.update();
        assert_eq!(engine.current_time(), 0.0);
        assert!(engine.snapshot().is_none());

        assert!(engine.start());
        assert!(!engine.start());
        engine.update();
        assert_abs_diff_eq!(engine.current_time(), 0.1, epsilon = 1e-12);
        assert!(engine.snapshot().is_some());
    }

    #[test]
    fn test_speed_scales_time_step() {
        let mut engine = seeded_engine();
        engine.start();
        engine.set_speed(10.0);
        engine.update();
        assert_abs_diff_eq!(engine.current_time(), 1.0, epsilon = 1e-12);

        engine.set_speed(0.0);
        engine.update();
        assert_abs_diff_eq!(engine.current_time(), 1.0, epsilon = 1e-12);

        engine.set_speed(-50.0);
        engine.update();
        assert_eq!(engine.current_time(), 0.0);
    }

    #[test]
    fn test_set_time_clamps_and_emits() {
        let (sender, receiver) = mpsc::channel();
        let options = SimulationOptions::new(move |data: &TelemetryData| {
            let _ = sender.send(data.timestamp);
        });
        let mut engine =
            SimulationEngine::new(SimulationConfig::default().with_seed(1), options).unwrap();

        engine.set_time(-20.0);
        engine.set_time(10_000.0);
        engine.set_time(123.4);

        let emitted: Vec<f64> = receiver.try_iter().collect();
        assert_eq!(emitted, vec![0.0, 600.0, 123.4]);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_auto_pause_at_max_time() {
        let mut engine = seeded_engine();
        engine.set_time(599.95);
        engine.start();
        engine.update();

        assert!(!engine.is_running());
        assert_eq!(engine.current_time(), 600.0);
        assert_eq!(engine.snapshot().map(|data| data.timestamp), Some(600.0));
    }

    #[test]
    fn test_abort_halts_the_clock() {
        let mut engine = seeded_engine();
        engine.start();
        engine.update();

        assert_eq!(engine.send_command("abort"), CommandEffect::Halted);
        assert!(!engine.is_running());
        assert!(engine.is_aborted());

        engine.set_time(100.0);
        let data = engine.snapshot().unwrap();
        assert_eq!(data.engine.thrust, 0.0);
        assert_eq!(data.engine.status, EngineStatus::Shutdown);
        assert_eq!(data.mission_phase, "abort");
    }

    #[test]
    fn test_unrecognized_command_changes_nothing() {
        let mut engine = seeded_engine();
        let before = engine.state().overrides.clone();
        assert_eq!(engine.send_command("warp_drive"), CommandEffect::Ignored);
        assert_eq!(engine.state().overrides, before);
    }

    #[test]
    fn test_snapshot_carries_history() {
        let mut engine = seeded_engine();
        engine.start();
        for _ in 0..25 {
            engine.update();
        }
        let data = engine.snapshot().unwrap();
        assert_eq!(data.trajectory_history.len(), engine.trajectory_history().len());
        assert_eq!(engine.trajectory_history().len(), 2);
    }

    #[test]
    fn test_error_hook_receives_reports() {
        let (sender, receiver) = mpsc::channel();
        let options = SimulationOptions::silent().with_error_handler(move |err: &SimulationError| {
            let _ = sender.send(err.to_string());
        });
        let mut engine = SimulationEngine::new(SimulationConfig::default(), options).unwrap();

        engine.report_error(&SimulationError::SystemError("ticker stalled".to_string()));
        let reported: Vec<String> = receiver.try_iter().collect();
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains("ticker stalled"));
    }
}
