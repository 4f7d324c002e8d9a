use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::engine::{SimulationEngine, SimulationOptions};
use crate::config::SimulationConfig;
use crate::control::commands::{CommandEffect, RocketCommand};
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::TelemetryData;

struct Ticker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

pub struct RocketSimulation {
    engine: Arc<Mutex<SimulationEngine>>,
    tick_interval: Duration,
    ticker: Option<Ticker>,
}

impl RocketSimulation {
    pub fn new(config: SimulationConfig, options: SimulationOptions) -> Result<Self, SimulationError> {
        let tick_interval = config.tick_interval();
        let engine = SimulationEngine::new(config, options)?;

        Ok(RocketSimulation {
            engine: Arc::new(Mutex::new(engine)),
            tick_interval,
            ticker: None,
        })
    }

    pub fn start(&mut self) -> Result<(), SimulationError> {
        if self.engine.lock().is_running() && self.ticker.is_some() {
            return Ok(());
        }

        // A ticker left over from an auto-pause or abort has already exited
        self.stop_ticker();
        self.engine.lock().start();

        let (stop, stopped) = mpsc::channel();
        let shared = Arc::clone(&self.engine);
        let tick_interval = self.tick_interval;

        let spawned = thread::Builder::new()
            .name("simulation-clock".to_string())
            .spawn(move || loop {
                match stopped.recv_timeout(tick_interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                let mut engine = shared.lock();
                if !engine.is_running() {
                    break;
                }
                engine.update();
                if !engine.is_running() {
                    debug!("clock thread exiting");
                    break;
                }
            });

        match spawned {
            Ok(handle) => {
                self.ticker = Some(Ticker { stop, handle });
                Ok(())
            }
            Err(err) => {
                self.engine.lock().pause();
                Err(SimulationError::SystemError(format!(
                    "failed to spawn clock thread: {err}"
                )))
            }
        }
    }

    // No callback fires after this returns
    pub fn pause(&mut self) {
        self.engine.lock().pause();
        self.stop_ticker();
    }

    pub fn set_time(&self, time: f64) {
        self.engine.lock().set_time(time);
    }

    pub fn set_speed(&self, speed: f64) {
        self.engine.lock().set_speed(speed);
    }

    pub fn send_command(&self, token: &str) -> CommandEffect {
        self.engine.lock().send_command(token)
    }

    pub fn dispatch(&self, command: RocketCommand) -> CommandEffect {
        self.engine.lock().dispatch(command)
    }

    pub fn cleanup(&mut self) {
        self.pause();
        info!("simulation cleaned up");
    }

    pub fn snapshot(&self) -> Option<TelemetryData> {
        self.engine.lock().snapshot().cloned()
    }

    pub fn current_time(&self) -> f64 {
        self.engine.lock().current_time()
    }

    pub fn speed(&self) -> f64 {
        self.engine.lock().speed()
    }

    pub fn is_running(&self) -> bool {
        self.engine.lock().is_running()
    }

    pub fn with_engine<T>(&self, f: impl FnOnce(&mut SimulationEngine) -> T) -> T {
        f(&mut self.engine.lock())
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            // The thread may already be gone after an auto-pause
            let _ = ticker.stop.send(());
            if ticker.handle.join().is_err() {
                warn!("clock thread panicked");
            }
        }
    }
}

impl Drop for RocketSimulation {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::Receiver;

    fn fast_simulation() -> (RocketSimulation, Receiver<f64>) {
        let (sender, receiver) = mpsc::channel();
        let options = SimulationOptions::new(move |data: &TelemetryData| {
            let _ = sender.send(data.timestamp);
        });
        let config = SimulationConfig {
            tick_interval_ms: 1,
            ..SimulationConfig::default().with_seed(3)
        };
        (RocketSimulation::new(config, options).unwrap(), receiver)
    }

    #[test]
    fn test_ticks_while_running() {
        let (mut simulation, receiver) = fast_simulation();
        simulation.start().unwrap();
        assert!(simulation.is_running());

        let first = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(second > first);

        simulation.cleanup();
        assert!(!simulation.is_running());
    }

    #[test]
    fn test_no_callbacks_after_pause() {
        let (mut simulation, receiver) = fast_simulation();
        simulation.start().unwrap();
        receiver.recv_timeout(Duration::from_secs(5)).unwrap();

        simulation.pause();
        simulation.pause();
        let _ = receiver.try_iter().count();
        let paused_at = simulation.current_time();

        thread::sleep(Duration::from_millis(30));
        assert_eq!(receiver.try_iter().count(), 0);
        assert_eq!(simulation.current_time(), paused_at);
    }

    #[test]
    fn test_restart_after_pause() {
        let (mut simulation, receiver) = fast_simulation();
        simulation.start().unwrap();
        simulation.start().unwrap();
        receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        simulation.pause();
        let _ = receiver.try_iter().count();

        simulation.start().unwrap();
        let resumed = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(resumed > 0.0);
        simulation.cleanup();
        simulation.cleanup();
    }

    #[test]
    fn test_abort_stops_the_clock() {
        let (mut simulation, receiver) = fast_simulation();
        simulation.start().unwrap();
        receiver.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(simulation.send_command("abort"), CommandEffect::Halted);
        assert!(!simulation.is_running());
        assert!(simulation.with_engine(|engine| engine.is_aborted()));

        simulation.set_time(50.0);
        let data = simulation.snapshot().unwrap();
        assert_eq!(data.mission_phase, "abort");
        assert_eq!(data.engine.thrust, 0.0);
        simulation.cleanup();
    }
}
