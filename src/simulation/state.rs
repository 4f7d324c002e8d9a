use crate::control::commands::CommandOverrides;
use crate::utils::vector3d::Vector3D;

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub current_time: f64,
    pub speed: f64,
    pub running: bool,
    pub trajectory_history: Vec<Vector3D>,
    pub overrides: CommandOverrides,
}

impl SimulationState {
    pub fn new() -> Self {
        SimulationState {
            current_time: 0.0,
            speed: 1.0,
            running: false,
            trajectory_history: Vec::new(),
            overrides: CommandOverrides::default(),
        }
    }

    // History never shrinks, so a backward seek appends until time catches up
    pub fn record_trajectory(&mut self, time: f64, position: Vector3D) -> bool {
        if time.floor() != self.trajectory_history.len() as f64 {
            self.trajectory_history.push(position);
            true
        } else {
            false
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}
