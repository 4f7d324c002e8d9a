use serde::{Deserialize, Serialize};

use crate::constants::STAGE_SEPARATION_MARGIN;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RocketStage {
    pub name: String,
    pub dry_mass: f64,         // kg
    pub propellant_mass: f64,  // kg
    pub thrust: f64,           // N
    pub specific_impulse: f64, // s
    pub burn_time: f64,        // s
    // Jettisoned before the run starts
    #[serde(default)]
    pub separated: bool,
}

impl RocketStage {
    pub fn new(
        name: &str,
        dry_mass: f64,
        propellant_mass: f64,
        thrust: f64,
        specific_impulse: f64,
        burn_time: f64,
    ) -> Self {
        RocketStage {
            name: name.to_string(),
            dry_mass,
            propellant_mass,
            thrust,
            specific_impulse,
            burn_time,
            separated: false,
        }
    }

    pub fn get_total_mass(&self) -> f64 {
        self.dry_mass + self.propellant_mass
    }

    // Burn time plus the coast before the next stage
    pub fn window(&self) -> f64 {
        self.burn_time + STAGE_SEPARATION_MARGIN
    }

    pub fn propellant_flow_rate(&self) -> f64 {
        self.propellant_mass / self.burn_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageStatus {
    Pending,
    Burning { progress: f64 },
    BurnedOut,
    Separated,
}

#[derive(Debug, Clone)]
pub struct StageSequence {
    stages: Vec<RocketStage>,
}

impl StageSequence {
    pub fn new(stages: Vec<RocketStage>) -> Self {
        StageSequence { stages }
    }

    pub fn stages(&self) -> &[RocketStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn get(&self, index: usize) -> Option<&RocketStage> {
        self.stages.get(index)
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.stages.len()
    }

    pub fn current_stage(&self, time: f64) -> usize {
        let mut window_end = 0.0;
        for (index, stage) in self.stages.iter().enumerate() {
            window_end += stage.window();
            if time < window_end {
                return index;
            }
        }
        self.stages.len().saturating_sub(1)
    }

    pub fn stage_start_time(&self, index: usize) -> f64 {
        self.stages.iter().take(index).map(RocketStage::window).sum()
    }

    pub fn burn_progress(&self, index: usize, time: f64) -> f64 {
        match self.stages.get(index) {
            Some(stage) => {
                let elapsed = time - self.stage_start_time(index);
                (elapsed / stage.burn_time).clamp(0.0, 1.0)
            }
            None => 0.0,
        }
    }

    pub fn is_burning(&self, index: usize, time: f64) -> bool {
        matches!(self.status(index, time), StageStatus::Burning { .. })
    }

    // The final stage is never jettisoned
    pub fn status(&self, index: usize, time: f64) -> StageStatus {
        let stage = match self.stages.get(index) {
            Some(stage) => stage,
            None => return StageStatus::Separated,
        };
        if stage.separated {
            return StageStatus::Separated;
        }

        let start = self.stage_start_time(index);
        let burnout = start + stage.burn_time;

        if time < start {
            StageStatus::Pending
        } else if time < burnout {
            StageStatus::Burning {
                progress: (time - start) / stage.burn_time,
            }
        } else if time < start + stage.window() || self.is_last(index) {
            StageStatus::BurnedOut
        } else {
            StageStatus::Separated
        }
    }

    pub fn ready_for_separation(&self, index: usize, time: f64) -> bool {
        !self.is_last(index) && self.status(index, time) == StageStatus::BurnedOut
    }
}
