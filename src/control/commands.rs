use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::propulsion::EngineStatus;
use crate::errors::SimulationError;

pub const ABORT_PHASE: &str = "abort";
pub const EMERGENCY_LANDING_PHASE: &str = "emergency_landing";

const EMERGENCY_PREFIX: &str = "emergency:";
const THROTTLE_PREFIX: &str = "throttle:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyScenario {
    EngineFailure,
    FuelLeak,
    GuidanceFailure,
    StructuralStress,
    WeatherAbort,
    RangeSafety,
}

impl EmergencyScenario {
    pub fn id(&self) -> &'static str {
        match self {
            EmergencyScenario::EngineFailure => "engine_failure",
            EmergencyScenario::FuelLeak => "fuel_leak",
            EmergencyScenario::GuidanceFailure => "guidance_failure",
            EmergencyScenario::StructuralStress => "structural_stress",
            EmergencyScenario::WeatherAbort => "weather_abort",
            EmergencyScenario::RangeSafety => "range_safety",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "engine_failure" => Some(EmergencyScenario::EngineFailure),
            "fuel_leak" => Some(EmergencyScenario::FuelLeak),
            "guidance_failure" => Some(EmergencyScenario::GuidanceFailure),
            "structural_stress" => Some(EmergencyScenario::StructuralStress),
            "weather_abort" => Some(EmergencyScenario::WeatherAbort),
            "range_safety" => Some(EmergencyScenario::RangeSafety),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyResponse {
    BackupEngine,
    EmergencyLanding,
    IsolateFuelLines,
    BackupGuidance,
    ReduceThrust,
    Abort,
}

impl EmergencyResponse {
    pub fn resolve(scenario: EmergencyScenario, action: &str) -> Option<Self> {
        let action = action.trim();
        match (scenario, action) {
            (EmergencyScenario::EngineFailure, "Switch to Backup Engine") => {
                Some(EmergencyResponse::BackupEngine)
            }
            (EmergencyScenario::EngineFailure, "Emergency Landing") => {
                Some(EmergencyResponse::EmergencyLanding)
            }
            (EmergencyScenario::FuelLeak, "Isolate Fuel Lines") => {
                Some(EmergencyResponse::IsolateFuelLines)
            }
            (EmergencyScenario::GuidanceFailure, "Switch to Backup Guidance") => {
                Some(EmergencyResponse::BackupGuidance)
            }
            (EmergencyScenario::StructuralStress, "Reduce Thrust") => {
                Some(EmergencyResponse::ReduceThrust)
            }
            (_, action) => {
                let lowered = action.to_lowercase();
                if lowered.contains("abort") || lowered.contains("termination") {
                    Some(EmergencyResponse::Abort)
                } else {
                    None
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RocketCommand {
    EngineStart,
    EngineStop,
    // Percent, clamped to [0, 100]
    ThrottleSet { value: f64 },
    StageSeparate,
    PayloadDeploy,
    Abort,
    Emergency {
        scenario: EmergencyScenario,
        action: String,
    },
}

impl RocketCommand {
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromStr for RocketCommand {
    type Err = SimulationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();

        if let Some(rest) = token.strip_prefix(EMERGENCY_PREFIX) {
            let (id, action) = rest.split_once(": ").ok_or_else(|| {
                SimulationError::CommandError(format!("malformed emergency command: {token}"))
            })?;
            let scenario = EmergencyScenario::from_id(id.trim()).ok_or_else(|| {
                SimulationError::CommandError(format!("unknown emergency scenario: {id}"))
            })?;
            return Ok(RocketCommand::Emergency {
                scenario,
                action: action.to_string(),
            });
        }

        if let Some(value) = token.strip_prefix(THROTTLE_PREFIX) {
            let invalid =
                || SimulationError::CommandError(format!("invalid throttle value: {value}"));
            let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            return Ok(RocketCommand::ThrottleSet { value });
        }

        let normalized = token.to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "engine_start" | "start_engine" => Ok(RocketCommand::EngineStart),
            "engine_stop" | "stop_engine" => Ok(RocketCommand::EngineStop),
            "stage_separate" | "separate_stage" => Ok(RocketCommand::StageSeparate),
            "payload_deploy" | "deploy_payload" => Ok(RocketCommand::PayloadDeploy),
            "abort" => Ok(RocketCommand::Abort),
            _ => Err(SimulationError::CommandError(format!(
                "unrecognized command: {token}"
            ))),
        }
    }
}

impl fmt::Display for RocketCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RocketCommand::EngineStart => write!(f, "engine_start"),
            RocketCommand::EngineStop => write!(f, "engine_stop"),
            RocketCommand::ThrottleSet { value } => write!(f, "{THROTTLE_PREFIX}{value}"),
            RocketCommand::StageSeparate => write!(f, "stage_separate"),
            RocketCommand::PayloadDeploy => write!(f, "payload_deploy"),
            RocketCommand::Abort => write!(f, "abort"),
            RocketCommand::Emergency { scenario, action } => {
                write!(f, "{EMERGENCY_PREFIX}{}: {action}", scenario.id())
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommandContext {
    pub time: f64,
    pub current_stage: usize,
    pub total_stages: usize,
    pub current_fuel: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEffect {
    Applied,
    // Applied, and the clock must stop
    Halted,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelCap {
    pub stage: usize,
    pub fuel: f64,
}

// Persists until the engine is rebuilt
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOverrides {
    pub engine_status: Option<EngineStatus>,
    pub thrust_multiplier: f64,
    pub throttle: f64,
    pub fuel_cap: Option<FuelCap>,
    pub pitch_offset: f64,
    pub phase_override: Option<String>,
    pub separated_through: usize,
    pub payload_deployed: bool,
    pub aborted: bool,
}

impl Default for CommandOverrides {
    fn default() -> Self {
        CommandOverrides {
            engine_status: None,
            thrust_multiplier: 1.0,
            throttle: 1.0,
            fuel_cap: None,
            pitch_offset: 0.0,
            phase_override: None,
            separated_through: 0,
            payload_deployed: false,
            aborted: false,
        }
    }
}

impl CommandOverrides {
    pub fn thrust_factor(&self) -> f64 {
        if self.aborted {
            0.0
        } else {
            self.thrust_multiplier * self.throttle
        }
    }

    pub fn fuel_cap_for(&self, stage: usize) -> Option<f64> {
        self.fuel_cap
            .filter(|cap| cap.stage == stage)
            .map(|cap| cap.fuel)
    }

    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        command: &RocketCommand,
        context: &CommandContext,
        rng: &mut R,
    ) -> CommandEffect {
        if self.aborted {
            warn!(%command, "mission aborted, command ignored");
            return CommandEffect::Ignored;
        }

        let effect = match command {
            RocketCommand::EngineStart => {
                self.engine_status = None;
                CommandEffect::Applied
            }
            RocketCommand::EngineStop => {
                self.engine_status = Some(EngineStatus::Shutdown);
                CommandEffect::Applied
            }
            RocketCommand::ThrottleSet { value } if !value.is_finite() => {
                warn!(value, "throttle setting must be finite");
                CommandEffect::Ignored
            }
            RocketCommand::ThrottleSet { value } => {
                self.throttle = value.clamp(0.0, 100.0) / 100.0;
                CommandEffect::Applied
            }
            RocketCommand::StageSeparate => {
                if context.current_stage == 0 && context.total_stages > 1 {
                    self.separated_through = 1;
                    CommandEffect::Applied
                } else {
                    warn!(
                        stage = context.current_stage + 1,
                        "stage separation only possible from the first stage"
                    );
                    CommandEffect::Ignored
                }
            }
            RocketCommand::PayloadDeploy => {
                self.payload_deployed = true;
                CommandEffect::Applied
            }
            RocketCommand::Abort => self.abort(),
            RocketCommand::Emergency { scenario, action } => {
                match EmergencyResponse::resolve(*scenario, action) {
                    Some(response) => self.apply_emergency(response, context, rng),
                    None => {
                        warn!(scenario = scenario.id(), action = %action, "unhandled emergency action");
                        CommandEffect::Ignored
                    }
                }
            }
        };

        if effect != CommandEffect::Ignored {
            info!(%command, time = context.time, "command applied");
        }
        effect
    }

    fn abort(&mut self) -> CommandEffect {
        self.aborted = true;
        self.engine_status = Some(EngineStatus::Shutdown);
        self.phase_override = Some(ABORT_PHASE.to_string());
        CommandEffect::Halted
    }

    fn apply_emergency<R: Rng + ?Sized>(
        &mut self,
        response: EmergencyResponse,
        context: &CommandContext,
        rng: &mut R,
    ) -> CommandEffect {
        match response {
            EmergencyResponse::BackupEngine => {
                self.engine_status = Some(EngineStatus::Backup);
                self.thrust_multiplier *= 0.8;
            }
            EmergencyResponse::EmergencyLanding => {
                self.phase_override = Some(EMERGENCY_LANDING_PHASE.to_string());
                self.thrust_multiplier *= 0.3;
            }
            EmergencyResponse::IsolateFuelLines => {
                self.fuel_cap = Some(FuelCap {
                    stage: context.current_stage,
                    fuel: (context.current_fuel * 0.9).max(5.0),
                });
            }
            EmergencyResponse::BackupGuidance => {
                self.pitch_offset += rng.gen_range(-1.0..=1.0);
            }
            EmergencyResponse::ReduceThrust => {
                self.thrust_multiplier *= 0.7;
            }
            EmergencyResponse::Abort => return self.abort(),
        }
        CommandEffect::Applied
    }
}
