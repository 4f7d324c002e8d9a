pub mod avionics;
pub mod recorder;
pub mod telemetry;
