pub mod commands;
pub mod environment;
pub mod launch_stages;
pub mod mission;
pub mod payload;
pub mod propulsion;
pub mod structure;
