pub mod clock;
pub mod engine;
pub mod generator;
pub mod state;
