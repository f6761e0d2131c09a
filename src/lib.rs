// src/lib.rs

pub mod config;
pub mod math;
pub mod models;
pub mod simulation;
pub mod utils;

pub use config::ScenarioConfig;
pub use models::{solve, InterceptResult, SolverError};
pub use simulation::{PlaybackError, Phase, PlaybackSnapshot, SimulationSession, TickEvent};
