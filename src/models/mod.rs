// src/models/mod.rs

pub mod error;
pub mod interceptor;
pub mod solver;
pub mod threat;

pub use error::SolverError;
pub use interceptor::InterceptorPath;
pub use solver::{solve, DegenerateSolution, InterceptResult};
pub use threat::ThreatTrajectory;
