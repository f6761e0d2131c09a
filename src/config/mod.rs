// src/config/mod.rs

pub mod parameters;
pub mod scenario;

pub use parameters::{InterceptorParameters, PlaybackParameters, SearchMethod, SearchParameters};
pub use scenario::ScenarioConfig;
