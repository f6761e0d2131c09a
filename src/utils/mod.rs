// src/utils/mod.rs

pub mod logging;

pub use logging::init_logging;
