// src/simulation/load_parameters.rs

use std::error::Error;
use std::fs::File;
use serde::de::DeserializeOwned;
use serde_yaml::from_reader;

use crate::config::ScenarioConfig;

/// YAMLファイルの読み込み
pub fn load_yaml<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn Error>> {
    let file = File::open(path)?;
    let data: T = from_reader(file)?;
    Ok(data)
}

/// シナリオの読み込み
pub fn load_scenario(path: &str) -> Result<ScenarioConfig, Box<dyn Error>> {
    load_yaml(path)
}
