// src/config/scenario.rs

use serde::{Deserialize, Serialize};

use crate::config::parameters::{InterceptorParameters, PlaybackParameters, SearchParameters};
use crate::models::threat::ThreatTrajectory;

/// 1回分の迎撃シナリオ
///
/// 解の計算前に一度だけ組み立てられ、以後は読み取り専用として扱う。
/// 既定値は基準シナリオ (発射地点 (50, 20, 0)、速度 120 m/s、N = 200) を再現する。
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub threat: ThreatTrajectory,
    pub interceptor: InterceptorParameters,
    pub sample_count: usize, // 軌跡の分割数 N (サンプル数は N + 1)
    pub search: SearchParameters,
    pub playback: PlaybackParameters,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            threat: ThreatTrajectory::default(),
            interceptor: InterceptorParameters::default(),
            sample_count: 200,
            search: SearchParameters::default(),
            playback: PlaybackParameters::default(),
        }
    }
}
