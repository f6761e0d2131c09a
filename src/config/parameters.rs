// src/config/parameters.rs

use serde::{Deserialize, Serialize};

use crate::math::Vector3;

/// 迎撃ミサイルのパラメータ
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct InterceptorParameters {
    pub launch_site: Vector3, // 発射地点 [x, y, z] (m)
    pub speed: f64,           // 一定速度 (m/s)
}

impl Default for InterceptorParameters {
    fn default() -> Self {
        InterceptorParameters {
            launch_site: [50.0, 20.0, 0.0],
            speed: 120.0,
        }
    }
}

/// 迎撃時刻の探索方法
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// 固定刻みの線形走査で |残差| 最小の時刻を選ぶ
    #[default]
    GridScan,
    /// 走査で見つけた最初の符号反転区間を二分法で詰める
    Bisection,
}

/// 迎撃時刻探索のパラメータ
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchParameters {
    pub upper_bound: f64,        // 探索区間の上限 (s)
    pub step: f64,               // 走査刻み (s)
    pub residual_tolerance: f64, // これを超える残差は縮退解として報告する (m)
    pub method: SearchMethod,
    pub root_tolerance: f64,     // 二分法の区間幅の収束判定 (s)
    pub max_iterations: u32,     // 二分法の最大反復回数
}

impl Default for SearchParameters {
    fn default() -> Self {
        SearchParameters {
            // 脅威が地表 (z=0) に達するおおよその時刻 + 5 s
            upper_bound: (400.0_f64 / 4.9).sqrt() + 5.0,
            step: 0.01,
            residual_tolerance: 0.5,
            method: SearchMethod::GridScan,
            root_tolerance: 1e-9,
            max_iterations: 64,
        }
    }
}

/// 再生 (プレイバック) のパラメータ
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlaybackParameters {
    pub hold_frames: u32,     // 着弾後に脈動表示を続けるフレーム数
    pub frame_interval: f64,  // 1フレームあたりの経過時間 (s)
    pub pulse_base: f64,      // 脈動強度の中心値
    pub pulse_amplitude: f64, // 脈動強度の振幅
    pub pulse_rate: f64,      // 脈動の角速度 (rad/s)
}

impl Default for PlaybackParameters {
    fn default() -> Self {
        PlaybackParameters {
            hold_frames: 60,
            frame_interval: 1.0 / 60.0,
            pulse_base: 0.3,
            pulse_amplitude: 0.4,
            pulse_rate: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_upper_bound_matches_ground_time() {
        let search = SearchParameters::default();
        assert_relative_eq!(search.upper_bound, (400.0_f64 / 4.9).sqrt() + 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = "step: 0.05\nmethod: bisection\n";
        let search: SearchParameters = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(search.step, 0.05);
        assert_eq!(search.method, SearchMethod::Bisection);
        assert_eq!(search.max_iterations, 64);
    }

    #[test]
    fn test_playback_defaults() {
        let playback = PlaybackParameters::default();
        assert_eq!(playback.hold_frames, 60);
        assert_relative_eq!(playback.pulse_base, 0.3);
        assert_relative_eq!(playback.pulse_amplitude, 0.4);
    }
}
