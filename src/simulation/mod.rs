// src/simulation/mod.rs

pub mod csv;
pub mod error;
pub mod framework;
pub mod load_parameters;
pub mod playback;

use crate::config::ScenarioConfig;
use crate::models::{solve, InterceptResult, SolverError};

pub use error::PlaybackError;
pub use playback::{FramePositions, Phase, PlaybackController, PlaybackSnapshot, PlaybackState, TickEvent};

/// 1シナリオ分のシミュレーション (設定・迎撃解・再生状態) を所有する
///
/// 呼び出し側が生成して保持する。プロセス全体で共有される状態は持たない。
#[derive(Debug, Clone)]
pub struct SimulationSession {
    config: ScenarioConfig,
    controller: PlaybackController,
}

impl SimulationSession {
    /// シナリオを解いてセッションを作る (再生状態は Idle / frame 0)
    pub fn new(config: ScenarioConfig) -> Result<Self, SolverError> {
        let result = solve(&config)?;
        let controller = PlaybackController::new(result, config.playback.clone());
        Ok(SimulationSession { config, controller })
    }

    /// 新しいシナリオに差し替える
    ///
    /// 解と再生状態も作り直す。解けなかった場合は現在のセッションをそのまま残す。
    pub fn load(&mut self, config: ScenarioConfig) -> Result<(), SolverError> {
        *self = SimulationSession::new(config)?;
        Ok(())
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn result(&self) -> &InterceptResult {
        self.controller.result()
    }

    pub fn state(&self) -> &PlaybackState {
        self.controller.state()
    }

    pub fn start(&mut self) -> bool {
        self.controller.start()
    }

    pub fn tick(&mut self) -> Result<Option<TickEvent>, PlaybackError> {
        self.controller.tick()
    }

    pub fn reset(&mut self) -> FramePositions {
        self.controller.reset()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.snapshot()
    }

    pub fn is_finished(&self) -> bool {
        self.controller.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = SimulationSession::new(ScenarioConfig::default()).unwrap();
        assert_eq!(session.state(), &PlaybackState::default());
        assert_eq!(session.result().sample_count(), 200);
        assert_eq!(session.config(), &ScenarioConfig::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ScenarioConfig::default();
        config.interceptor.speed = 0.0;
        assert!(SimulationSession::new(config).is_err());
    }

    #[test]
    fn test_load_replaces_scenario_and_state() {
        let mut session = SimulationSession::new(ScenarioConfig::default()).unwrap();
        session.start();
        session.tick().unwrap();

        let mut config = ScenarioConfig::default();
        config.sample_count = 20;
        session.load(config).unwrap();

        assert_eq!(session.state(), &PlaybackState::default());
        assert_eq!(session.result().sample_count(), 20);
        assert_eq!(session.config().sample_count, 20);
    }

    #[test]
    fn test_failed_load_keeps_current_session() {
        let mut session = SimulationSession::new(ScenarioConfig::default()).unwrap();
        session.start();
        session.tick().unwrap();

        let mut config = ScenarioConfig::default();
        config.search.step = 0.0;
        assert!(session.load(config).is_err());

        assert_eq!(session.state().phase, Phase::Running);
        assert_eq!(session.state().current_frame, 1);
        assert_eq!(session.config(), &ScenarioConfig::default());
    }

    #[test]
    fn test_session_delegates_playback() {
        let mut config = ScenarioConfig::default();
        config.sample_count = 3;
        config.playback.hold_frames = 1;
        let mut session = SimulationSession::new(config).unwrap();

        assert!(session.tick().is_err());
        assert!(session.start());
        let mut ticks = 0;
        while !session.is_finished() {
            session.tick().unwrap();
            ticks += 1;
        }
        // 4 サンプル + 着弾 + 保持 2 フレーム
        assert_eq!(ticks, 4 + 1 + 2);
        assert_eq!(session.snapshot().phase, Phase::Settled);

        let positions = session.reset();
        assert_eq!(positions.threat, session.result().threat_samples[0]);
    }
}
