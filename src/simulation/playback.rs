// src/simulation/playback.rs

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PlaybackParameters;
use crate::math::Vector3;
use crate::models::InterceptResult;
use crate::simulation::error::PlaybackError;

/// 再生フェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Settled,
}

/// 表示中の両ミサイルの位置
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FramePositions {
    pub threat: Vector3,
    pub interceptor: Vector3,
}

/// 再生の可変状態 (コントローラのみが所有・更新する)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    pub phase: Phase,
    pub current_frame: usize,
    pub settled_frame_count: u64, // hold_frames (u32) + 1 まで数えるため u64
}

/// tick ごとに表示層へ渡すイベント
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TickEvent {
    /// サンプル `frame` の位置
    Positions {
        frame: usize,
        time: f64,
        positions: FramePositions,
    },
    /// 迎撃点への到達 (Settled への遷移時に一度だけ)
    Impact { point: Vector3 },
    /// 着弾後の脈動強度 (見た目のみ)
    Pulse { intensity: f64 },
}

/// 表示層が毎フレーム描画に使う読み取り専用のスナップショット
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub phase: Phase,
    pub frame: usize,
    pub time: f64,
    pub positions: FramePositions,
    pub impact_visible: bool,
    pub impact_intensity: f64,
    pub trails_visible: bool,
}

/// 事前計算済みの迎撃解をフレーム単位で再生する状態機械
///
/// Idle → Running → Settled と進み、`reset` で Idle に戻る。
/// Settled から自動で Idle に戻ることはない。
#[derive(Debug, Clone)]
pub struct PlaybackController {
    result: InterceptResult,
    params: PlaybackParameters,
    state: PlaybackState,
    positions: FramePositions,
    displayed_frame: usize, // positions が表すサンプル番号
    time: f64,
    impact_visible: bool,
    impact_intensity: f64,
    trails_visible: bool,
}

impl PlaybackController {
    pub fn new(result: InterceptResult, params: PlaybackParameters) -> Self {
        let positions = initial_positions(&result);
        PlaybackController {
            result,
            params,
            state: PlaybackState::default(),
            positions,
            displayed_frame: 0,
            time: 0.0,
            impact_visible: false,
            impact_intensity: 0.0,
            trails_visible: false,
        }
    }

    pub fn result(&self) -> &InterceptResult {
        &self.result
    }

    pub fn params(&self) -> &PlaybackParameters {
        &self.params
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// 再生を開始する
    ///
    /// Idle または Settled から Running へ遷移し、位置を先頭サンプルに戻す。
    /// Running 中の呼び出しは何もしない (二重トリガー対策)。
    ///
    /// # 戻り値
    /// - 開始した場合は`true`、すでに Running だった場合は`false`
    pub fn start(&mut self) -> bool {
        if self.state.phase == Phase::Running {
            warn!(frame = self.state.current_frame, "start ignored, playback already running");
            return false;
        }

        self.state = PlaybackState {
            phase: Phase::Running,
            current_frame: 0,
            settled_frame_count: 0,
        };
        self.show_initial_positions();
        self.trails_visible = true;
        info!(frames = self.result.sample_count() + 1, "playback started");
        true
    }

    /// 1フレーム進める
    ///
    /// # 戻り値
    /// - 表示層へのイベント。保持期間を過ぎた Settled では`None` (何もしない)
    /// - Idle で呼ばれた場合は `PlaybackError::InvalidTransition`
    pub fn tick(&mut self) -> Result<Option<TickEvent>, PlaybackError> {
        match self.state.phase {
            Phase::Idle => Err(PlaybackError::InvalidTransition {
                phase: Phase::Idle,
                action: "tick",
            }),
            Phase::Running => Ok(Some(self.advance())),
            Phase::Settled => Ok(self.hold()),
        }
    }

    /// 初期状態へ戻す (どの状態からでも可)
    ///
    /// # 戻り値
    /// - 先頭サンプルの位置
    pub fn reset(&mut self) -> FramePositions {
        self.state = PlaybackState::default();
        self.show_initial_positions();
        self.trails_visible = false;
        info!("playback reset");
        self.positions
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            phase: self.state.phase,
            frame: self.displayed_frame,
            time: self.time,
            positions: self.positions,
            impact_visible: self.impact_visible,
            impact_intensity: self.impact_intensity,
            trails_visible: self.trails_visible,
        }
    }

    /// 着弾後の保持期間が終わり、これ以上 tick しても変化しないか
    pub fn is_finished(&self) -> bool {
        self.state.phase == Phase::Settled && self.hold_elapsed()
    }

    /// 着弾後 `settled_frames` フレーム目の脈動強度
    ///
    /// 経過時間はフレーム数から求めるため、実時間には依存しない。
    pub fn pulse_intensity(&self, settled_frames: u64) -> f64 {
        let elapsed = settled_frames as f64 * self.params.frame_interval;
        self.params.pulse_base + self.params.pulse_amplitude * (self.params.pulse_rate * elapsed).sin()
    }

    fn advance(&mut self) -> TickEvent {
        let frame = self.state.current_frame;
        if frame <= self.result.sample_count() {
            self.positions = FramePositions {
                threat: self.result.threat_samples[frame],
                interceptor: self.result.interceptor_samples[frame],
            };
            self.time = self.result.sample_times[frame];
            self.displayed_frame = frame;
            self.state.current_frame += 1;
            debug!(frame, time = self.time, "frame advanced");
            return TickEvent::Positions {
                frame,
                time: self.time,
                positions: self.positions,
            };
        }

        self.state.phase = Phase::Settled;
        self.state.settled_frame_count = 0;
        self.impact_visible = true;
        self.impact_intensity = self.pulse_intensity(0);
        info!(time = self.result.intercept_time, "intercept point reached");
        TickEvent::Impact {
            point: self.result.intercept_point,
        }
    }

    fn hold_elapsed(&self) -> bool {
        self.state.settled_frame_count > u64::from(self.params.hold_frames)
    }

    fn hold(&mut self) -> Option<TickEvent> {
        if self.hold_elapsed() {
            return None;
        }

        self.state.settled_frame_count += 1;
        self.impact_intensity = self.pulse_intensity(self.state.settled_frame_count);
        if self.hold_elapsed() {
            debug!("impact hold finished");
        }
        Some(TickEvent::Pulse {
            intensity: self.impact_intensity,
        })
    }

    fn show_initial_positions(&mut self) {
        self.positions = initial_positions(&self.result);
        self.displayed_frame = 0;
        self.time = 0.0;
        self.impact_visible = false;
        self.impact_intensity = 0.0;
    }
}

fn initial_positions(result: &InterceptResult) -> FramePositions {
    FramePositions {
        threat: result.threat_samples[0],
        interceptor: result.interceptor_samples[0],
    }
}
