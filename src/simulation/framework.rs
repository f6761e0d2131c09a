// src/simulation/framework.rs

use tracing::info;

use crate::simulation::{PlaybackError, PlaybackSnapshot, SimulationSession, TickEvent};

/// 1回の tick の記録
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFrame {
    pub tick: usize,
    pub event: Option<TickEvent>,
    pub snapshot: PlaybackSnapshot,
}

/// 外部の描画ループの代わりに、着弾後の保持期間が終わるまで tick を回す
///
/// # 引数
/// - `session`: 再生対象のセッション (Idle / Settled なら開始する)
///
/// # 戻り値
/// - 各 tick のイベントとスナップショット
pub fn run_replay(session: &mut SimulationSession) -> Result<Vec<ReplayFrame>, PlaybackError> {
    session.start();

    let mut frames = Vec::new();
    let mut tick = 0;
    while !session.is_finished() {
        let event = session.tick()?;
        frames.push(ReplayFrame {
            tick,
            event,
            snapshot: session.snapshot(),
        });
        tick += 1;
    }

    info!(ticks = frames.len(), "replay finished");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::simulation::Phase;

    fn session(sample_count: usize, hold_frames: u32) -> SimulationSession {
        let mut config = ScenarioConfig::default();
        config.sample_count = sample_count;
        config.playback.hold_frames = hold_frames;
        SimulationSession::new(config).unwrap()
    }

    #[test]
    fn test_run_replay_frame_count() {
        let mut s = session(10, 4);
        let frames = run_replay(&mut s).unwrap();

        // (N + 1) サンプル + 着弾 + (hold + 1) 脈動
        assert_eq!(frames.len(), 11 + 1 + 5);
        assert!(frames.iter().enumerate().all(|(i, f)| f.tick == i));
        assert!(matches!(frames[11].event, Some(TickEvent::Impact { .. })));
        assert!(frames.last().map_or(false, |f| f.snapshot.phase == Phase::Settled));
    }

    #[test]
    fn test_run_replay_ends_at_intercept_point() {
        let mut s = session(50, 2);
        let frames = run_replay(&mut s).unwrap();
        let last_positions = frames
            .iter()
            .filter_map(|f| match f.event {
                Some(TickEvent::Positions { positions, .. }) => Some(positions),
                _ => None,
            })
            .last()
            .unwrap();
        assert_eq!(last_positions.threat, s.result().intercept_point);
    }

    #[test]
    fn test_run_replay_after_finish_restarts() {
        let mut s = session(5, 1);
        let first = run_replay(&mut s).unwrap();
        let second = run_replay(&mut s).unwrap();
        assert_eq!(first, second);
    }
}
