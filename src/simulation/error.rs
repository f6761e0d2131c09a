// src/simulation/error.rs

use thiserror::Error;

use crate::simulation::playback::Phase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("{phase:?} 状態では {action} を実行できません。")]
    InvalidTransition { phase: Phase, action: &'static str },
}
