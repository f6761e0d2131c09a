// src/models/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("シナリオ設定が不正です: {field} = {value} ({reason})")]
    InvalidConfiguration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl SolverError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        SolverError::InvalidConfiguration { field, value, reason }
    }
}
