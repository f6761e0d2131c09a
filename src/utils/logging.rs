// src/utils/logging.rs

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ログ出力の初期化
///
/// `RUST_LOG` が設定されていればそれを優先し、なければ `default_level` を使う。
/// すでに初期化済みの場合は何もしない。
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging("debug");
        init_logging("info");
        tracing::info!("logging initialized");
    }
}
