// src/models/threat.rs

use serde::{Deserialize, Serialize};

use crate::math::Vector3;

/// 脅威 (弾道ミサイル) の軌道
///
/// 水平速度一定、鉛直方向は重力のみの放物線軌道。
/// P(t) = p0 + (vx t, vy t, -1/2 g t^2)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ThreatTrajectory {
    pub initial_position: Vector3,    // 初期位置 [x, y, z] (m)
    pub horizontal_velocity: [f64; 2], // 水平速度 [vx, vy] (m/s)
    pub gravitational_accel: f64,     // 重力加速度 (m/s^2)
}

impl Default for ThreatTrajectory {
    fn default() -> Self {
        ThreatTrajectory {
            initial_position: [250.0, 300.0, 400.0],
            horizontal_velocity: [-20.0, -25.0],
            gravitational_accel: 9.8,
        }
    }
}

impl ThreatTrajectory {
    /// 時刻 t における位置を返す純粋な関数
    ///
    /// # 引数
    /// - `t`: 発射からの経過時間 (s)
    ///
    /// # 戻り値
    /// - 位置 [x, y, z]
    pub fn position_at(&self, t: f64) -> Vector3 {
        [
            self.initial_position[0] + self.horizontal_velocity[0] * t,
            self.initial_position[1] + self.horizontal_velocity[1] * t,
            self.initial_position[2] - 0.5 * self.gravitational_accel * t * t,
        ]
    }

    /// 高度が z = 0 に達する時刻 (初期高度が負なら None)
    pub fn ground_time(&self) -> Option<f64> {
        let z0 = self.initial_position[2];
        if z0 < 0.0 {
            return None;
        }
        if self.gravitational_accel <= 0.0 {
            return if z0 == 0.0 { Some(0.0) } else { None };
        }
        Some((2.0 * z0 / self.gravitational_accel).sqrt())
    }

    /// 最初に見つかった非有限の構成要素 (すべて有限なら`None`)
    pub fn first_non_finite(&self) -> Option<f64> {
        crate::math::vector::first_non_finite(&self.initial_position)
            .or_else(|| self.horizontal_velocity.iter().copied().find(|v| !v.is_finite()))
            .or_else(|| Some(self.gravitational_accel).filter(|g| !g.is_finite()))
    }
}
