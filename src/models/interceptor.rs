// src/models/interceptor.rs

use crate::math::{vector_add, vector_normalize, vector_scale, vector_sub, Vector3};

/// 迎撃ミサイルの直線飛行経路
///
/// 迎撃点と迎撃時刻は事前に確定しているため、閉ループ誘導は行わず
/// 発射地点から迎撃点へ一定速度で直進するものとする。
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptorPath {
    pub launch_site: Vector3,
    pub direction: Vector3, // 単位方向ベクトル
    pub speed: f64,
}

impl InterceptorPath {
    /// 発射地点から目標点へ向かう経路を作る
    ///
    /// # 引数
    /// - `launch_site`: 発射地点
    /// - `aim_point`: 目標点 (迎撃点)
    /// - `speed`: 一定速度 (m/s)
    ///
    /// # 戻り値
    /// - 迎撃経路 (目標点が発射地点と一致する場合、方向はゼロベクトル)
    pub fn toward(launch_site: &Vector3, aim_point: &Vector3, speed: f64) -> Self {
        InterceptorPath {
            launch_site: *launch_site,
            direction: vector_normalize(&vector_sub(aim_point, launch_site)),
            speed,
        }
    }

    /// 時刻 t における位置 (launch_site + u * speed * t)
    pub fn position_at(&self, t: f64) -> Vector3 {
        vector_add(&self.launch_site, &vector_scale(&self.direction, self.speed * t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{distance, vector_norm};
    use approx::assert_relative_eq;

    #[test]
    fn test_path_arrives_at_aim_point() {
        let site = [50.0, 20.0, 0.0];
        let aim = [170.0, 180.0, 90.0];
        let speed = 120.0;
        let path = InterceptorPath::toward(&site, &aim, speed);

        assert_relative_eq!(vector_norm(&path.direction), 1.0, epsilon = 1e-12);
        let t_arrive = distance(&site, &aim) / speed;
        let p = path.position_at(t_arrive);
        for i in 0..3 {
            assert_relative_eq!(p[i], aim[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_position_at_zero_is_launch_site() {
        let path = InterceptorPath::toward(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], 10.0);
        assert_eq!(path.position_at(0.0), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_degenerate_aim_point_stays_at_site() {
        let site = [5.0, 5.0, 0.0];
        let path = InterceptorPath::toward(&site, &site, 100.0);
        assert_eq!(path.direction, [0.0, 0.0, 0.0]);
        assert_eq!(path.position_at(3.0), site);
    }
}
