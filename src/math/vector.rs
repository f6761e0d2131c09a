// src/math/vector.rs

/// 3次元ベクトル [x, y, z]
pub type Vector3 = [f64; 3];

/// ゼロ長とみなすノルムの閾値
const NORM_EPSILON: f64 = 1e-9;

/// ベクトルの和 a + b
pub fn vector_add(a: &Vector3, b: &Vector3) -> Vector3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// ベクトルの差 a - b
pub fn vector_sub(a: &Vector3, b: &Vector3) -> Vector3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// スカラー倍 v * s
pub fn vector_scale(v: &Vector3, s: f64) -> Vector3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// ベクトルのノルム
pub fn vector_norm(v: &Vector3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// 2点間の距離
pub fn distance(a: &Vector3, b: &Vector3) -> f64 {
    vector_norm(&vector_sub(a, b))
}

/// 単位ベクトル化
///
/// ノルムがほぼ0の場合は方向が定義できないため、ゼロベクトルを返す。
pub fn vector_normalize(v: &Vector3) -> Vector3 {
    let n = vector_norm(v);
    if n < NORM_EPSILON {
        [0.0, 0.0, 0.0]
    } else {
        [v[0] / n, v[1] / n, v[2] / n]
    }
}

/// 最初に見つかった非有限 (NaN / ±∞) の成分。すべて有限なら`None`
pub fn first_non_finite(v: &Vector3) -> Option<f64> {
    v.iter().copied().find(|c| !c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_and_sub_are_inverse() {
        let a = [1.0, -2.0, 3.5];
        let b = [0.5, 4.0, -1.0];
        assert_eq!(vector_sub(&vector_add(&a, &b), &b), a);
    }

    #[test]
    fn test_distance_345() {
        // 3-4-5 の直角三角形
        assert_relative_eq!(distance(&[0.0, 0.0, 0.0], &[3.0, 4.0, 0.0]), 5.0);
    }

    #[test]
    fn test_normalize_unit_length() {
        let u = vector_normalize(&[10.0, -20.0, 5.0]);
        assert_relative_eq!(vector_norm(&u), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(vector_normalize(&[0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_eq!(vector_normalize(&[1e-12, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_scale() {
        assert_eq!(vector_scale(&[1.0, 2.0, 3.0], 2.0), [2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_first_non_finite() {
        assert_eq!(first_non_finite(&[0.0, 1.0, -1.0]), None);
        assert!(first_non_finite(&[0.0, f64::NAN, 0.0]).unwrap().is_nan());
        assert_eq!(first_non_finite(&[1.0, f64::NEG_INFINITY, f64::NAN]), Some(f64::NEG_INFINITY));
    }
}
