// src/models/solver.rs

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ScenarioConfig, SearchMethod, SearchParameters};
use crate::math::vector::first_non_finite;
use crate::math::{distance, Vector3};
use crate::models::error::SolverError;
use crate::models::interceptor::InterceptorPath;
use crate::models::threat::ThreatTrajectory;

/// 残差が許容値を超えた (ほぼゼロの交差が見つからなかった) ことを示す
///
/// エラーではなく、近似解とともに返される。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegenerateSolution {
    pub residual: f64,
    pub tolerance: f64,
}

/// 迎撃解
///
/// `sample_times[i] = intercept_time * i / N` で、脅威・迎撃ミサイルの
/// 各サンプルは同じ時刻を共有する。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterceptResult {
    pub intercept_time: f64,
    pub intercept_point: Vector3,
    pub residual: f64, // 迎撃時刻における符号付き残差 (m)
    pub sample_times: Vec<f64>,
    pub threat_samples: Vec<Vector3>,
    pub interceptor_samples: Vec<Vector3>,
    pub degenerate: Option<DegenerateSolution>,
}

impl InterceptResult {
    /// 分割数 N (最終サンプルのインデックス)
    pub fn sample_count(&self) -> usize {
        self.threat_samples.len().saturating_sub(1)
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate.is_some()
    }
}

/// 探索で選ばれた時刻と、その時刻の符号付き残差
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub time: f64,
    pub residual: f64,
}

/// 同一時刻列でサンプリングした両軌跡
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySamples {
    pub times: Vec<f64>,
    pub threat: Vec<Vector3>,
    pub interceptor: Vec<Vector3>,
}

/// 時刻 t における残差
///
/// residual(t) = |P_threat(t) - launch_site| - speed * t
///
/// 正なら迎撃ミサイルはまだ届かず、負なら行き過ぎ。0 で同時到着となる。
pub fn residual(threat: &ThreatTrajectory, launch_site: &Vector3, speed: f64, t: f64) -> f64 {
    distance(&threat.position_at(t), launch_site) - speed * t
}

/// 走査点数の上限 (upper_bound / step)
pub const MAX_GRID_STEPS: usize = 10_000_000;

/// 分割数 N の上限
pub const MAX_SAMPLE_COUNT: usize = 1_000_000;

// 走査点の数。刻みを積算せず k * step で時刻を作るので、上限付近の取りこぼしはない
fn grid_steps(search: &SearchParameters) -> usize {
    (search.upper_bound / search.step + 1e-9).floor() as usize
}

/// 固定刻みの線形走査で |残差| が最小となる時刻を求める
///
/// 同値の場合は先に見つかった (早い) 時刻を採用する。
///
/// # 引数
/// - `threat`: 脅威の軌道
/// - `launch_site`: 迎撃ミサイルの発射地点
/// - `speed`: 迎撃ミサイルの速度
/// - `search`: 探索区間と刻み
///
/// # 戻り値
/// - 最小残差の時刻と残差
pub fn grid_scan(
    threat: &ThreatTrajectory,
    launch_site: &Vector3,
    speed: f64,
    search: &SearchParameters,
) -> SearchOutcome {
    let mut best = SearchOutcome {
        time: 0.0,
        residual: residual(threat, launch_site, speed, 0.0),
    };

    for k in 1..=grid_steps(search) {
        let t = k as f64 * search.step;
        let r = residual(threat, launch_site, speed, t);
        if r.abs() < best.residual.abs() {
            best = SearchOutcome { time: t, residual: r };
        }
    }

    best
}

/// 最初の符号反転区間を二分法で詰めて残差ゼロの時刻を求める
///
/// 走査区間内に符号反転がなければ `grid_scan` の結果を返す。
pub fn bisection_search(
    threat: &ThreatTrajectory,
    launch_site: &Vector3,
    speed: f64,
    search: &SearchParameters,
) -> SearchOutcome {
    let f = |t: f64| residual(threat, launch_site, speed, t);

    let mut prev = SearchOutcome { time: 0.0, residual: f(0.0) };
    if prev.residual == 0.0 {
        return prev;
    }

    for k in 1..=grid_steps(search) {
        let t = k as f64 * search.step;
        let current = SearchOutcome { time: t, residual: f(t) };
        if current.residual == 0.0 {
            return current;
        }
        if (current.residual > 0.0) != (prev.residual > 0.0) {
            return refine_bracket(&f, prev, current, search);
        }
        prev = current;
    }

    debug!("no sign change in search interval, falling back to grid minimum");
    grid_scan(threat, launch_site, speed, search)
}

fn refine_bracket<F: Fn(f64) -> f64>(
    f: &F,
    mut lo: SearchOutcome,
    mut hi: SearchOutcome,
    search: &SearchParameters,
) -> SearchOutcome {
    for _ in 0..search.max_iterations {
        if hi.time - lo.time <= search.root_tolerance {
            break;
        }
        let t = 0.5 * (lo.time + hi.time);
        let mid = SearchOutcome { time: t, residual: f(t) };
        if mid.residual == 0.0 {
            return mid;
        }
        if (mid.residual > 0.0) == (lo.residual > 0.0) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    if lo.residual.abs() <= hi.residual.abs() {
        lo
    } else {
        hi
    }
}

/// 0 から迎撃時刻までを N 等分した N + 1 時刻で両軌跡をサンプリングする
///
/// # 引数
/// - `threat`: 脅威の軌道
/// - `path`: 迎撃ミサイルの直線経路
/// - `intercept_time`: 迎撃時刻
/// - `sample_count`: 分割数 N
///
/// # 戻り値
/// - 時刻列と両軌跡のサンプル (N = 0 の場合は迎撃点のみの1サンプル)
pub fn sample_trajectories(
    threat: &ThreatTrajectory,
    path: &InterceptorPath,
    intercept_time: f64,
    sample_count: usize,
) -> TrajectorySamples {
    if sample_count == 0 {
        let point = threat.position_at(intercept_time);
        return TrajectorySamples {
            times: vec![intercept_time],
            threat: vec![point],
            interceptor: vec![point],
        };
    }

    // i / N を先に計算すると t_N は intercept_time と厳密に一致する
    let times: Vec<f64> = (0..=sample_count)
        .map(|i| intercept_time * (i as f64 / sample_count as f64))
        .collect();

    TrajectorySamples {
        threat: times.iter().map(|&t| threat.position_at(t)).collect(),
        interceptor: times.iter().map(|&t| path.position_at(t)).collect(),
        times,
    }
}

/// シナリオ設定の検証 (計算前に行う)
pub fn validate(config: &ScenarioConfig) -> Result<(), SolverError> {
    let speed = config.interceptor.speed;
    if !speed.is_finite() || speed <= 0.0 {
        return Err(SolverError::invalid("interceptor.speed", speed, "正の有限値である必要があります"));
    }
    if config.sample_count == 0 {
        return Err(SolverError::invalid("sample_count", 0.0, "1以上である必要があります"));
    }
    if config.sample_count > MAX_SAMPLE_COUNT {
        return Err(SolverError::invalid(
            "sample_count",
            config.sample_count as f64,
            "上限 (MAX_SAMPLE_COUNT) を超えています",
        ));
    }

    let search = &config.search;
    if !search.upper_bound.is_finite() || search.upper_bound <= 0.0 {
        return Err(SolverError::invalid(
            "search.upper_bound",
            search.upper_bound,
            "正の有限値である必要があります",
        ));
    }
    if !search.step.is_finite() || search.step <= 0.0 {
        return Err(SolverError::invalid("search.step", search.step, "正の有限値である必要があります"));
    }
    // floor 前の比で判定する (usize への変換は飽和するため)
    if search.upper_bound / search.step > MAX_GRID_STEPS as f64 {
        return Err(SolverError::invalid(
            "search.step",
            search.step,
            "走査点数が上限 (MAX_GRID_STEPS) を超えています",
        ));
    }
    if search.residual_tolerance.is_nan() || search.residual_tolerance < 0.0 {
        return Err(SolverError::invalid(
            "search.residual_tolerance",
            search.residual_tolerance,
            "0以上である必要があります",
        ));
    }
    if search.root_tolerance.is_nan() || search.root_tolerance < 0.0 {
        return Err(SolverError::invalid(
            "search.root_tolerance",
            search.root_tolerance,
            "0以上である必要があります",
        ));
    }

    if let Some(value) = config.threat.first_non_finite() {
        return Err(SolverError::invalid("threat", value, "有限値である必要があります"));
    }
    if let Some(value) = first_non_finite(&config.interceptor.launch_site) {
        return Err(SolverError::invalid(
            "interceptor.launch_site",
            value,
            "有限値である必要があります",
        ));
    }

    Ok(())
}

/// 迎撃時刻・迎撃点を求め、両軌跡のサンプル列を生成する
///
/// 決定的な純粋関数。探索区間内で迎撃ミサイルが脅威に届く時刻がない場合も
/// 失敗とはせず、最良の近似解を `DegenerateSolution` 付きで返す。
///
/// # 引数
/// - `config`: シナリオ設定
///
/// # 戻り値
/// - 迎撃解
/// - 設定が不正な場合は `SolverError::InvalidConfiguration`
pub fn solve(config: &ScenarioConfig) -> Result<InterceptResult, SolverError> {
    validate(config)?;

    let threat = &config.threat;
    let launch_site = &config.interceptor.launch_site;
    let speed = config.interceptor.speed;

    let outcome = match config.search.method {
        SearchMethod::GridScan => grid_scan(threat, launch_site, speed, &config.search),
        SearchMethod::Bisection => bisection_search(threat, launch_site, speed, &config.search),
    };

    let intercept_point = threat.position_at(outcome.time);
    let path = InterceptorPath::toward(launch_site, &intercept_point, speed);
    let samples = sample_trajectories(threat, &path, outcome.time, config.sample_count);

    let tolerance = config.search.residual_tolerance;
    let degenerate = if outcome.residual.abs() > tolerance {
        warn!(
            residual = outcome.residual,
            tolerance,
            "no near-zero residual found, using best approximate intercept"
        );
        Some(DegenerateSolution {
            residual: outcome.residual,
            tolerance,
        })
    } else {
        None
    };

    if let Some(ground_time) = threat.ground_time() {
        if outcome.time > ground_time {
            warn!(
                intercept_time = outcome.time,
                ground_time,
                "intercept point lies below ground level"
            );
        }
    }

    info!(
        intercept_time = outcome.time,
        residual = outcome.residual,
        x = intercept_point[0],
        y = intercept_point[1],
        z = intercept_point[2],
        "intercept solved"
    );

    Ok(InterceptResult {
        intercept_time: outcome.time,
        intercept_point,
        residual: outcome.residual,
        sample_times: samples.times,
        threat_samples: samples.threat,
        interceptor_samples: samples.interceptor,
        degenerate,
    })
}
