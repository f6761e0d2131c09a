// src/main.rs

use std::error::Error;
use std::fs;
use std::io::Write;

use icptsim::simulation::csv::{create_csv_row, setup_csv_output};
use icptsim::simulation::framework::run_replay;
use icptsim::simulation::load_parameters::load_scenario;
use icptsim::utils::init_logging;
use icptsim::SimulationSession;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging("info");

    // シナリオの読み込みと迎撃解の計算
    let scenario = load_scenario("config/scenario.yaml")?;
    let mut session = SimulationSession::new(scenario)?;

    let result = session.result();
    println!("Calculated Impact Time: {:.2} seconds", result.intercept_time);
    println!(
        "Calculated Impact Point: ({:.1}, {:.1}, {:.1})",
        result.intercept_point[0], result.intercept_point[1], result.intercept_point[2]
    );
    if let Some(degenerate) = &result.degenerate {
        println!(
            "Warning: residual {:.3} exceeds tolerance {:.3}, using approximate intercept",
            degenerate.residual, degenerate.tolerance
        );
    }

    // 描画ループの代わりに保持期間が終わるまで再生する
    let frames = run_replay(&mut session)?;

    // CSV出力
    fs::create_dir_all("output")?;
    let mut writer = setup_csv_output("output/replay.csv")?;
    for frame in &frames {
        writer.write_all(create_csv_row(frame).as_bytes())?;
    }
    writer.flush()?;

    println!("Replay finished ({} ticks). Results saved to output/replay.csv", frames.len());
    Ok(())
}
