// src/simulation/csv.rs

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;

use crate::simulation::framework::ReplayFrame;
use crate::simulation::TickEvent;

/// CSV出力の設定とヘッダーの書き込み
pub fn setup_csv_output(path: &str) -> Result<Box<dyn Write>, Box<dyn Error>> {
    let output_file = File::create(path)?;
    let mut writer = BufWriter::new(output_file);
    write_csv_header(&mut writer)?;
    Ok(Box::new(writer))
}

/// CSVヘッダーの書き込み
pub fn write_csv_header<W: Write>(writer: &mut W) -> Result<(), std::io::Error> {
    let header = concat!(
        "tick,phase,frame,time(s),",
        "threat_x(m),threat_y(m),threat_z(m),",
        "interceptor_x(m),interceptor_y(m),interceptor_z(m),",
        "event,impact_visible,impact_intensity\n"
    );
    writer.write_all(header.as_bytes())?;
    Ok(())
}

fn event_label(event: &Option<TickEvent>) -> &'static str {
    match event {
        Some(TickEvent::Positions { .. }) => "positions",
        Some(TickEvent::Impact { .. }) => "impact",
        Some(TickEvent::Pulse { .. }) => "pulse",
        None => "none",
    }
}

/// CSV行の作成
pub fn create_csv_row(frame: &ReplayFrame) -> String {
    let snap = &frame.snapshot;
    format!(
        "{},{:?},{},{:.4},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{},{},{:.4}\n",
        frame.tick,
        snap.phase,
        snap.frame,
        snap.time,
        snap.positions.threat[0],
        snap.positions.threat[1],
        snap.positions.threat[2],
        snap.positions.interceptor[0],
        snap.positions.interceptor[1],
        snap.positions.interceptor[2],
        event_label(&frame.event),
        snap.impact_visible,
        snap.impact_intensity,
    )
}
