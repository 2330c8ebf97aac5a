use anyhow::{bail, Context, Result};
use squat_tracker::config::Config;
use squat_tracker::marker::{Marker, MarkerFrame};
use squat_tracker::session::SquatSession;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// 記録済みマーカーフレーム（JSON Lines: 1行 = 1ティック分のマーカー配列）を
/// セッションに流し込み、ティックごとの結果とサマリーを表示する。
fn main() -> Result<()> {
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => bail!("usage: replay <recording.jsonl>"),
    };

    let config = Config::load_or_default("config.toml");
    let mut session = SquatSession::from_config(&config);

    let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
    let reader = BufReader::new(file);

    let mut ticks = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let detections: Vec<Marker> = serde_json::from_str(&line)
            .with_context(|| format!("Invalid frame record at line {}", lineno + 1))?;
        let frame = MarkerFrame::from_detections(detections);
        let update = session.process(&frame);
        ticks += 1;

        println!("{}", serde_json::to_string(&update)?);
    }

    eprintln!();
    eprintln!("ticks: {}", ticks);
    eprintln!("reps: {}", session.rep_count());
    eprintln!(
        "knee history: {} samples, handle history: {} samples",
        session.knee_angle_history().len(),
        session.handle_height_history().len()
    );

    Ok(())
}
