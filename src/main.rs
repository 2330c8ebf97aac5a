use anyhow::Result;
use squat_tracker::config::Config;
use squat_tracker::marker::{square_marker, Marker, MarkerFrame};
use squat_tracker::session::SquatSession;
use std::collections::BTreeMap;
use std::io::{self, Write};

const CONFIG_PATH: &str = "config.toml";
const MARKER_PX: f32 = 10.0;

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== Squat Tracker - Pipeline Test ===");
    println!(
        "しきい値: valid < {}°, approaching <= {}°",
        config.classifier.valid_threshold_deg, config.classifier.approaching_threshold_deg
    );
    println!();
    println!("コマンド:");
    println!("  m id x y      - マーカーを配置 (例: m 1 100 100)");
    println!("  d id          - マーカーを除去 (例: d 2)");
    println!("  t             - 1ティック実行して結果を表示");
    println!("  s             - 配置中のマーカーを表示");
    println!("  r             - セッションリセット");
    println!("  q             - 終了");
    println!();

    let mut session = SquatSession::from_config(&config);
    let mut placed: BTreeMap<u32, Marker> = BTreeMap::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let parts: Vec<&str> = input.trim().split_whitespace().collect();

        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "m" if parts.len() == 4 => {
                let id: u32 = parts[1].parse()?;
                let x: f32 = parts[2].parse()?;
                let y: f32 = parts[3].parse()?;
                placed.insert(id, square_marker(id, x, y, MARKER_PX));
                println!("マーカー{}: ({}, {})", id, x, y);
            }
            "d" if parts.len() == 2 => {
                let id: u32 = parts[1].parse()?;
                if placed.remove(&id).is_some() {
                    println!("マーカー{}を除去しました", id);
                } else {
                    println!("マーカー{}は配置されていません", id);
                }
            }
            "t" => {
                let frame = MarkerFrame::from_detections(placed.values().copied());
                let update = session.process(&frame);
                println!("  zone: {:?} ({})", update.zone, update.label);
                match update.femur_angle {
                    Some(a) => println!("  femur angle: {:.2}°", a),
                    None => println!("  femur angle: -"),
                }
                match update.knee_angle {
                    Some(a) => println!("  knee angle: {:.2}°", a),
                    None => println!("  knee angle: -"),
                }
                match update.handle_height_cm {
                    Some(h) => println!("  handle height: {:.1} cm", h),
                    None => println!("  handle height: -"),
                }
                if update.rep_counted {
                    println!("  ★ 新しいレップ!");
                }
                println!("  rep count: {}", update.rep_count);
            }
            "s" => {
                if placed.is_empty() {
                    println!("マーカーなし");
                }
                for (id, marker) in &placed {
                    let p = marker.reference();
                    println!("  マーカー{}: ({}, {})", id, p.x, p.y);
                }
            }
            "r" => {
                session.reset();
                println!("リセットしました (rep count: {})", session.rep_count());
            }
            "q" => {
                println!("終了します");
                break;
            }
            _ => {
                println!("不明なコマンド: {}", parts[0]);
            }
        }
    }

    Ok(())
}
