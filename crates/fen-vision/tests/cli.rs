use assert_cmd::Command;
use fen_vision::board::BoundingBox;
use fen_vision::{BoardReport, CornerCandidate, DetectionSet, PieceBox, ReadConfig};
use nalgebra::Point2;
use predicates::prelude::*;
use std::path::Path;

fn write_detections(path: &Path, corners: &[(f64, f64)]) {
    let set = DetectionSet {
        corners: corners
            .iter()
            .map(|&(x, y)| CornerCandidate::new(Point2::new(x, y)))
            .collect(),
        // black king on e8, white king on e1 (classes 1 and 7)
        pieces: vec![
            PieceBox::new(BoundingBox::new(430.0, 2.0, 470.0, 62.0), 1),
            PieceBox::new(BoundingBox::new(430.0, 702.0, 470.0, 762.0), 7),
        ],
    };
    set.write_json(path).expect("write detections");
}

const SQUARE: [(f64, f64); 4] = [(800.0, 800.0), (0.0, 0.0), (0.0, 800.0), (800.0, 0.0)];

#[test]
fn prints_fen_and_writes_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dets = dir.path().join("dets.json");
    let report = dir.path().join("report.json");
    write_detections(&dets, &SQUARE);

    Command::cargo_bin("fen-vision")
        .expect("binary")
        .arg("--detections")
        .arg(&dets)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("4k3/8/8/8/8/8/8/4K3"))
        .stdout(predicate::str::contains(
            "https://lichess.org/analysis/4k3/8/8/8/8/8/8/4K3",
        ));

    let written = BoardReport::load_json(&report).expect("report");
    assert_eq!(written.fen.as_deref(), Some("4k3/8/8/8/8/8/8/4K3"));
    assert_eq!(written.num_corner_candidates, 4);
}

#[test]
fn runs_from_a_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dets = dir.path().join("dets.json");
    let report = dir.path().join("from_config.json");
    let config = dir.path().join("read.json");
    write_detections(&dets, &SQUARE);

    let mut cfg = ReadConfig::new(dets.to_string_lossy());
    cfg.output_path = Some(report.to_string_lossy().into_owned());
    cfg.write_json(&config).expect("write config");

    Command::cargo_bin("fen-vision")
        .expect("binary")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("4k3/8/8/8/8/8/8/4K3"));

    let written = BoardReport::load_json(&report).expect("report");
    assert_eq!(
        written.config_path.as_deref(),
        Some(config.to_string_lossy().as_ref())
    );
}

#[test]
fn reports_missing_corners() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dets = dir.path().join("dets.json");
    let report = dir.path().join("report.json");
    write_detections(&dets, &SQUARE[..2]);

    Command::cargo_bin("fen-vision")
        .expect("binary")
        .arg("--detections")
        .arg(&dets)
        .arg("--report")
        .arg(&report)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("need 4 board corners"));

    let written = BoardReport::load_json(&report).expect("report");
    assert_eq!(written.error.as_deref(), Some("need 4 board corners, found 2"));
}

#[test]
fn requires_an_input() {
    Command::cargo_bin("fen-vision")
        .expect("binary")
        .assert()
        .failure();
}

#[test]
fn detections_flag_overrides_the_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let broken = dir.path().join("broken.json");
    let good = dir.path().join("good.json");
    let report = dir.path().join("report.json");
    let config = dir.path().join("read.json");
    write_detections(&broken, &SQUARE[..2]);
    write_detections(&good, &SQUARE);

    let mut cfg = ReadConfig::new(broken.to_string_lossy());
    cfg.output_path = Some(report.to_string_lossy().into_owned());
    cfg.write_json(&config).expect("write config");

    Command::cargo_bin("fen-vision")
        .expect("binary")
        .arg(&config)
        .arg("--detections")
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("4k3/8/8/8/8/8/8/4K3"));

    let written = BoardReport::load_json(&report).expect("report");
    assert_eq!(written.detections_path, good.to_string_lossy());
}

#[test]
fn log_level_flag_enables_pipeline_logs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dets = dir.path().join("dets.json");
    write_detections(&dets, &SQUARE);

    Command::cargo_bin("fen-vision")
        .expect("binary")
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--detections")
        .arg(&dets)
        .arg("--log-level")
        .arg("debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("board read as 4k3/8/8/8/8/8/8/4K3"));

    assert!(dir.path().join("board_report.json").exists());
}

#[test]
fn rejects_an_unknown_log_level() {
    Command::cargo_bin("fen-vision")
        .expect("binary")
        .args(["--detections", "dets.json", "--log-level", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--log-level"));
}
