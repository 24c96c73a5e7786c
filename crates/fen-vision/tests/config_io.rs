use fen_vision::board::BoundingBox;
use fen_vision::{
    read_detections, BoardReport, CornerCandidate, DetectionSet, PieceBox, ReadConfig,
    ReaderParams,
};
use nalgebra::Point2;
use std::path::PathBuf;

fn square_set() -> DetectionSet {
    DetectionSet {
        corners: [(0.0, 0.0), (800.0, 0.0), (800.0, 800.0), (0.0, 800.0)]
            .into_iter()
            .map(|(x, y)| CornerCandidate::new(Point2::new(x, y)))
            .collect(),
        pieces: vec![
            // white rook anchored at (50, 50), black pawn off the board
            PieceBox::new(BoundingBox::new(30.0, 10.0, 70.0, 60.0), 11),
            PieceBox::new(BoundingBox::new(900.0, 10.0, 940.0, 60.0), 3),
        ],
    }
}

#[test]
fn config_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("read.json");

    let mut cfg = ReadConfig::new("dets.json");
    cfg.image_path = Some("board.jpg".into());
    cfg.params.min_piece_confidence = 0.4;
    cfg.write_json(&path).expect("write");

    let back = ReadConfig::load_json(&path).expect("load");
    assert_eq!(back, cfg);
    assert_eq!(back.output_path(), PathBuf::from("board_report.json"));
}

#[test]
fn minimal_config_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("read.json");
    std::fs::write(
        &path,
        r#"{ "detections_path": "d.json", "output_path": "out/report.json" }"#,
    )
    .expect("write");

    let cfg = ReadConfig::load_json(&path).expect("load");
    assert_eq!(cfg.params, ReaderParams::default());
    assert_eq!(cfg.image_path, None);
    assert_eq!(cfg.output_path(), PathBuf::from("out/report.json"));
}

#[test]
fn custom_class_map_is_read_from_json() {
    let params: ReaderParams =
        serde_json::from_str(r#"{ "class_map": "PNBRQKpnbrqk" }"#).expect("parse");
    assert_eq!(params.class_map.get(0).map(|p| p.symbol()), Some('P'));
    assert_eq!(params.class_map.get(11).map(|p| p.symbol()), Some('k'));

    let bad = serde_json::from_str::<ReaderParams>(r#"{ "class_map": "PX" }"#);
    assert!(bad.is_err());
}

#[test]
fn detections_round_trip_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dets.json");
    let set = square_set();
    set.write_json(&path).expect("write");
    assert_eq!(DetectionSet::load_json(&path).expect("load"), set);
}

#[test]
fn report_records_reading() {
    let set = square_set();
    let reading =
        read_detections(&set.corners, &set.pieces, &ReaderParams::default()).expect("read");

    let cfg = ReadConfig::new("dets.json");
    let mut report = BoardReport::new(&cfg, None, set.corners.len(), set.pieces.len());
    report.set_reading(&reading);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.json");
    report.write_json(&path).expect("write");
    let back = BoardReport::load_json(&path).expect("load");

    assert_eq!(back.fen.as_deref(), Some("R7/8/8/8/8/8/8/8"));
    assert_eq!(back.num_piece_boxes, 2);
    assert_eq!(back.placements.len(), 2);
    assert_eq!(back.placements[0].square.as_deref(), Some("a8"));
    assert!(back.placements[0].kept);
    assert_eq!(back.placements[1].square, None);
    assert_eq!(back.corners.map(|c| c[2]), Some(Point2::new(800.0, 800.0)));
    assert_eq!(back.canonical_size, report.canonical_size);
    assert!(back.error.is_none());
}

#[test]
fn report_records_error() {
    let set = DetectionSet {
        corners: square_set().corners[..2].to_vec(),
        pieces: Vec::new(),
    };
    let err = read_detections(&set.corners, &set.pieces, &ReaderParams::default()).unwrap_err();

    let mut report = BoardReport::new(&ReadConfig::new("dets.json"), None, 2, 0);
    report.set_error(&err);
    assert_eq!(report.error.as_deref(), Some("need 4 board corners, found 2"));
    assert!(report.fen.is_none());
}
