use clap::{ArgGroup, Parser};
use fen_vision::detect::{load_gray, read_gray, rectified_preview};
use fen_vision::{
    BoardReader, BoardReading, BoardReport, DetectionSet, ReadConfig, RectifiedImageInfo,
};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Read a chess position from recorded board-corner and piece detections.
#[derive(Parser, Debug)]
#[command(name = "fen-vision", version, about)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["config", "detections"])
))]
struct Args {
    /// JSON run configuration (`ReadConfig`)
    config: Option<PathBuf>,

    /// Recorded detections JSON; overrides the config
    #[arg(long)]
    detections: Option<PathBuf>,

    /// Source photograph, needed for the rectified preview
    #[arg(long)]
    image: Option<PathBuf>,

    /// Write the rectified board image here
    #[arg(long, requires = "image")]
    rectified: Option<PathBuf>,

    /// Report JSON path (default `board_report.json`)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log level of the fen-vision crates: off, error, warn, info, debug, trace.
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// Emit log events as JSON lines
    #[cfg(feature = "tracing")]
    #[arg(long)]
    log_json: bool,
}

fn path_string(p: &Path) -> String {
    p.to_string_lossy().into_owned()
}

fn build_config(args: &Args) -> Result<ReadConfig, Box<dyn std::error::Error>> {
    let mut cfg = match (&args.config, &args.detections) {
        (Some(path), _) => ReadConfig::load_json(path)?,
        (None, Some(dets)) => ReadConfig::new(path_string(dets)),
        (None, None) => return Err("either CONFIG or --detections is required".into()),
    };
    if let Some(dets) = &args.detections {
        cfg.detections_path = path_string(dets);
    }
    if let Some(image) = &args.image {
        cfg.image_path = Some(path_string(image));
    }
    if let Some(rectified) = &args.rectified {
        cfg.rectified_path = Some(path_string(rectified));
    }
    if let Some(report) = &args.report {
        cfg.output_path = Some(path_string(report));
    }
    Ok(cfg)
}

fn write_preview(
    img: &image::GrayImage,
    reading: &BoardReading,
    path: &str,
) -> Result<RectifiedImageInfo, Box<dyn std::error::Error>> {
    let preview = rectified_preview(img, reading)?;
    preview.save(path)?;
    log::info!("rectified board written to {path}");
    Ok(RectifiedImageInfo {
        path: Some(path.to_string()),
        width: preview.width() as usize,
        height: preview.height() as usize,
    })
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = build_config(&args)?;
    let detections = DetectionSet::load_json(&cfg.detections_path)?;
    let mut report = BoardReport::new(
        &cfg,
        args.config.as_deref(),
        detections.corners.len(),
        detections.pieces.len(),
    );

    let reader = BoardReader::new(&detections, &detections, cfg.params.clone());
    let image = cfg.image_path.as_ref().map(load_gray).transpose()?;
    let result = match &image {
        Some(img) => read_gray(&reader, img).map_err(Box::<dyn std::error::Error>::from),
        None => reader.read(&()).map_err(Box::<dyn std::error::Error>::from),
    };

    let reading = match result {
        Ok(reading) => reading,
        Err(err) => {
            report.set_error(err.as_ref());
            report.write_json(cfg.output_path())?;
            return Err(err);
        }
    };
    report.set_reading(&reading);

    if let (Some(img), Some(path)) = (&image, &cfg.rectified_path) {
        report.rectified = Some(write_preview(img, &reading, path)?);
    } else if cfg.rectified_path.is_some() {
        log::warn!("rectified output requested without an image_path; skipping");
    }

    let out = cfg.output_path();
    report.write_json(&out)?;
    log::info!("report written to {}", out.display());

    println!("{}", reading.fen);
    println!("{}", reading.analysis_url);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    #[cfg(feature = "tracing")]
    fen_vision::logging::init_tracing(args.log_json, args.log_level);
    #[cfg(not(feature = "tracing"))]
    if let Err(err) = fen_vision::logging::init_logging(args.log_level) {
        eprintln!("warning: logger already installed: {err}");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
