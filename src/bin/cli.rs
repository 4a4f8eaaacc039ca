//! CLI application for body measurement estimation.
//!
//! Usage:
//!   body-measure --pose pose.json --image photo.jpg          # Human-readable output
//!   body-measure --pose pose.json --width 640 --height 480   # Frame size from flags
//!   body-measure --pose pose.json --image photo.jpg --json   # JSON record
//!   body-measure --image photo.jpg --json -o out.json       # No pose: fallbacks only

use body_measure::report::format_human_readable;
use body_measure::{
    check_fit, load_pose, Estimator, EstimatorConfig, Frame, MeasurementRecord,
};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "body-measure")]
#[command(author, version, about = "Body measurement estimation from pose landmarks", long_about = None)]
struct Args {
    /// Pose detector output (JSON: one pose or a list of poses)
    #[arg(short, long)]
    pose: Option<PathBuf>,

    /// Captured image; only its dimensions are read
    #[arg(short, long, conflicts_with_all = ["width", "height"])]
    image: Option<PathBuf>,

    /// Frame width in pixels
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Frame height in pixels
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Estimator config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the height fallback ratio (cm per frame pixel)
    #[arg(long)]
    height_fallback_ratio: Option<f64>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::debug!("Loading config from {:?}", path);
            EstimatorConfig::from_json_file(path)?
        }
        None => EstimatorConfig::default(),
    };
    if let Some(ratio) = args.height_fallback_ratio {
        config = config.with_height_fallback_ratio(ratio);
        config.validate()?;
    }

    let frame = match (&args.image, args.width, args.height) {
        (Some(path), _, _) => {
            tracing::debug!("Reading image dimensions from {:?}", path);
            Frame::from_image_path(path)?
        }
        (None, Some(w), Some(h)) => Frame::new(w, h)?,
        _ => return Err("either --image or both --width and --height are required".into()),
    };
    tracing::info!("Frame size: {}x{}", frame.width(), frame.height());

    let pose = match &args.pose {
        Some(path) => {
            let pose = load_pose(path)?;
            match &pose {
                Some(p) => tracing::info!("Loaded pose with {} keypoints", p.keypoints.len()),
                None => tracing::warn!("Pose file {:?} contains no poses", path),
            }
            pose
        }
        None => {
            tracing::warn!("No pose given, all measurements will be estimated");
            None
        }
    };

    let estimator = Estimator::new(config);
    let set = estimator.estimate(&frame, pose.as_ref());
    let fit = check_fit(&frame, pose.as_ref(), estimator.config().min_keypoint_score);

    if let Some(p) = &pose {
        tracing::debug!("Scale: {:.4} cm/px", estimator.pixel_to_cm(p));
    }

    let record = MeasurementRecord::from_set(&set);
    let output_str = if args.json {
        record.to_json_pretty()?
    } else {
        format_human_readable(&frame, &set, pose.as_ref().map(|_| fit))
    };

    if let Some(ref path) = args.output {
        if args.json {
            record.write_json(path)?;
        } else {
            std::fs::write(path, &output_str)?;
        }
        tracing::info!("Output written to {:?}", path);
    } else {
        println!("{}", output_str);
    }

    Ok(())
}
