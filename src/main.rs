//! Posture sentinel: classify posture for a batch of segmented frames.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use posture_sentinel::{
    analyzer::{Assessment, PostureAnalyzer},
    config::{Config, EXAMPLE_CONFIG},
    frames::load_frames,
    PostureLabel,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frame batch file (YAML) with per-frame dimensions and contours
    #[arg(short, long, required_unless_present = "print_config")]
    input: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Emit full assessments as YAML instead of one line per frame
    #[arg(long)]
    yaml: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Posture Sentinel");

    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    let analyzer = PostureAnalyzer::new(config).context("Invalid configuration")?;

    let input = args.input.context("No input file given")?;
    let frames = load_frames(&input).with_context(|| format!("Failed to load frames from {input}"))?;

    let assessments: Vec<Assessment> = frames
        .iter()
        .map(|frame| analyzer.analyze_contours(&frame.contours, frame.shape()))
        .collect();

    if args.yaml {
        print!("{}", serde_yaml::to_string(&assessments)?);
    } else {
        for (index, assessment) in assessments.iter().enumerate() {
            println!("{index:>5}  {}", describe(assessment));
        }
    }

    let summary: Vec<String> = PostureLabel::ALL
        .iter()
        .map(|label| {
            let count = assessments.iter().filter(|a| a.label == *label).count();
            format!("{label}: {count}")
        })
        .collect();
    info!("Session samples: {} ({})", assessments.len(), summary.join(", "));

    Ok(())
}

fn describe(assessment: &Assessment) -> String {
    let Some(m) = &assessment.metrics else {
        return format!("{:<8}  no silhouette", assessment.label);
    };

    let shoulder = m
        .shoulder_tilt_px
        .map_or_else(|| "-".to_string(), |tilt| format!("{tilt:.0} px"));
    format!(
        "{:<8}  spine {:>5.1} deg  shoulder tilt {:>6}  head offset {:>4.0} px",
        assessment.label, m.spine_angle_deg, shoulder, m.head_offset_px
    )
}
