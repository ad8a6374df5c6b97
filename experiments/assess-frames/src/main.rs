use anyhow::Context;
use ergo_base::log;
use ergo_score::{Assessor, EngineConfig, Keypoint};
use std::fs;
use std::io::{self, BufWriter, Write};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <frames.json> [weight-kg]", args[0]);
        std::process::exit(1);
    }

    let config = match std::env::var("ERGO_CONFIG") {
        Ok(path) => EngineConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        Err(_) => EngineConfig::default(),
    };
    match std::env::var("ERGO_LOG_DIR") {
        Ok(dir) => ergo_base::init_file_logger(&dir, config.log_level())
            .with_context(|| format!("opening log directory {dir}"))?,
        Err(_) => ergo_base::init_console_logger(config.log_level()),
    }

    let manual_weight = args
        .get(2)
        .map(|s| s.parse::<f32>())
        .transpose()
        .context("weight must be a number of kilograms")?;

    // One frame per entry, each a list of 17 {x, y, score} keypoints
    let content = fs::read_to_string(&args[1]).with_context(|| format!("reading {}", args[1]))?;
    let frames: Vec<Vec<Keypoint>> =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", args[1]))?;
    log::info!("assessing {} frames from {}", frames.len(), args[1]);

    let assessor = Assessor::new(config);
    let mut out = BufWriter::new(io::stdout().lock());
    let mut skipped = 0;
    for (index, keypoints) in frames.iter().enumerate() {
        let assessment = assessor.assess(keypoints, manual_weight);
        if assessment.rula.is_none() && assessment.reba.is_none() {
            log::warn!(
                "frame {}: no assessment ({} of {} keypoints valid)",
                index,
                assessment.pose_quality.valid_keypoints,
                assessment.pose_quality.total_keypoints
            );
            skipped += 1;
        }
        serde_json::to_writer(&mut out, &assessment)?;
        writeln!(out)?;
    }
    out.flush()?;

    log::info!("done, {} of {} frames assessed", frames.len() - skipped, frames.len());
    Ok(())
}
