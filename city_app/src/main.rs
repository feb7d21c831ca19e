//! Headless city scene runner
//!
//! Loads the scene configuration, requests every model from a simulated
//! loader, runs the frame scheduler for a number of ticks and replays
//! scripted clicks. Side effects that would open a browser are logged.

mod catalog;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use city_engine::foundation::logging;
use city_engine::prelude::*;

/// Run the interactive city scene without a window
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene configuration (.toml or .ron); defaults apply when missing
    #[arg(short, long, default_value = "city.toml")]
    config: PathBuf,

    /// Write the effective configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    dump_config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 1200)]
    frames: u64,

    /// Simulated display refresh rate in Hz
    #[arg(short, long, default_value_t = 60.0)]
    rate: f32,

    /// Simulated model load latency in milliseconds
    #[arg(long, default_value_t = 250)]
    latency_ms: u64,

    /// Fractional random jitter applied to each frame time
    #[arg(long, default_value_t = 0.0)]
    jitter: f32,

    /// Pace frames in real time instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Helicopter RNG seed, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Click at pixel X,Y after the run; may be repeated
    #[arg(long = "click", value_name = "X,Y", value_parser = parse_click)]
    clicks: Vec<(f32, f32)>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Application errors
#[derive(Error, Debug)]
enum AppError {
    /// Configuration could not be read, written or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command line value out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

fn parse_click(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .map_err(|e| format!("bad coordinate '{part}': {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

/// Click sink standing in for the browser
#[derive(Debug, Default)]
struct LogSink {
    opened: usize,
}

impl ClickSink for LogSink {
    fn open_url(&mut self, url: &str) {
        self.opened += 1;
        log::info!("Opening {} in a new tab", url);
    }

    fn toggled(&mut self, target: &str) {
        log::info!("'{}' toggled", target);
    }
}

fn main() {
    let args = Args::parse();
    logging::init_with_default(if args.verbose { "debug" } else { "info" });

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    if !(args.rate.is_finite() && args.rate > 0.0) {
        return Err(AppError::InvalidArgument(format!("rate must be positive, got {}", args.rate)));
    }
    if !(0.0..1.0).contains(&args.jitter) {
        return Err(AppError::InvalidArgument(format!("jitter must be in [0, 1), got {}", args.jitter)));
    }

    let mut config = CityConfig::load_or_default(&args.config)?;
    if let Some(seed) = args.seed {
        config.helicopter.seed = Some(seed);
    }

    if let Some(path) = &args.dump_config {
        config.validate()?;
        config.save_to_file(path)?;
        log::info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let mut jitter_rng = match config.helicopter.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let mut loader = catalog::demo_loader(&config.assets, Duration::from_millis(args.latency_ms));
    let mut scheduler = FrameScheduler::new(config)?;
    scheduler.request_scene(&mut loader);

    let mut clock = FixedClock::from_rate(args.rate);
    log::info!("Running {} frames at {} Hz", args.frames, args.rate);

    for _ in 0..args.frames {
        let mut delta = clock.tick();
        if args.jitter > 0.0 {
            delta *= 1.0 + jitter_rng.gen_range(-args.jitter..args.jitter);
        }

        let report = scheduler.tick(delta);
        for event in &report.load_events {
            log::debug!("Frame {}: {:?}", report.frame, event);
        }
        if report.frame % 300 == 0 {
            summarize(&scheduler, &report);
        }

        if args.realtime {
            thread::sleep(Duration::from_secs_f32(delta));
        }
    }

    let mut sink = LogSink::default();
    for &(x, y) in &args.clicks {
        let outcome = scheduler.handle_click(x, y, &SphereRayCaster, &mut sink);
        log::info!("Click at ({}, {}): {:?}", x, y, outcome);
    }

    log::info!(
        "Finished after {} frames, {} page(s) opened",
        scheduler.frame_count(),
        sink.opened
    );
    Ok(())
}

fn summarize(scheduler: &FrameScheduler, report: &FrameReport) {
    let position_of = |role| {
        scheduler
            .actors()
            .ready(role)
            .and_then(|key| scheduler.scene().get(key))
            .map(|node| node.pose.position)
    };
    log::info!(
        "Frame {}: intro {:?}, sun {:?}, car {:?}, helicopter {:?}",
        report.frame,
        report.intro_phase,
        report.sun_coordinate,
        position_of(ActorRole::Car),
        position_of(ActorRole::Helicopter)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click() {
        assert_eq!(parse_click("640,360"), Ok((640.0, 360.0)));
        assert_eq!(parse_click(" 1.5 , 2 "), Ok((1.5, 2.0)));
        assert!(parse_click("640").is_err());
        assert!(parse_click("a,b").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "city_scene",
            "--frames",
            "10",
            "--click",
            "1,2",
            "--click",
            "3,4",
            "--seed",
            "5",
        ])
        .unwrap();
        assert_eq!(args.frames, 10);
        assert_eq!(args.clicks, vec![(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(args.seed, Some(5));
    }
}
