use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use drift_saver::{Overrides, SaverSettings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Particle screensaver with a countdown bar", long_about = None)]
struct Args {
    /// How long to stay open, in minutes (defaults to the configured duration, 60 seconds)
    minutes: Option<f64>,

    /// JSON settings file; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of particles
    #[arg(short, long)]
    particles: Option<usize>,

    /// Fixed random seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Bar easing: 0 linear, 1 cubic ease-out
    #[arg(short, long)]
    easing: Option<i32>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn load_settings(args: &Args) -> Result<SaverSettings> {
    let mut settings = match &args.config {
        Some(path) => SaverSettings::load(path)?,
        None => SaverSettings::default(),
    };
    settings.apply(&Overrides {
        minutes: args.minutes,
        particles: args.particles,
        seed: args.seed,
        easing: args.easing,
    });
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = load_settings(&args)?;

    if args.dump_config {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    log::info!("Drift saver starting...");
    log::info!(
        "{} particles, {}s on screen",
        settings.particle_count,
        settings.total_duration
    );

    drift_saver::run(settings).context("Screensaver error")?;

    Ok(())
}
