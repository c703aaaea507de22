use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tileworld_lib::model::config::AppConfig;
use tileworld_lib::model::metrics::init_logging;
use tileworld_lib::model::world::World;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless tile-world simulation runner", long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ticks to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Override the terrain seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the map side (64, 128, 256, 512 or 1024)
    #[arg(long)]
    size: Option<u32>,

    /// Print a population line every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    report_every: u64,

    /// Print the generated map as text before running
    #[arg(long)]
    print_map: bool,

    /// Write the final world snapshot as JSON to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.terrain.seed = seed;
    }
    if let Some(size) = args.size {
        config.world.size = size;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = load_config(&args)?;
    let frame = 1.0 / config.clock.target_fps.max(1) as f64;
    let mut world = World::new(config)?;

    if args.print_map {
        print!("{}", world.map().render_text());
    }

    for _ in 0..args.ticks {
        world.advance(frame);
        let tick = world.tick();
        if args.report_every > 0 && tick % args.report_every == 0 {
            let stats = world.stats();
            println!(
                "tick {tick:>7}  fish {:>3}  pigs {:>3}  cows {:>3}  wolves {:>3}  packs {:>2}",
                stats.fish, stats.pigs, stats.cows, stats.wolves, stats.pack_leaders
            );
        }
    }

    let stats = world.stats();
    println!(
        "Finished {} ticks: {} agents, {} kills, {} starved",
        world.tick(),
        stats.total(),
        world.metrics.counter("kills"),
        world.metrics.counter("starved"),
    );

    if let Some(path) = &args.snapshot {
        let json = serde_json::to_string_pretty(&world.snapshot())?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    }
    Ok(())
}
