//! Prefetcher trace-replay CLI.
//!
//! This binary replays a memory access trace through one of the prefetcher
//! models and reports what it did. It performs:
//! 1. **Configuration:** Loads a JSON config (or the defaults) and applies command-line overrides.
//! 2. **Replay:** Feeds every trace record through the engine and the replay host.
//! 3. **Reporting:** Prints the statistics as a text banner or as JSON.

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pfsim_core::config::{Config, PrefetcherKind};
use pfsim_core::sim::{Simulator, load_trace};

#[derive(Parser, Debug)]
#[command(
    name = "pfsim",
    author,
    version,
    about = "Trace-driven data prefetcher simulator",
    long_about = "Replay a memory access trace through a hardware prefetcher model.\n\nTrace lines are `<pc> <addr> [hit|miss]`, decimal or 0x-prefixed hex; `#` starts a comment.\n\nExamples:\n  pfsim run --trace loop.trace\n  pfsim run --trace loop.trace --prefetcher rpt --json\n  pfsim run --trace loop.trace --prefetcher vector\n  pfsim run --trace loop.trace --config ghb.json --verbose"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace and print prefetch statistics.
    Run {
        /// Access trace to replay.
        #[arg(short, long)]
        trace: PathBuf,

        /// JSON configuration file (defaults are used when omitted).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Prefetcher strategy, overriding the configuration file.
        #[arg(short, long)]
        prefetcher: Option<PrefetcherKind>,

        /// Print statistics as JSON instead of the text report.
        #[arg(long)]
        json: bool,

        /// Enable debug logging (`RUST_LOG` takes precedence).
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            trace,
            config,
            prefetcher,
            json,
            verbose,
        } => {
            init_logging(verbose);
            cmd_run(&trace, config.as_deref(), prefetcher, json);
        }
    }
}

/// Installs the `tracing` subscriber on stderr.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration and trace, replays the trace, and prints the report.
///
/// Exits with code 1 if the configuration or the trace cannot be loaded.
fn cmd_run(
    trace_path: &std::path::Path,
    config_path: Option<&std::path::Path>,
    prefetcher: Option<PrefetcherKind>,
    json: bool,
) {
    let mut config = match config_path {
        Some(path) => load_config(path),
        None => Config::default(),
    };
    if let Some(kind) = prefetcher {
        config.prefetcher = kind;
    }
    debug!(?config, "resolved configuration");

    let events = match load_trace(trace_path) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("error: failed to load trace {}: {e}", trace_path.display());
            process::exit(1);
        }
    };
    info!(events = events.len(), trace = %trace_path.display(), "loaded trace");

    let mut sim = Simulator::new(&config);
    let stats = sim.run(events);

    if json {
        match serde_json::to_string_pretty(&stats) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: failed to encode statistics: {e}");
                process::exit(1);
            }
        }
    } else {
        stats.print(sim.engine.name());
    }
}

/// Reads and validates a JSON configuration file, exiting on failure.
fn load_config(path: &std::path::Path) -> Config {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: failed to read config {}: {e}", path.display());
            process::exit(1);
        }
    };
    match Config::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: invalid config {}: {e}", path.display());
            process::exit(1);
        }
    }
}
