//! disk-sched CLI: run, compare and list disk-scheduling policies.

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use disk_sched::config::SimulationConfig;
use disk_sched::models::{HistoryEntry, CYLINDER_COUNT, REQUEST_COUNT};
use disk_sched::policy::Algorithm;
use disk_sched::simulation::{DisplaySink, Phase, SimulationEngine, Snapshot, TracingSink};

#[derive(Parser)]
#[command(name = "disk-sched")]
#[command(version, about = "Disk-scheduling simulator over staggered request waves")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation, printing every step.
    Run {
        /// Policy to simulate (FCFS, SSTF, SCAN, CSCAN, NSTEP, ESCHENBACH).
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        /// Seed for the request generator.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Speed level, 1 (slowest) to 10 (fastest).
        #[arg(long)]
        speed: Option<u8>,

        /// Path to simulation config (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Wait out the step delay between steps.
        #[arg(long)]
        realtime: bool,

        /// Emit steps as `tracing` events instead of printing them.
        #[arg(long)]
        trace: bool,
    },

    /// Run every policy on the same request set and compare.
    Compare {
        /// Seed for the request generator.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Path to simulation config (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the history as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the available policies.
    List,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            algorithm,
            seed,
            speed,
            config,
            realtime,
            trace,
        } => run(config.as_deref(), algorithm, seed, speed, realtime, trace),
        Commands::Compare { seed, config, json } => compare(config.as_deref(), seed, json),
        Commands::List => {
            list();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let doc = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SimulationConfig::from_toml_str(&doc).with_context(|| format!("parsing config {}", path.display()))
}

fn run(
    config_path: Option<&Path>,
    algorithm: Option<Algorithm>,
    seed: Option<u64>,
    speed: Option<u8>,
    realtime: bool,
    trace: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(algorithm) = algorithm {
        config = config.with_algorithm(algorithm);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(speed) = speed {
        config = config.with_speed(speed);
    }

    let sink: Box<dyn DisplaySink> = if trace {
        Box::new(TracingSink)
    } else {
        Box::new(StdoutSink)
    };
    let mut engine = SimulationEngine::with_sink(config, sink);
    println!(
        "{} | speed {} ({}, {} ms/step)",
        engine.algorithm().long_name(),
        engine.config().speed,
        engine.config().speed_label(),
        engine.config().step_delay().as_millis()
    );

    engine.start();
    if realtime {
        while let Some(ticket) = engine.next_step() {
            let wait = ticket.due_at().saturating_sub(engine.now());
            thread::sleep(wait);
            let _ = engine.advance(wait);
        }
    } else {
        let _ = engine.run_to_completion();
    }

    let kpi = engine.kpi();
    println!();
    println!("Requests served:    {}", kpi.processed);
    println!("Total tracks:       {}", kpi.total_tracks);
    println!("Mean seek:          {:.2}", kpi.mean_seek);
    println!("Longest seek:       {}", kpi.max_seek);
    println!("Direction changes:  {}", kpi.direction_changes);
    Ok(())
}

fn compare(config_path: Option<&Path>, seed: Option<u64>, json: bool) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut engine = SimulationEngine::new(config);
    for algorithm in Algorithm::ALL {
        engine.select_algorithm(algorithm);
        engine.start();
        let _ = engine.run_to_completion();
    }

    let history = engine.history();
    if json {
        let out = serde_json::to_string_pretty(history.entries()).context("serializing history")?;
        println!("{out}");
        return Ok(());
    }

    let best = history.best().map(|e| e.algorithm);
    println!("{:<12} {:<26} {:>7} {:>8}", "ALGORITHM", "", "TRACKS", "CHANGES");
    for entry in history.entries() {
        print_entry(entry, best == Some(entry.algorithm));
    }
    Ok(())
}

fn print_entry(entry: &HistoryEntry, best: bool) {
    println!(
        "{:<12} {:<26} {:>7} {:>8}{}",
        entry.algorithm.name(),
        entry.algorithm.long_name(),
        entry.total_tracks,
        entry.total_direction_changes,
        if best { "  *" } else { "" }
    );
}

fn list() {
    for algorithm in Algorithm::ALL {
        println!("{:<12} {}", algorithm.name(), algorithm.long_name());
        println!("             {}", algorithm.summary());
    }
}

/// Prints log lines and a one-line track view after each step.
struct StdoutSink;

impl DisplaySink for StdoutSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        if snapshot.latest.is_none() || snapshot.phase == Phase::Completed {
            return;
        }
        let track: String = (0..CYLINDER_COUNT)
            .map(|c| if c == snapshot.head { '#' } else { '.' })
            .collect();
        println!(
            "  [{track}] {:>2}/{REQUEST_COUNT} wave {} {}",
            snapshot.processed,
            snapshot.wave,
            snapshot.direction.arrow()
        );
    }

    fn on_log(&mut self, line: &str) {
        println!("{line}");
    }
}
