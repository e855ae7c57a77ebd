//! hunt — source-location privacy demo for the slp_sim simulator.
//!
//! Scatters sensor nodes over a field, picks the node farthest from the
//! sink as the source, and routes one message per phase with the greedy
//! energy-aware policy while a hunter backtracks from the sink toward the
//! source.  A single run writes `transmission_logs.csv` and
//! `phase_summaries.csv` (plus `network_plot.json` with `--plot`);
//! `--trials N` instead reports mean and standard deviation of the
//! phases to capture over N energy seeds.
//!
//! Run with: `cargo run -p hunt -- --config demos/hunt/hunt.toml --plot`

mod settings;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info, warn};

use slp_core::SimConfig;
use slp_network::GreedyEnergyPolicy;
use slp_output::{CsvWriter, PhaseOutputObserver, PlotData, write_plot};
use slp_sim::{RunOutcome, SimBuilder, run_trials};

use settings::Cli;

fn main() -> Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("hunt"), LevelFilter::Debug)
        .filter(Some("slp_network"), LevelFilter::Debug)
        .filter(Some("slp_sim"), LevelFilter::Debug)
        .filter(Some("slp_output"), LevelFilter::Debug)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = cli.sim_config()?;

    println!("=== hunt — slp_sim ===");
    println!(
        "Nodes: {}  |  Field: {}×{}  |  Range: {}  |  Seeds: position {}, energy {}",
        config.field.node_count,
        config.field.width,
        config.field.height,
        config.field.comm_range,
        config.position_seed,
        config.energy_seed,
    );
    println!();

    match cli.trials {
        Some(trials) => run_batch(&config, trials),
        None => run_single(&cli, &config),
    }
}

// ── Single run ────────────────────────────────────────────────────────────────

fn run_single(cli: &Cli, config: &SimConfig) -> Result<()> {
    let mut sim = SimBuilder::new(config.clone(), GreedyEnergyPolicy).build()?;

    let degree = sim.network.degree_stats();
    println!(
        "Network: degree min {} / mean {:.1} / max {}, {} isolated",
        degree.min, degree.mean, degree.max, degree.isolated
    );
    if !sim.network.is_connected_to_sink(sim.source) {
        warn!("source {} has no path to the sink; expect an inconclusive run", sim.source);
    }
    println!(
        "Source: node {} at {} ({:.2} from sink)",
        sim.source,
        sim.network.node(sim.source).position,
        sim.network.distance_to_sink(sim.source),
    );

    std::fs::create_dir_all(&cli.output)?;
    let mut obs = PhaseOutputObserver::new(CsvWriter::new(&cli.output)?);

    let t0 = Instant::now();
    let outcome = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    let delivered = sim.logs().iter().filter(|l| l.delivered).count();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    match outcome {
        RunOutcome::Captured { phases } => println!("  source captured after {phases} phases"),
        RunOutcome::Inconclusive { phases } => {
            println!("  not captured within {phases} phases (hunter at {})", sim.hunter.position())
        }
    }
    println!("  delivered: {delivered}/{} phases", sim.phase());
    println!("  hunter trail: {} nodes", sim.hunter.trail().len());
    println!("  transmission_logs.csv : {} rows", obs.hop_rows());
    println!("  phase_summaries.csv   : {} rows", sim.phase());

    if cli.plot {
        let path = write_plot(&cli.output, &PlotData::from_sim(&sim))?;
        println!("  plot data: {}", path.display());
    }

    info!("outputs in {}", cli.output.display());
    Ok(())
}

// ── Trial batch ───────────────────────────────────────────────────────────────

fn run_batch(config: &SimConfig, trials: usize) -> Result<()> {
    let t0 = Instant::now();
    let summary = run_trials(config, &GreedyEnergyPolicy, trials, config.energy_seed)?;
    let elapsed = t0.elapsed();

    println!(
        "{} trials (energy seeds {}..{}) in {:.3} s",
        summary.trials(),
        summary.start_seed,
        summary.start_seed + trials as u64,
        elapsed.as_secs_f64(),
    );
    println!("{:<8} {:<8}", "Seed", "Outcome");
    println!("{}", "-".repeat(48));
    for (i, outcome) in summary.outcomes.iter().enumerate() {
        println!("{:<8} {}", summary.start_seed + i as u64, outcome);
    }
    println!();

    match (summary.mean(), summary.std_dev()) {
        (Some(mean), Some(sd)) => {
            println!("Mean phases to capture: {mean:.2}");
            println!("Standard deviation:     {sd:.2}");
        }
        _ => println!("No trial ended in capture."),
    }
    if summary.inconclusive() > 0 {
        println!("Inconclusive runs (excluded): {}", summary.inconclusive());
    }
    Ok(())
}
