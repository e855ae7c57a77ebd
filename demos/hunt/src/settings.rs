//! Command-line flags and TOML config loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use slp_core::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "hunt")]
#[command(about = "Source-location privacy: greedy energy-aware routing against a backtracing hunter", long_about = None)]
pub struct Cli {
    /// TOML config file (missing keys keep their defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed of the position stream (topology)
    #[arg(long)]
    pub position_seed: Option<u64>,

    /// Seed of the energy stream (first trial seed when --trials is set)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Phase ceiling; a run that reaches it is reported as inconclusive
    #[arg(long, conflicts_with = "unbounded")]
    pub max_phases: Option<u64>,

    /// Run until capture with no phase ceiling
    #[arg(long)]
    pub unbounded: bool,

    /// Output directory for CSV and plot files
    #[arg(short, long, default_value = "output/hunt")]
    pub output: PathBuf,

    /// Also write network_plot.json
    #[arg(long)]
    pub plot: bool,

    /// Run N trials with increasing energy seeds and report statistics
    #[arg(short, long)]
    pub trials: Option<usize>,
}

impl Cli {
    /// Load the config file (or defaults) and apply flag overrides.
    pub fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SimConfig::default(),
        };
        if let Some(seed) = self.position_seed {
            config.position_seed = seed;
        }
        if let Some(seed) = self.seed {
            config.energy_seed = seed;
        }
        if self.unbounded {
            config.max_phases = None;
        } else if let Some(max) = self.max_phases {
            config.max_phases = Some(max);
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("failed to parse config file {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<SimConfig> {
    Ok(toml::from_str(content)?)
}
