//! Immutable simulation configuration.
//!
//! A [`SimConfig`] is built once (from `Default`, code, or a TOML file via
//! the `serde` feature), validated with [`SimConfig::validate`], and passed by
//! reference into network construction and the simulation runner.  Nothing
//! reads configuration from global state, so several simulations with
//! different parameters can coexist in one process.

use crate::{Point, SlpError, SlpResult};

// ── FieldConfig ───────────────────────────────────────────────────────────────

/// Geometry of the sensor field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    /// Number of field nodes `N` (ids `1..=N`).  The sink is extra.
    pub node_count: usize,

    /// Field extent along x; nodes are placed in `[0, width]`.
    pub width: f64,

    /// Field extent along y; nodes are placed in `[0, height]`.
    pub height: f64,

    /// Communication range `R`.  Two nodes are neighbours iff their distance
    /// is `<= comm_range`.
    pub comm_range: f64,

    /// Fixed position of the sink.  May lie outside the field rectangle.
    pub sink_position: Point,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            node_count:    50,
            width:         100.0,
            height:        100.0,
            comm_range:    25.0,
            sink_position: Point::new(50.0, 50.0),
        }
    }
}

// ── EnergyConfig ──────────────────────────────────────────────────────────────

/// Energy model parameters shared by every node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyConfig {
    /// Minimum energy to transmit, and to be chosen as a relay.
    pub threshold: f64,

    /// Energy deducted from the sender on a successful transmission.
    pub tx_cost: f64,

    /// Upper clamp for every node's energy.
    pub max_energy: f64,

    /// Lower bound of the per-phase harvest draw.
    pub harvest_min: f64,

    /// Upper bound of the per-phase harvest draw.
    pub harvest_max: f64,

    /// Lower bound of a field node's initial energy.
    pub initial_min: f64,

    /// Upper bound of a field node's initial energy.
    pub initial_max: f64,

    /// Fixed initial energy of the sink.  The sink never pays a transmit
    /// cost, but a receiver below `threshold` still defers the sender.
    pub sink_energy: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            threshold:   0.5,
            tx_cost:     0.3,
            max_energy:  2.0,
            harvest_min: 0.05,
            harvest_max: 0.2,
            initial_min: 0.5,
            initial_max: 2.0,
            sink_energy: 2.0,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML file by the application crate and passed to
/// the simulation runner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub field: FieldConfig,

    pub energy: EnergyConfig,

    /// Seed of the position stream.  The same seed always produces the same
    /// topology.
    pub position_seed: u64,

    /// Seed of the energy stream (initial energies and harvesting).  This is
    /// the per-run seed varied by repeated trials.
    pub energy_seed: u64,

    /// Phase ceiling.  `None` runs until capture with no upper bound.
    pub max_phases: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field:         FieldConfig::default(),
            energy:        EnergyConfig::default(),
            position_seed: 42,
            energy_seed:   42,
            max_phases:    Some(10_000),
        }
    }
}

impl SimConfig {
    /// Return a copy of this configuration with a different energy seed.
    pub fn with_energy_seed(&self, seed: u64) -> Self {
        Self { energy_seed: seed, ..self.clone() }
    }

    /// Check every parameter, failing on the first invalid one.
    pub fn validate(&self) -> SlpResult<()> {
        self.field.validate()?;
        self.energy.validate()?;
        if self.max_phases == Some(0) {
            return Err(SlpError::Config("max_phases must be at least 1".into()));
        }
        Ok(())
    }
}

impl FieldConfig {
    pub fn validate(&self) -> SlpResult<()> {
        if self.node_count == 0 {
            return Err(SlpError::Config("node_count must be at least 1".into()));
        }
        if u32::try_from(self.node_count).is_err() {
            return Err(SlpError::Config(format!(
                "node_count {} exceeds the node id space",
                self.node_count
            )));
        }
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("comm_range", self.comm_range)?;
        if !self.sink_position.is_finite() {
            return Err(SlpError::Config(format!(
                "sink_position {} is not finite",
                self.sink_position
            )));
        }
        Ok(())
    }
}

impl EnergyConfig {
    pub fn validate(&self) -> SlpResult<()> {
        non_negative("threshold", self.threshold)?;
        non_negative("tx_cost", self.tx_cost)?;
        positive("max_energy", self.max_energy)?;
        non_negative("harvest_min", self.harvest_min)?;
        non_negative("harvest_max", self.harvest_max)?;
        non_negative("initial_min", self.initial_min)?;
        non_negative("initial_max", self.initial_max)?;
        non_negative("sink_energy", self.sink_energy)?;

        // A node allowed to transmit must always be able to afford it,
        // otherwise a deduction could drive energy below zero.
        if self.tx_cost > self.threshold {
            return Err(SlpError::Config(format!(
                "tx_cost ({}) must not exceed threshold ({})",
                self.tx_cost, self.threshold
            )));
        }
        ordered("harvest_min", self.harvest_min, "harvest_max", self.harvest_max)?;
        ordered("initial_min", self.initial_min, "initial_max", self.initial_max)?;
        ordered("initial_max", self.initial_max, "max_energy", self.max_energy)?;
        ordered("sink_energy", self.sink_energy, "max_energy", self.max_energy)?;
        Ok(())
    }
}

// ── Validation helpers ────────────────────────────────────────────────────────

fn positive(name: &str, v: f64) -> SlpResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(SlpError::Config(format!("{name} must be positive and finite, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> SlpResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(SlpError::Config(format!("{name} must be non-negative and finite, got {v}")))
    }
}

fn ordered(lo_name: &str, lo: f64, hi_name: &str, hi: f64) -> SlpResult<()> {
    if lo <= hi {
        Ok(())
    } else {
        Err(SlpError::Config(format!(
            "{lo_name} ({lo}) must not exceed {hi_name} ({hi})"
        )))
    }
}
