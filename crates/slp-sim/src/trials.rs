//! Repeated-trial statistics.
//!
//! A batch holds the topology fixed (same position seed) and re-runs the
//! whole simulation with energy seeds `start_seed, start_seed + 1, …`.  Runs
//! that hit the phase ceiling are counted but kept out of the mean and
//! standard deviation, which describe phases-to-capture only.

use log::{debug, info};

use slp_core::SimConfig;
use slp_network::ForwardingPolicy;

use crate::{NoopObserver, RunOutcome, SimBuilder, SimResult};

/// Aggregate result of a trial batch.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialSummary {
    pub start_seed: u64,
    /// One outcome per trial, in seed order.
    pub outcomes: Vec<RunOutcome>,
}

impl TrialSummary {
    pub fn trials(&self) -> usize {
        self.outcomes.len()
    }

    /// Phases-to-capture of the captured runs, in seed order.
    pub fn capture_phases(&self) -> Vec<u64> {
        self.outcomes
            .iter()
            .filter(|o| o.is_captured())
            .map(|o| o.phases())
            .collect()
    }

    pub fn inconclusive(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_captured()).count()
    }

    /// Mean phases-to-capture, or `None` if nothing was captured.
    pub fn mean(&self) -> Option<f64> {
        let phases = self.capture_phases();
        if phases.is_empty() {
            return None;
        }
        Some(phases.iter().sum::<u64>() as f64 / phases.len() as f64)
    }

    /// Population standard deviation of phases-to-capture.
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let phases = self.capture_phases();
        let var = phases
            .iter()
            .map(|&p| {
                let d = p as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / phases.len() as f64;
        Some(var.sqrt())
    }
}

/// Run `trials` simulations with energy seeds counting up from `start_seed`.
///
/// With the `parallel` feature the runs execute on Rayon's pool; outcomes
/// are identical either way because each run owns its own streams.
pub fn run_trials<P>(
    config:     &SimConfig,
    policy:     &P,
    trials:     usize,
    start_seed: u64,
) -> SimResult<TrialSummary>
where
    P: ForwardingPolicy + Clone,
{
    config.validate()?;
    info!("running {trials} trials from energy seed {start_seed}");

    let run_one = |i: usize| -> SimResult<RunOutcome> {
        let seed = start_seed.wrapping_add(i as u64);
        let mut sim = SimBuilder::new(config.with_energy_seed(seed), policy.clone()).build()?;
        let outcome = sim.run(&mut NoopObserver);
        debug!("trial {} (seed {seed}): {outcome}", i + 1);
        Ok(outcome)
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes = (0..trials).map(run_one).collect::<SimResult<Vec<_>>>()?;

    #[cfg(feature = "parallel")]
    let outcomes = {
        use rayon::prelude::*;
        (0..trials).into_par_iter().map(run_one).collect::<SimResult<Vec<_>>>()?
    };

    let summary = TrialSummary { start_seed, outcomes };
    match (summary.mean(), summary.std_dev()) {
        (Some(mean), Some(sd)) => info!(
            "trials done: mean {mean:.2} phases, std dev {sd:.2}, {} inconclusive",
            summary.inconclusive()
        ),
        _ => info!("trials done: no captures, {} inconclusive", summary.inconclusive()),
    }
    Ok(summary)
}
