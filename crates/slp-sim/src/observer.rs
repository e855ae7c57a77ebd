//! Simulation observer trait for progress reporting and data collection.

use slp_core::NodeId;
use slp_network::Network;

use crate::{PhaseLog, RunOutcome};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// phase loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: capture reporter
///
/// ```rust,ignore
/// struct CapturePrinter;
///
/// impl PhaseObserver for CapturePrinter {
///     fn on_phase_end(&mut self, log: &PhaseLog, _network: &Network) {
///         if log.source_captured {
///             println!("captured in phase {}", log.phase);
///         }
///     }
/// }
/// ```
pub trait PhaseObserver {
    /// Called once before the first phase of [`Sim::run`][crate::Sim::run].
    fn on_run_start(&mut self, _network: &Network, _source: NodeId) {}

    /// Called after each phase's log entry, hunter update included, is final.
    ///
    /// `network` reflects node energies at the end of that phase.
    fn on_phase_end(&mut self, _log: &PhaseLog, _network: &Network) {}

    /// Called once after the run stops, on capture or at the phase ceiling.
    fn on_run_end(&mut self, _outcome: &RunOutcome, _network: &Network) {}
}

/// A [`PhaseObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl PhaseObserver for NoopObserver {}
