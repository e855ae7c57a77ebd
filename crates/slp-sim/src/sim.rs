//! The `Sim` struct and its phase loop.

use std::fmt;

use log::{debug, info, trace};

use slp_core::{NodeId, SimConfig, SimRng};
use slp_network::{ForwardingPolicy, GreedyEnergyPolicy, Network};

use crate::{HopRecord, Hunter, NoopObserver, PhaseLog, PhaseObserver, SimBuilder, SimResult};

// ── RunOutcome ────────────────────────────────────────────────────────────────

/// How a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutcome {
    /// The hunter reached the source in phase `phases`.
    Captured { phases: u64 },
    /// The phase ceiling was hit first.  Not a failure: the topology or
    /// energy budget simply kept the source hidden for `phases` phases.
    Inconclusive { phases: u64 },
}

impl RunOutcome {
    pub fn phases(self) -> u64 {
        match self {
            RunOutcome::Captured { phases } | RunOutcome::Inconclusive { phases } => phases,
        }
    }

    pub fn is_captured(self) -> bool {
        matches!(self, RunOutcome::Captured { .. })
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Captured { phases } => write!(f, "source captured after {phases} phases"),
            RunOutcome::Inconclusive { phases } => {
                write!(f, "inconclusive: no capture within {phases} phases")
            }
        }
    }
}

/// Outcome plus the full ordered phase-log sequence of one run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub source:  NodeId,
    pub logs:    Vec<PhaseLog>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P>` owns the network, the hunter and the energy stream, and drives
/// the phase loop:
///
/// 1. **Harvest** on every node, sink included.
/// 2. **Route** one message from the fixed source using `P`.
/// 3. **Record** the hop details and path.
/// 4. **Hunt**: update the hunter and merge its state into the record.
/// 5. **Stop** on capture, otherwise continue.
///
/// All cross-phase state lives in node energies and the hunter.  Create via
/// [`SimBuilder`].
pub struct Sim<P: ForwardingPolicy> {
    /// Configuration the run was built from.
    pub config: SimConfig,

    /// Nodes and neighbour lists.  Only the engine mutates energies.
    pub network: Network,

    /// Hop selection.  Consulted once per hop, never mutates the network.
    pub policy: P,

    pub hunter: Hunter,

    /// Originating node, fixed for the whole run.
    pub source: NodeId,

    /// Energy stream; drives every harvest after construction.
    pub(crate) energy_rng: SimRng,

    /// Phases completed so far.
    pub(crate) phase: u64,

    pub(crate) logs: Vec<PhaseLog>,
}

impl<P: ForwardingPolicy> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the hunter captures the source or `config.max_phases` is
    /// reached.  With `max_phases = None` the loop has no upper bound.
    ///
    /// Calls observer hooks at every phase boundary.  Use
    /// [`NoopObserver`] if you don't need callbacks.
    pub fn run<O: PhaseObserver>(&mut self, observer: &mut O) -> RunOutcome {
        info!(
            "run start: source {} ({:.2} from sink), hunter at {}",
            self.source,
            self.network.distance_to_sink(self.source),
            self.hunter.position(),
        );
        observer.on_run_start(&self.network, self.source);

        let outcome = loop {
            if self.hunter.is_captured() {
                break RunOutcome::Captured { phases: self.phase };
            }
            if self.config.max_phases.is_some_and(|max| self.phase >= max) {
                break RunOutcome::Inconclusive { phases: self.phase };
            }
            self.step_observed(observer);
        };

        info!("run end: {outcome}");
        observer.on_run_end(&outcome, &self.network);
        outcome
    }

    /// Run exactly `n` phases from the current position, stopping early
    /// only on capture.  Ignores `max_phases`.
    ///
    /// Useful for tests and fixed-length experiments.  Returns the number of
    /// phases actually run.
    pub fn run_phases<O: PhaseObserver>(&mut self, n: u64, observer: &mut O) -> u64 {
        let mut ran = 0;
        while ran < n && !self.hunter.is_captured() {
            self.step_observed(observer);
            ran += 1;
        }
        ran
    }

    /// Run one phase and return its log entry.
    ///
    /// A phase after capture is still evaluated (energy moves, traffic
    /// flows) but the hunter no longer changes.
    pub fn step(&mut self) -> &PhaseLog {
        self.step_observed(&mut NoopObserver)
    }

    /// Phases completed so far.
    pub fn phase(&self) -> u64 {
        self.phase
    }

    pub fn logs(&self) -> &[PhaseLog] {
        &self.logs
    }

    pub fn is_captured(&self) -> bool {
        self.hunter.is_captured()
    }

    /// Consume the runner and keep only the phase logs.
    pub fn into_logs(self) -> Vec<PhaseLog> {
        self.logs
    }

    // ── Core phase processing ─────────────────────────────────────────────

    fn step_observed<O: PhaseObserver>(&mut self, observer: &mut O) -> &PhaseLog {
        let log = self.process_phase();
        observer.on_phase_end(&log, &self.network);
        self.logs.push(log);
        &self.logs[self.logs.len() - 1]
    }

    fn process_phase(&mut self) -> PhaseLog {
        let phase = self.phase + 1;

        // ── ① Harvest ─────────────────────────────────────────────────────
        self.network.harvest_all(&mut self.energy_rng);
        let source_energy = self.network.node(self.source).energy;

        // ── ②③ Route and record ───────────────────────────────────────────
        let (path, hops) = self.route_message();
        let delivered = path.last().is_some_and(|n| n.is_sink());

        // ── ④ Hunt ────────────────────────────────────────────────────────
        let hunter_before = self.hunter.position();
        let was_captured = self.hunter.is_captured();
        self.hunter.observe(&path, self.source);
        let source_captured = !was_captured && self.hunter.is_captured();

        debug!(
            "phase {phase}: path {:?} ({}), hunter {} -> {}{}",
            path.iter().map(|n| n.0).collect::<Vec<_>>(),
            if delivered { "delivered" } else { "dead end" },
            hunter_before,
            self.hunter.position(),
            if source_captured { ", source captured" } else { "" },
        );

        self.phase = phase;
        PhaseLog {
            phase,
            source: self.source,
            source_energy,
            path,
            hops,
            delivered,
            hunter_before,
            hunter_after: self.hunter.position(),
            hunter_trail: self.hunter.trail().to_vec(),
            source_captured,
        }
    }

    /// Forward one message from the source until it reaches the sink or no
    /// eligible neighbour remains.
    ///
    /// Every accepted hop is strictly closer to the sink, so the loop takes
    /// at most `N` hops.
    fn route_message(&mut self) -> (Vec<NodeId>, Vec<HopRecord>) {
        let mut current = self.source;
        let mut path = vec![current];
        let mut hops = Vec::new();

        while !current.is_sink() {
            let decision = self.policy.select_next_hop(&self.network, current);
            hops.push(HopRecord {
                node:       current,
                energy:     self.network.node(current).energy,
                candidates: decision
                    .candidates
                    .iter()
                    .map(|&c| (c, self.network.node(c).energy))
                    .collect(),
            });

            let Some(next) = decision.next else {
                trace!("no eligible neighbour at {current}");
                break;
            };
            debug_assert!(
                self.network.distance_to_sink(next) < self.network.distance_to_sink(current),
                "policy broke the progress constraint: {current} -> {next}",
            );

            let outcome = self.network.transmit(current, next);
            trace!("hop {current} -> {next}: {outcome:?}");
            path.push(next);
            current = next;
        }

        (path, hops)
    }
}

// ── One-shot helper ───────────────────────────────────────────────────────────

/// Build a simulation from `config` with the default greedy policy, run it
/// to completion, and return the outcome with every phase log.
pub fn simulate(config: &SimConfig) -> SimResult<RunReport> {
    let mut sim = SimBuilder::new(config.clone(), GreedyEnergyPolicy).build()?;
    let outcome = sim.run(&mut NoopObserver);
    Ok(RunReport { outcome, source: sim.source, logs: sim.into_logs() })
}
