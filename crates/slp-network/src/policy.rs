//! Hop-selection trait and the default greedy energy-aware policy.
//!
//! # Pluggability
//!
//! `slp-sim` asks for each hop through the [`ForwardingPolicy`] trait, so an
//! application can swap in a privacy-aware variant (random walks, phantom
//! routing, …) without touching the phase loop.  [`GreedyEnergyPolicy`] is
//! the reference behaviour.
//!
//! A policy only reads the network.  The engine applies the chosen hop with
//! [`Network::transmit`] afterwards.

use slp_core::NodeId;

use crate::network::Network;

// ── HopDecision ───────────────────────────────────────────────────────────────

/// The outcome of one hop query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopDecision {
    /// Every neighbour that passed the eligibility filter, in neighbour
    /// enumeration order.  Logged even when empty.
    pub candidates: Vec<NodeId>,
    /// The chosen next hop, or `None` if no neighbour is eligible.
    pub next: Option<NodeId>,
}

impl HopDecision {
    pub fn no_path() -> Self {
        Self { candidates: Vec::new(), next: None }
    }

    #[inline]
    pub fn is_no_path(&self) -> bool {
        self.next.is_none()
    }
}

// ── ForwardingPolicy trait ────────────────────────────────────────────────────

/// Pluggable next-hop selection.
///
/// # Contract
///
/// Any `next` returned must be a neighbour of `current` that is strictly
/// closer to the sink than `current`.  The phase loop has no hop limit of
/// its own; that progress requirement is what guarantees it terminates.
///
/// Implementations must be `Send + Sync` so trial batches can share one
/// policy across worker threads.
pub trait ForwardingPolicy: Send + Sync {
    fn select_next_hop(&self, network: &Network, current: NodeId) -> HopDecision;
}

// ── GreedyEnergyPolicy ────────────────────────────────────────────────────────

/// Greedy geographic forwarding weighted by residual energy.
///
/// 1. Eligible: the sink, or any neighbour with `energy >= threshold`, that
///    is strictly closer to the sink than `current`.
/// 2. No eligible neighbour: no path this phase.
/// 3. The sink, when eligible, always wins.
/// 4. Otherwise the highest-energy candidate; ties go to the first one in
///    enumeration order.
///
/// Memoryless: every hop is decided from current energies and positions only.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyEnergyPolicy;

impl ForwardingPolicy for GreedyEnergyPolicy {
    fn select_next_hop(&self, network: &Network, current: NodeId) -> HopDecision {
        let candidates = eligible_candidates(network, current);
        let next = pick_candidate(network, &candidates);
        HopDecision { candidates, next }
    }
}

/// Neighbours of `current` that satisfy the energy and progress filters.
pub fn eligible_candidates(network: &Network, current: NodeId) -> Vec<NodeId> {
    let threshold = network.energy_config().threshold;
    let current_dist = network.distance_to_sink(current);
    network
        .neighbors(current)
        .iter()
        .copied()
        .filter(|&n| n.is_sink() || network.node(n).energy >= threshold)
        .filter(|&n| network.distance_to_sink(n) < current_dist)
        .collect()
}

/// Sink first, else the maximum-energy candidate with first-seen tie-break.
fn pick_candidate(network: &Network, candidates: &[NodeId]) -> Option<NodeId> {
    if candidates.iter().any(|n| n.is_sink()) {
        return Some(NodeId::SINK);
    }
    let mut best: Option<(NodeId, f64)> = None;
    for &id in candidates {
        let e = network.node(id).energy;
        // Strict `>` keeps the earliest candidate on equal energy.
        if best.is_none_or(|(_, be)| e > be) {
            best = Some((id, e));
        }
    }
    best.map(|(id, _)| id)
}
