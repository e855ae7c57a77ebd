//! Per-phase records produced by the engine.
//!
//! A `PhaseLog` is built once at the end of its phase and never mutated;
//! output collaborators (CSV, plot export) only read it.

use slp_core::NodeId;

/// What the forwarding loop saw at one node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HopRecord {
    /// The node holding the message.
    pub node: NodeId,
    /// Its energy before it transmitted.
    pub energy: f64,
    /// Eligible neighbours and their energies, in enumeration order.
    pub candidates: Vec<(NodeId, f64)>,
}

/// Everything that happened in one phase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseLog {
    /// 1-based phase number.
    pub phase: u64,
    pub source: NodeId,
    /// Source energy after this phase's harvest, before routing.
    pub source_energy: f64,
    /// Node ids from the source to where forwarding stopped.
    pub path: Vec<NodeId>,
    /// One record per node that attempted to forward (the sink never does).
    pub hops: Vec<HopRecord>,
    /// `true` if `path` ends at the sink.
    pub delivered: bool,
    pub hunter_before: NodeId,
    pub hunter_after: NodeId,
    /// Full hunter trail as of the end of this phase.
    pub hunter_trail: Vec<NodeId>,
    /// Set on the phase in which the hunter reached the source.
    pub source_captured: bool,
}

impl PhaseLog {
    /// Number of accepted hops (edges) on this phase's path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// `true` if the hunter moved during this phase.
    pub fn hunter_moved(&self) -> bool {
        self.hunter_before != self.hunter_after
    }
}
