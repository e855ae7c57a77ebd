//! Flat row types written by output backends.
//!
//! A [`PhaseLog`] flattens into one [`HopRow`] per forwarding node plus one
//! [`PhaseSummaryRow`].  Phase-level fields (path, hunter state) repeat on
//! every hop row so each row stands alone.

use std::fmt::Write;

use slp_sim::PhaseLog;

/// One forwarding step of one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct HopRow {
    pub phase:           u64,
    /// 1-based position of this hop within the phase.
    pub hop:             usize,
    pub node:            u32,
    pub energy:          f64,
    /// Eligible `(neighbour, energy)` pairs seen at this node.
    pub valid_neighbors: Vec<(u32, f64)>,
    pub path:            Vec<u32>,
    pub hunter_position: u32,
    pub hunter_trail:    Vec<u32>,
    pub source_captured: bool,
}

impl HopRow {
    /// Flatten a phase log into its hop rows, in hop order.
    pub fn from_log(log: &PhaseLog) -> Vec<HopRow> {
        let path: Vec<u32> = log.path.iter().map(|n| n.0).collect();
        let trail: Vec<u32> = log.hunter_trail.iter().map(|n| n.0).collect();
        log.hops
            .iter()
            .enumerate()
            .map(|(i, hop)| HopRow {
                phase:           log.phase,
                hop:             i + 1,
                node:            hop.node.0,
                energy:          hop.energy,
                valid_neighbors: hop.candidates.iter().map(|&(n, e)| (n.0, e)).collect(),
                path:            path.clone(),
                hunter_position: log.hunter_after.0,
                hunter_trail:    trail.clone(),
                source_captured: log.source_captured,
            })
            .collect()
    }
}

/// Summary of one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSummaryRow {
    pub phase:           u64,
    pub source:          u32,
    pub source_energy:   f64,
    /// Number of nodes on the path, source included.
    pub path_length:     usize,
    pub delivered:       bool,
    pub hunter_before:   u32,
    pub hunter_after:    u32,
    pub source_captured: bool,
}

impl From<&PhaseLog> for PhaseSummaryRow {
    fn from(log: &PhaseLog) -> Self {
        Self {
            phase:           log.phase,
            source:          log.source.0,
            source_energy:   log.source_energy,
            path_length:     log.path.len(),
            delivered:       log.delivered,
            hunter_before:   log.hunter_before.0,
            hunter_after:    log.hunter_after.0,
            source_captured: log.source_captured,
        }
    }
}

// ── Cell formatting ───────────────────────────────────────────────────────────

/// Energies are reported to two decimals.
pub fn format_energy(e: f64) -> String {
    format!("{e:.2}")
}

/// `[5, 3, 0]`
pub fn format_id_list(ids: &[u32]) -> String {
    let mut out = String::from("[");
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{id}");
    }
    out.push(']');
    out
}

/// `[(3, 1.25), (7, 0.90)]`
pub fn format_candidates(pairs: &[(u32, f64)]) -> String {
    let mut out = String::from("[");
    for (i, (id, e)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "({id}, {e:.2})");
    }
    out.push(']');
    out
}
