//! JSON export of a finished run for the external plotting tool.
//!
//! Writes `network_plot.json` with node coordinates, energies and roles, the
//! path of every phase, and the hunter trail.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use slp_core::NodeId;
use slp_network::{ForwardingPolicy, Network};
use slp_sim::{PhaseLog, Sim};

use crate::OutputResult;

pub const PLOT_FILE: &str = "network_plot.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Sink,
    Source,
    Relay,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotNode {
    pub id:        u32,
    pub x:         f64,
    pub y:         f64,
    pub energy:    f64,
    pub role:      NodeRole,
    pub neighbors: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotPhase {
    pub phase:     u64,
    pub path:      Vec<u32>,
    pub delivered: bool,
    pub hunter:    u32,
}

/// Snapshot of a run in the shape the plotting tool reads.
#[derive(Debug, Clone, Serialize)]
pub struct PlotData {
    pub sink:         u32,
    pub source:       u32,
    pub comm_range:   f64,
    pub nodes:        Vec<PlotNode>,
    pub phases:       Vec<PlotPhase>,
    pub hunter_trail: Vec<u32>,
    pub captured:     bool,
}

impl PlotData {
    /// Build from the network state, the source, the phase logs and the
    /// hunter trail.
    pub fn new(network: &Network, source: NodeId, logs: &[PhaseLog], trail: &[NodeId]) -> Self {
        let nodes = network
            .nodes()
            .iter()
            .map(|n| PlotNode {
                id:        n.id.0,
                x:         n.position.x,
                y:         n.position.y,
                energy:    n.energy,
                role:      if n.is_sink() {
                    NodeRole::Sink
                } else if n.id == source {
                    NodeRole::Source
                } else {
                    NodeRole::Relay
                },
                neighbors: n.neighbors.iter().map(|id| id.0).collect(),
            })
            .collect();

        let phases = logs
            .iter()
            .map(|log| PlotPhase {
                phase:     log.phase,
                path:      log.path.iter().map(|id| id.0).collect(),
                delivered: log.delivered,
                hunter:    log.hunter_after.0,
            })
            .collect();

        Self {
            sink: NodeId::SINK.0,
            source: source.0,
            comm_range: network.comm_range(),
            nodes,
            phases,
            hunter_trail: trail.iter().map(|id| id.0).collect(),
            captured: logs.last().is_some_and(|l| l.source_captured),
        }
    }

    pub fn from_sim<P: ForwardingPolicy>(sim: &Sim<P>) -> Self {
        Self::new(&sim.network, sim.source, sim.logs(), sim.hunter.trail())
    }
}

/// Write `network_plot.json` into `dir`, returning the file path.
pub fn write_plot(dir: &Path, data: &PlotData) -> OutputResult<PathBuf> {
    let path = dir.join(PLOT_FILE);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&path, json)?;
    log::info!("wrote {} ({} nodes, {} phases)", path.display(), data.nodes.len(), data.phases.len());
    Ok(path)
}
