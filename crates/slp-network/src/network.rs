//! Sensor network representation and builder.
//!
//! # Data layout
//!
//! Nodes live in a single `Vec<SensorNode>` indexed by `NodeId`: slot 0 is
//! the sink, slots `1..=N` are field nodes.  Each node carries its own
//! neighbour list, so a hop decision touches one contiguous slice.
//!
//! # Neighbour construction
//!
//! Two nodes are neighbours iff their Euclidean distance is `<= comm_range`.
//! The range query runs against an R-tree (via `rstar`) bulk-loaded once at
//! build time; each result list is then re-filtered with the exact distance
//! test and sorted into the canonical enumeration order (field nodes by
//! ascending id, the sink last).  The hop-selection tie-break depends on that
//! order, so it must not vary with R-tree internals.
//!
//! The graph is built once and never changes afterwards.

use std::collections::VecDeque;

use log::{debug, info};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use slp_core::{EnergyConfig, NodeId, Point, RngStreams, SimConfig, SimRng, SlpError, SlpResult};

use crate::node::{SensorNode, TransmitOutcome};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Canonical neighbour ordering key: field nodes by id, then the sink.
#[inline]
fn enumeration_key(id: NodeId) -> (bool, u32) {
    (id.is_sink(), id.0)
}

// ── DegreeStats ───────────────────────────────────────────────────────────────

/// Neighbour-count summary over the field nodes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DegreeStats {
    pub min:  usize,
    pub max:  usize,
    pub mean: f64,
    /// Field nodes with no neighbours at all.
    pub isolated: usize,
}

// ── Network ───────────────────────────────────────────────────────────────────

/// One sink plus `N` field nodes and their fixed neighbour lists.
///
/// Do not construct directly; use [`Network::generate`] for a random field or
/// [`NetworkBuilder`] for a hand-placed one.
#[derive(Clone, Debug)]
pub struct Network {
    nodes:      Vec<SensorNode>,
    comm_range: f64,
    energy:     EnergyConfig,
}

impl Network {
    /// Build a random field from `config`.
    ///
    /// Positions come from `streams.positions`, initial field-node energies
    /// from `streams.energy`.  The same position seed therefore yields the
    /// same positions and neighbour graph whatever the energy seed.
    pub fn generate(config: &SimConfig, streams: &mut RngStreams) -> SlpResult<Self> {
        config.validate()?;
        let field = &config.field;
        let energy = &config.energy;

        let mut builder = NetworkBuilder::new(energy.clone(), field.comm_range, field.sink_position)
            .with_capacity(field.node_count);
        for _ in 0..field.node_count {
            let pos = Point::new(
                streams.positions.uniform(0.0, field.width),
                streams.positions.uniform(0.0, field.height),
            );
            let e = streams.energy.uniform(energy.initial_min, energy.initial_max);
            builder.add_node(pos, e);
        }

        let net = builder.build();
        let degrees = net.degree_stats();
        info!(
            "generated network: {} field nodes, range {}, degree min/mean/max {}/{:.1}/{}, {} isolated",
            net.field_node_count(),
            net.comm_range,
            degrees.min,
            degrees.mean,
            degrees.max,
            degrees.isolated,
        );
        Ok(net)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Total nodes including the sink.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn field_node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn comm_range(&self) -> f64 {
        self.comm_range
    }

    pub fn energy_config(&self) -> &EnergyConfig {
        &self.energy
    }

    // ── Node access ───────────────────────────────────────────────────────

    /// All nodes, sink first.
    pub fn nodes(&self) -> &[SensorNode] {
        &self.nodes
    }

    /// Field nodes only (ids `1..=N`).
    pub fn field_nodes(&self) -> &[SensorNode] {
        &self.nodes[1..]
    }

    pub fn sink(&self) -> &SensorNode {
        &self.nodes[NodeId::SINK.index()]
    }

    /// Look up a node.
    ///
    /// # Panics
    /// Panics if `id` is not in this network; ids handed out by the network
    /// itself are always valid.
    #[inline]
    pub fn node(&self, id: NodeId) -> &SensorNode {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&SensorNode> {
        self.nodes.get(id.index())
    }

    /// Fallible lookup for ids coming from outside the network.
    pub fn try_node(&self, id: NodeId) -> SlpResult<&SensorNode> {
        self.get(id).ok_or(SlpError::NodeNotFound(id))
    }

    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].neighbors
    }

    #[inline]
    pub fn distance_to_sink(&self, id: NodeId) -> f64 {
        self.node(id).position.distance(self.sink().position)
    }

    /// The field node farthest from the sink; ties go to the lowest id.
    ///
    /// Returns `None` only for a network without field nodes.
    pub fn farthest_from_sink(&self) -> Option<NodeId> {
        let sink = self.sink().position;
        let mut best: Option<(NodeId, f64)> = None;
        for node in self.field_nodes() {
            let d = node.position.distance(sink);
            if best.is_none_or(|(_, bd)| d > bd) {
                best = Some((node.id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    // ── Mutation (engine only) ────────────────────────────────────────────

    /// Harvest on every node, sink included, in id order.
    pub fn harvest_all(&mut self, rng: &mut SimRng) {
        let cfg = &self.energy;
        for node in &mut self.nodes {
            node.harvest_energy(rng, cfg);
        }
    }

    /// Let `from` attempt a transmission to `to`.
    pub fn transmit(&mut self, from: NodeId, to: NodeId) -> TransmitOutcome {
        let receiver_energy = self.nodes[to.index()].energy;
        let cfg = &self.energy;
        self.nodes[from.index()].transmit(receiver_energy, cfg)
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    pub fn degree_stats(&self) -> DegreeStats {
        let field = self.field_nodes();
        let degrees = field.iter().map(|n| n.neighbors.len());
        let min = degrees.clone().min().unwrap_or(0);
        let max = degrees.clone().max().unwrap_or(0);
        let total: usize = degrees.clone().sum();
        let isolated = degrees.filter(|&d| d == 0).count();
        DegreeStats {
            min,
            max,
            mean: if field.is_empty() { 0.0 } else { total as f64 / field.len() as f64 },
            isolated,
        }
    }

    /// `true` if `id` can reach the sink through the neighbour graph,
    /// ignoring energy and the progress constraint.
    pub fn is_connected_to_sink(&self, id: NodeId) -> bool {
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([id]);
        seen[id.index()] = true;
        while let Some(cur) = queue.pop_front() {
            if cur.is_sink() {
                return true;
            }
            for &next in self.neighbors(cur) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] from explicit positions and energies, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use slp_core::{EnergyConfig, NodeId, Point};
/// use slp_network::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new(EnergyConfig::default(), 10.0, Point::new(0.0, 0.0));
/// let a = b.add_node(Point::new(5.0, 0.0), 1.0);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.neighbors(a), &[NodeId::SINK]);
/// ```
pub struct NetworkBuilder {
    energy:      EnergyConfig,
    comm_range:  f64,
    sink:        Point,
    sink_energy: f64,
    nodes:       Vec<(Point, f64)>,
}

impl NetworkBuilder {
    pub fn new(energy: EnergyConfig, comm_range: f64, sink: Point) -> Self {
        Self {
            sink_energy: energy.sink_energy,
            energy,
            comm_range,
            sink,
            nodes: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of field nodes.
    pub fn with_capacity(mut self, nodes: usize) -> Self {
        self.nodes.reserve(nodes);
        self
    }

    /// Override the sink's initial energy.
    pub fn sink_energy(mut self, energy: f64) -> Self {
        self.sink_energy = energy;
        self
    }

    /// Add a field node and return its `NodeId` (sequential from 1).
    ///
    /// `energy` is clamped into `[0, max_energy]`.
    pub fn add_node(&mut self, pos: Point, energy: f64) -> NodeId {
        self.nodes.push((pos, energy));
        NodeId(self.nodes.len() as u32)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consume the builder and produce a [`Network`].
    ///
    /// Time complexity: O(N log N) for the R-tree bulk load plus one range
    /// query per node.
    pub fn build(self) -> Network {
        let max = self.energy.max_energy;
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.push(SensorNode::new(NodeId::SINK, self.sink, self.sink_energy.clamp(0.0, max)));
        for (i, &(pos, e)) in self.nodes.iter().enumerate() {
            nodes.push(SensorNode::new(NodeId(i as u32 + 1), pos, e.clamp(0.0, max)));
        }

        let entries: Vec<NodeEntry> = nodes
            .iter()
            .map(|n| NodeEntry { point: [n.position.x, n.position.y], id: n.id })
            .collect();
        let index = RTree::bulk_load(entries);

        let range = self.comm_range;
        // Slightly widened query; the exact test below decides membership.
        let query_sq = range * range * (1.0 + 1e-9);
        let neighbor_lists: Vec<Vec<NodeId>> = nodes
            .iter()
            .map(|node| {
                let mut list: Vec<NodeId> = index
                    .locate_within_distance([node.position.x, node.position.y], query_sq)
                    .filter(|e| e.id != node.id)
                    .filter(|e| node.position.distance(nodes[e.id.index()].position) <= range)
                    .map(|e| e.id)
                    .collect();
                list.sort_unstable_by_key(|&id| enumeration_key(id));
                list
            })
            .collect();
        for (node, list) in nodes.iter_mut().zip(neighbor_lists) {
            node.neighbors = list;
        }
        debug!("built neighbour graph for {} nodes (range {range})", nodes.len());

        Network { nodes, comm_range: range, energy: self.energy }
    }
}
