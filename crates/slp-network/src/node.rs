//! A single sensor node and its energy behaviour.

use slp_core::{EnergyConfig, NodeId, Point, SimRng};

/// Result of one transmit attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransmitOutcome {
    /// Sender and receiver were both above threshold; the cost was paid.
    Delivered,
    /// Either side was below threshold; no energy moved, a retry was counted.
    Deferred,
}

/// A sensor node (or the sink, id 0).
///
/// Position and neighbour list are fixed once the [`Network`][crate::Network]
/// is built.  Energy changes every phase; the four counters only ever grow
/// (except `wait_time`, which resets on success) and feed reporting.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorNode {
    pub id:       NodeId,
    pub position: Point,
    /// Always within `[0, max_energy]`.
    pub energy:   f64,
    /// Nodes within communication range, field nodes by ascending id then
    /// the sink.
    pub neighbors: Vec<NodeId>,

    pub successful_transmissions: u64,
    pub retry_count:              u64,
    /// Consecutive deferred attempts since the last success.
    pub wait_time:                u64,
    pub total_transmissions:      u64,
}

impl SensorNode {
    pub fn new(id: NodeId, position: Point, energy: f64) -> Self {
        Self {
            id,
            position,
            energy,
            neighbors: Vec::new(),
            successful_transmissions: 0,
            retry_count: 0,
            wait_time: 0,
            total_transmissions: 0,
        }
    }

    #[inline]
    pub fn is_sink(&self) -> bool {
        self.id.is_sink()
    }

    #[inline]
    pub fn distance_to(&self, other: &SensorNode) -> f64 {
        self.position.distance(other.position)
    }

    /// Add a uniform draw from `[harvest_min, harvest_max]`, clamped at
    /// `max_energy`.  Returns the energy actually gained.
    pub fn harvest_energy(&mut self, rng: &mut SimRng, cfg: &EnergyConfig) -> f64 {
        let before = self.energy;
        let gain = rng.uniform(cfg.harvest_min, cfg.harvest_max);
        self.energy = (self.energy + gain).min(cfg.max_energy);
        self.energy - before
    }

    #[inline]
    pub fn can_transmit(&self, cfg: &EnergyConfig) -> bool {
        self.energy >= cfg.threshold
    }

    /// Attempt to send one message to a receiver holding `receiver_energy`.
    ///
    /// Never fails: the outcome is recorded in the counters.  Callers pick
    /// the receiver through a [`ForwardingPolicy`][crate::ForwardingPolicy]
    /// first.
    pub fn transmit(&mut self, receiver_energy: f64, cfg: &EnergyConfig) -> TransmitOutcome {
        self.total_transmissions += 1;
        if self.can_transmit(cfg) && receiver_energy >= cfg.threshold {
            // tx_cost <= threshold <= energy, so this cannot go negative.
            self.energy = (self.energy - cfg.tx_cost).max(0.0);
            self.successful_transmissions += 1;
            self.wait_time = 0;
            TransmitOutcome::Delivered
        } else {
            self.retry_count += 1;
            self.wait_time += 1;
            TransmitOutcome::Deferred
        }
    }
}
