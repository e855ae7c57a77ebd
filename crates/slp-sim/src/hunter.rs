//! The backtracking adversary.
//!
//! The hunter models a passive traffic-analysis attacker.  It starts at the
//! sink and can only learn where a message came from by overhearing it, so
//! it moves at most one hop per phase, and only backward along a path that
//! actually passes through its current position.

use slp_core::NodeId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HunterState {
    Tracking,
    /// Terminal: the hunter stands on the source.
    Captured,
}

/// Hunter position plus the append-only trail of visited nodes.
///
/// Invariant: `trail` is never empty and `position == *trail.last()`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hunter {
    position: NodeId,
    trail:    Vec<NodeId>,
    state:    HunterState,
}

impl Hunter {
    pub fn new(start: NodeId) -> Self {
        Self { position: start, trail: vec![start], state: HunterState::Tracking }
    }

    /// A hunter waiting at the sink, the usual starting point.
    pub fn at_sink() -> Self {
        Self::new(NodeId::SINK)
    }

    #[inline]
    pub fn position(&self) -> NodeId {
        self.position
    }

    pub fn trail(&self) -> &[NodeId] {
        &self.trail
    }

    pub fn state(&self) -> HunterState {
        self.state
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.state == HunterState::Captured
    }

    /// Observe one phase's forwarding path.
    ///
    /// If the hunter's position appears in `path` at index `i > 0`, it moves
    /// to `path[i - 1]`.  Standing on `source` afterwards (or already) means
    /// capture.  Returns the new position when a move happened.
    ///
    /// Observations after capture are ignored.
    pub fn observe(&mut self, path: &[NodeId], source: NodeId) -> Option<NodeId> {
        if self.is_captured() {
            return None;
        }

        let mut moved = None;
        if let Some(i) = path.iter().position(|&n| n == self.position) {
            if i > 0 {
                let prev = path[i - 1];
                self.position = prev;
                self.trail.push(prev);
                moved = Some(prev);
            }
        }

        if self.position == source {
            self.state = HunterState::Captured;
        }
        moved
    }
}

impl Default for Hunter {
    fn default() -> Self {
        Self::at_sink()
    }
}
