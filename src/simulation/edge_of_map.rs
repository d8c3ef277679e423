//! The edge of the map
//!
//! Lanes fed by the edge get freshly generated vehicles; lanes that feed the
//! edge lose their exit vehicle every tick. One instance can serve any number
//! of lanes in both roles.

use super::types::{Connection, EdgeId};

/// A boundary node: vehicle source and vehicle sink
#[derive(Debug, Clone)]
pub struct SimEdgeOfMap {
    pub id: EdgeId,
    /// Suppliers drained on every tick
    incoming: Vec<Connection>,
    /// Vehicles taken out of the network so far
    vehicles_removed: u64,
}

impl SimEdgeOfMap {
    pub fn new(id: EdgeId) -> Self {
        Self {
            id,
            incoming: Vec::new(),
            vehicles_removed: 0,
        }
    }

    /// Start draining a supplier
    pub fn add_incoming(&mut self, incoming: Connection) {
        self.incoming.push(incoming);
    }

    pub fn incoming(&self) -> &[Connection] {
        &self.incoming
    }

    pub fn vehicles_removed(&self) -> u64 {
        self.vehicles_removed
    }

    pub(crate) fn record_removed(&mut self) {
        self.vehicles_removed += 1;
    }
}
