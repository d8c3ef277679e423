//! Wiring graph of the network
//!
//! Mirrors every handshake as a supplier -> consumer edge so setup code can
//! check the assembled network for loose ends.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::tick_manager::TickManager;
use super::types::{Connection, Heading, LaneRef};

#[derive(Debug, Default)]
pub struct SimTopology {
    /// Supplier -> consumer edges, weighted by the heading of travel
    graph: DiGraph<Connection, Heading>,

    /// Maps connections to their node indices in the graph
    node_index: HashMap<Connection, NodeIndex>,
}

impl SimTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a connection known to the graph even before it is wired
    pub fn add_connection(&mut self, connection: Connection) -> NodeIndex {
        if let Some(index) = self.node_index.get(&connection) {
            return *index;
        }
        let index = self.graph.add_node(connection);
        self.node_index.insert(connection, index);
        index
    }

    /// Record that `consumer` now takes vehicles from `supplier`
    ///
    /// A lane only ever has one supplier, so rewiring a lane drops its old
    /// edge. Boundary nodes keep every supplier they were given.
    pub fn connect(&mut self, supplier: Connection, consumer: Connection, heading: Heading) {
        let from = self.add_connection(supplier);
        let to = self.add_connection(consumer);

        if let Connection::Lane(_) = consumer {
            let mut stale: Vec<EdgeIndex> = self
                .graph
                .edges_directed(to, Direction::Incoming)
                .map(|edge| edge.id())
                .collect();
            // Removal swaps the last edge into the hole, so go from the top
            stale.sort_unstable_by(|a, b| b.cmp(a));
            for edge in stale {
                self.graph.remove_edge(edge);
            }
        }

        self.graph.add_edge(from, to, heading);
    }

    /// Where a consumer currently takes vehicles from
    pub fn suppliers_of(&self, consumer: Connection) -> Vec<Connection> {
        self.neighbors(consumer, Direction::Incoming)
    }

    /// Who currently takes vehicles from a supplier
    pub fn consumers_of(&self, supplier: Connection) -> Vec<Connection> {
        self.neighbors(supplier, Direction::Outgoing)
    }

    fn neighbors(&self, connection: Connection, direction: Direction) -> Vec<Connection> {
        let Some(index) = self.node_index.get(&connection) else {
            return Vec::new();
        };
        let mut found: Vec<Connection> = self
            .graph
            .neighbors_directed(*index, direction)
            .map(|n| self.graph[n])
            .collect();
        found.sort();
        found.dedup();
        found
    }

    /// Lanes nobody takes vehicles from; they fill up and stall
    pub fn dangling_lanes(&self) -> Vec<LaneRef> {
        self.lanes_without(Direction::Outgoing)
    }

    /// Lanes with no supplier; they never receive vehicles
    pub fn starved_lanes(&self) -> Vec<LaneRef> {
        self.lanes_without(Direction::Incoming)
    }

    fn lanes_without(&self, direction: Direction) -> Vec<LaneRef> {
        let mut lanes: Vec<LaneRef> = self
            .graph
            .node_indices()
            .filter(|n| self.graph.edges_directed(*n, direction).next().is_none())
            .filter_map(|n| match self.graph[n] {
                Connection::Lane(lane) => Some(lane),
                Connection::Edge(_) => None,
            })
            .collect();
        lanes.sort();
        lanes
    }

    /// Wired pairs that tick in the wrong order
    ///
    /// Returns `(supplier, consumer)` for every lane supplier that is
    /// scheduled ahead of one of its consumers. Boundary suppliers are
    /// skipped since they hold no state between ticks.
    pub fn ordering_violations(&self, ticks: &TickManager) -> Vec<(Connection, Connection)> {
        let mut violations: Vec<(Connection, Connection)> = self
            .graph
            .edge_references()
            .map(|edge| (self.graph[edge.source()], self.graph[edge.target()]))
            .filter(|(supplier, _)| matches!(supplier, Connection::Lane(_)))
            .filter(|(supplier, consumer)| {
                match (ticks.position(*supplier), ticks.position(*consumer)) {
                    (Some(s), Some(c)) => c > s,
                    _ => false,
                }
            })
            .collect();
        violations.sort();
        violations.dedup();
        violations
    }

    pub fn wire_count(&self) -> usize {
        self.graph.edge_count()
    }
}
