//! Global tick ordering
//!
//! Every consumer sits in front of the supplier it pulls from, so walking the
//! list in order lets each consumer see its supplier's state from the previous
//! tick. Without that a vehicle could hop across several roads in one tick.

use log::debug;

use super::types::Connection;

#[derive(Debug, Default, Clone)]
pub struct TickManager {
    order: Vec<Connection>,
}

impl TickManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `consumer` immediately before `supplier`
    ///
    /// Any earlier position of `consumer` is dropped first. If `supplier` has
    /// not been registered, `consumer` goes to the front.
    pub fn register_tick(&mut self, consumer: Connection, supplier: Connection) {
        self.order.retain(|node| *node != consumer);

        let index = self.position(supplier).unwrap_or(0);
        self.order.insert(index, consumer);

        debug!(
            "Scheduled {:?} at {} ahead of {:?} ({} nodes)",
            consumer,
            index,
            supplier,
            self.order.len()
        );
    }

    /// Add a node that has no supplier yet to the back of the list
    ///
    /// Nodes already scheduled keep their place.
    pub fn append(&mut self, node: Connection) {
        if !self.contains(node) {
            self.order.push(node);
        }
    }

    /// Nodes in the order they tick
    pub fn order(&self) -> &[Connection] {
        &self.order
    }

    pub fn position(&self, node: Connection) -> Option<usize> {
        self.order.iter().position(|n| *n == node)
    }

    pub fn contains(&self, node: Connection) -> bool {
        self.order.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
