//! The traffic network: every road and boundary node, plus the wiring between them
//!
//! Roads and boundary nodes never hold references to each other. Wiring
//! stores handles ([`Connection`]) that are resolved here at tick time.

use log::{debug, trace, warn};
use std::collections::BTreeMap;

use super::edge_of_map::SimEdgeOfMap;
use super::generator::{CategoryWeights, VehicleGenerator};
use super::lane::Lane;
use super::road::SimRoad;
use super::tick_manager::TickManager;
use super::topology::SimTopology;
use super::types::{Connection, EdgeId, Heading, LaneGroup, LaneRef, Node, RoadId, SimId};
use super::vehicle::{Vehicle, VehicleCategory};

/// Running totals for a network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Completed calls to [`SimNetwork::tick`]
    pub ticks: u64,
    /// Vehicles created by the generator, at the boundaries or by hand
    pub vehicles_generated: u64,
    /// Vehicles discarded by boundary nodes
    pub vehicles_exited: u64,
    /// Vehicles currently sitting in a lane slot
    pub vehicles_on_roads: u64,
}

/// The main simulation network
pub struct SimNetwork {
    /// All roads, in creation order
    roads: BTreeMap<RoadId, SimRoad>,

    /// All boundary nodes
    edges: BTreeMap<EdgeId, SimEdgeOfMap>,

    /// Order in which lanes and boundary nodes tick
    tick_manager: TickManager,

    /// Wiring graph used for inspection
    topology: SimTopology,

    /// Source of every vehicle in the network
    generator: VehicleGenerator,

    /// Next ID to assign to a road or boundary node
    next_id: usize,

    ticks: u64,
}

impl Default for SimNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl SimNetwork {
    fn new_internal(generator: VehicleGenerator) -> Self {
        Self {
            roads: BTreeMap::new(),
            edges: BTreeMap::new(),
            tick_manager: TickManager::new(),
            topology: SimTopology::new(),
            generator,
            next_id: 0,
            ticks: 0,
        }
    }

    pub fn new() -> Self {
        Self::new_internal(VehicleGenerator::default())
    }

    /// Create a new network with a seeded generator for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(VehicleGenerator::new_with_seed(CategoryWeights::default(), seed))
    }

    /// Create a network around an already configured generator
    pub fn with_generator(generator: VehicleGenerator) -> Self {
        Self::new_internal(generator)
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a road; negative sizes are clamped to zero
    pub fn add_road(&mut self, name: &str, slot_count: i32, ne_lanes: i32, sw_lanes: i32) -> RoadId {
        let id = RoadId(self.next_sim_id());
        let road = SimRoad::new(id, name, slot_count, ne_lanes, sw_lanes);

        for group in [LaneGroup::NorthEast, LaneGroup::SouthWest] {
            for index in 0..road.lane_count(group) {
                let lane = Connection::Lane(LaneRef::new(id, group, index));
                self.tick_manager.append(lane);
                self.topology.add_connection(lane);
            }
        }

        debug!("Added {}", road);
        self.roads.insert(id, road);
        id
    }

    /// Add a boundary node
    pub fn add_edge_of_map(&mut self) -> EdgeId {
        let id = EdgeId(self.next_sim_id());
        self.edges.insert(id, SimEdgeOfMap::new(id));
        self.topology.add_connection(Connection::Edge(id));
        id
    }

    /// Send vehicles leaving `from` on `outgoing_lane` into `incoming_lane` of `to`
    ///
    /// A boundary node ignores `outgoing_lane`. Lanes that don't exist make
    /// this a no-op.
    pub fn vehicles_go_to(
        &mut self,
        from: impl Into<Node>,
        to: impl Into<Node>,
        heading: Heading,
        outgoing_lane: usize,
        incoming_lane: usize,
    ) {
        let from = from.into();
        let supplier = match from {
            Node::Road(road_id) => {
                let group = heading.group();
                let exists = self
                    .roads
                    .get(&road_id)
                    .is_some_and(|road| road.lane(group, outgoing_lane).is_some());
                if !exists {
                    debug!(
                        "Ignoring wiring from missing lane {} heading {} of {:?}",
                        outgoing_lane,
                        heading.as_char(),
                        road_id
                    );
                    return;
                }
                Connection::Lane(LaneRef::new(road_id, group, outgoing_lane))
            }
            Node::Edge(edge_id) => {
                if !self.edges.contains_key(&edge_id) {
                    debug!("Ignoring wiring from unknown {:?}", edge_id);
                    return;
                }
                Connection::Edge(edge_id)
            }
        };

        self.set_connection(to.into(), supplier, heading, incoming_lane);
    }

    /// Make `node` take vehicles from `incoming`
    ///
    /// For a road, `lane` of the heading's group gets `incoming` as its
    /// upstream; out-of-range lanes are ignored. A boundary node drains
    /// `incoming` and ignores `heading` and `lane`.
    pub fn set_connection(&mut self, node: Node, incoming: Connection, heading: Heading, lane: usize) {
        let consumer = match node {
            Node::Road(road_id) => {
                let group = heading.group();
                let Some(target) = self
                    .roads
                    .get_mut(&road_id)
                    .and_then(|road| road.lane_mut(group, lane))
                else {
                    debug!(
                        "Ignoring connection into missing lane {} heading {} of {:?}",
                        lane,
                        heading.as_char(),
                        road_id
                    );
                    return;
                };
                target.set_incoming(incoming);
                Connection::Lane(LaneRef::new(road_id, group, lane))
            }
            Node::Edge(edge_id) => {
                let Some(edge) = self.edges.get_mut(&edge_id) else {
                    debug!("Ignoring connection into unknown {:?}", edge_id);
                    return;
                };
                edge.add_incoming(incoming);
                Connection::Edge(edge_id)
            }
        };

        self.tick_manager.register_tick(consumer, incoming);
        self.topology.connect(incoming, consumer, heading);
        debug!("Wired {:?} -> {:?} heading {}", incoming, consumer, heading.as_char());
    }

    /// Take the next vehicle a supplier has to offer
    ///
    /// A lane gives up its exit vehicle; a boundary node generates one.
    pub fn take_vehicle(&mut self, supplier: Connection) -> Option<Vehicle> {
        match supplier {
            Connection::Lane(lane) => self.lane_mut(lane)?.take_vehicle(),
            Connection::Edge(edge_id) => {
                if !self.edges.contains_key(&edge_id) {
                    return None;
                }
                self.generator.generate_next()
            }
        }
    }

    /// Advance the whole network by one tick
    pub fn tick(&mut self) {
        // Ticking never rewires, so the order is stable for the whole step
        for index in 0..self.tick_manager.len() {
            let Some(node) = self.tick_manager.order().get(index).copied() else {
                break;
            };
            self.tick_connection(node);
        }
        self.ticks += 1;
        trace!("Tick {} done, {} nodes", self.ticks, self.tick_manager.len());
    }

    fn tick_connection(&mut self, node: Connection) {
        match node {
            Connection::Lane(lane) => self.tick_lane(lane),
            Connection::Edge(edge_id) => self.tick_edge(edge_id),
        }
    }

    /// Shift a lane forward, then refill its entry slot from upstream
    fn tick_lane(&mut self, lane_ref: LaneRef) {
        let Some(lane) = self.lane_mut(lane_ref) else {
            return;
        };
        lane.shift_toward_exit();
        if !lane.entry_open() {
            return;
        }
        let Some(incoming) = lane.incoming() else {
            return;
        };

        let Some(vehicle) = self.take_vehicle(incoming) else {
            return;
        };
        match self.lane_mut(lane_ref) {
            Some(lane) => {
                if let Err(vehicle) = lane.accept_at_entry(vehicle) {
                    warn!("Entry of {:?} filled during its own tick, dropped {}", lane_ref, vehicle);
                }
            }
            None => warn!("{:?} disappeared during its own tick", lane_ref),
        }
    }

    /// Throw away one vehicle from every supplier of a boundary node
    fn tick_edge(&mut self, edge_id: EdgeId) {
        let Some(count) = self.edges.get(&edge_id).map(|edge| edge.incoming().len()) else {
            return;
        };

        let mut removed = 0;
        for index in 0..count {
            let Some(supplier) = self
                .edges
                .get(&edge_id)
                .and_then(|edge| edge.incoming().get(index).copied())
            else {
                break;
            };
            if let Some(vehicle) = self.take_vehicle(supplier) {
                trace!("{:?} removed {}", edge_id, vehicle);
                removed += 1;
            }
        }

        if let Some(edge) = self.edges.get_mut(&edge_id) {
            for _ in 0..removed {
                edge.record_removed();
            }
        }
    }

    /// Snapshot of a road's lanes, see [`SimRoad::snapshot`]
    pub fn snapshot(&self, road_id: RoadId) -> Option<Vec<String>> {
        self.roads.get(&road_id).map(SimRoad::snapshot)
    }

    pub fn road(&self, road_id: RoadId) -> Option<&SimRoad> {
        self.roads.get(&road_id)
    }

    /// First road with the given name
    pub fn road_by_name(&self, name: &str) -> Option<&SimRoad> {
        self.roads.values().find(|road| road.name() == name)
    }

    /// All roads in creation order
    pub fn roads(&self) -> impl Iterator<Item = &SimRoad> {
        self.roads.values()
    }

    pub fn edge(&self, edge_id: EdgeId) -> Option<&SimEdgeOfMap> {
        self.edges.get(&edge_id)
    }

    pub fn lane(&self, lane: LaneRef) -> Option<&Lane> {
        self.roads.get(&lane.road)?.lane(lane.group, lane.index)
    }

    fn lane_mut(&mut self, lane: LaneRef) -> Option<&mut Lane> {
        self.roads.get_mut(&lane.road)?.lane_mut(lane.group, lane.index)
    }

    pub fn generator(&self) -> &VehicleGenerator {
        &self.generator
    }

    /// Generator access for configuration changes between ticks
    pub fn generator_mut(&mut self) -> &mut VehicleGenerator {
        &mut self.generator
    }

    /// Create a vehicle outside of the boundary draws
    pub fn new_vehicle(&mut self, category: VehicleCategory) -> Vehicle {
        self.generator.new_vehicle(category)
    }

    /// Put a vehicle into an empty storage slot of a lane (0 = entry)
    ///
    /// The vehicle comes back as the error if the lane or slot doesn't exist
    /// or the slot is taken.
    pub fn place_vehicle(&mut self, lane: LaneRef, slot: usize, vehicle: Vehicle) -> Result<(), Vehicle> {
        match self.lane_mut(lane) {
            Some(target) => target.place(slot, vehicle),
            None => Err(vehicle),
        }
    }

    pub fn tick_manager(&self) -> &TickManager {
        &self.tick_manager
    }

    pub fn topology(&self) -> &SimTopology {
        &self.topology
    }

    /// Lanes whose exit vehicles are never taken
    pub fn dangling_lanes(&self) -> Vec<LaneRef> {
        self.topology.dangling_lanes()
    }

    /// Lanes that never receive vehicles
    pub fn starved_lanes(&self) -> Vec<LaneRef> {
        self.topology.starved_lanes()
    }

    /// `(supplier, consumer)` pairs the tick order gets wrong
    pub fn ordering_violations(&self) -> Vec<(Connection, Connection)> {
        self.topology.ordering_violations(&self.tick_manager)
    }

    pub fn stats(&self) -> SimStats {
        SimStats {
            ticks: self.ticks,
            vehicles_generated: self.generator.vehicles_created(),
            vehicles_exited: self.edges.values().map(SimEdgeOfMap::vehicles_removed).sum(),
            vehicles_on_roads: self.roads.values().map(|road| road.occupied() as u64).sum(),
        }
    }

    /// Create the two-road demo map with an unseeded generator
    pub fn create_demo_network(slot_count: i32, ne_lanes: i32, sw_lanes: i32) -> Self {
        Self::build_demo_network(SimNetwork::new(), slot_count, ne_lanes, sw_lanes)
    }

    /// Add a "West Road" and an "East Road" joined end to end, with one
    /// boundary node feeding and draining both ends
    pub fn build_demo_network(
        mut network: SimNetwork,
        slot_count: i32,
        ne_lanes: i32,
        sw_lanes: i32,
    ) -> Self {
        let west = network.add_road("West Road", slot_count, ne_lanes, sw_lanes);
        let east = network.add_road("East Road", slot_count, ne_lanes, sw_lanes);
        let edge = network.add_edge_of_map();

        // Eastbound: edge -> west -> east -> edge
        for lane in (0..ne_lanes.max(0) as usize).rev() {
            network.vehicles_go_to(edge, west, Heading::East, lane, lane);
            network.vehicles_go_to(west, east, Heading::East, lane, lane);
            network.vehicles_go_to(east, edge, Heading::East, lane, lane);
        }

        // Westbound: edge -> east -> west -> edge
        for lane in (0..sw_lanes.max(0) as usize).rev() {
            network.vehicles_go_to(edge, east, Heading::West, lane, lane);
            network.vehicles_go_to(east, west, Heading::West, lane, lane);
            network.vehicles_go_to(west, edge, Heading::West, lane, lane);
        }

        network
    }
}
