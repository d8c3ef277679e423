//! Slot-based traffic simulation
//!
//! Roads hold lanes of fixed-size vehicle slots. Each tick every vehicle
//! moves one slot forward if it can, and lanes pull new vehicles from
//! whatever is wired upstream of them. Everything runs single-threaded and
//! only advances when [`SimNetwork::tick`] is called.

mod edge_of_map;
mod generator;
mod lane;
mod network;
mod road;
mod tick_manager;
mod topology;
mod types;
mod vehicle;

pub use edge_of_map::SimEdgeOfMap;
pub use generator::{
    CategoryWeights, VehicleGenerator, DEFAULT_CAR_PERCENT, DEFAULT_MOTORCYCLE_PERCENT,
};
pub use lane::Lane;
pub use network::{SimNetwork, SimStats};
pub use road::SimRoad;
pub use tick_manager::TickManager;
pub use topology::SimTopology;
pub use types::{
    Connection, EdgeId, Heading, LaneGroup, LaneRef, Node, RoadId, SimId, VehicleId,
};
pub use vehicle::{Vehicle, VehicleCategory};
