//! Vehicles travelling through the network
//!
//! A vehicle is a plain value: an identifier and a category. It is
//! deliberately not `Clone` so that a vehicle can only ever sit in one slot.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::types::VehicleId;

/// Category of vehicle in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleCategory {
    Car,
    Motorcycle,
}

impl VehicleCategory {
    /// Every category, in generator priority order
    pub const ALL: [VehicleCategory; 2] = [VehicleCategory::Car, VehicleCategory::Motorcycle];

    /// Type name, as shown in snapshots and debug output
    pub fn name(self) -> &'static str {
        match self {
            VehicleCategory::Car => "car",
            VehicleCategory::Motorcycle => "motorcycle",
        }
    }

    /// Human-facing label used by the settings surface
    pub fn label(self) -> &'static str {
        match self {
            VehicleCategory::Car => "Car",
            VehicleCategory::Motorcycle => "Motorcycle",
        }
    }

    /// Character drawn for this category in a lane snapshot
    pub fn symbol(self) -> char {
        self.name().chars().next().unwrap_or('?')
    }
}

/// A vehicle in the traffic simulation
#[derive(Debug)]
pub struct Vehicle {
    id: VehicleId,
    category: VehicleCategory,
}

impl Vehicle {
    pub(crate) fn new(id: VehicleId, category: VehicleCategory) -> Self {
        Self { id, category }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn category(&self) -> VehicleCategory {
        self.category
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle[identifier={},type={}]",
            self.id.0,
            self.category.name()
        )
    }
}
