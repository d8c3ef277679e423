//! Pseudo-random vehicle generation for the network boundaries

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::types::VehicleId;
use super::vehicle::{Vehicle, VehicleCategory};

/// Default percentage of draws that produce a car
pub const DEFAULT_CAR_PERCENT: u32 = 20;

/// Default percentage of draws that produce a motorcycle
pub const DEFAULT_MOTORCYCLE_PERCENT: u32 = 5;

/// Percentage of boundary draws that produce each category
///
/// Entries are kept in priority order: each category's window is stacked on
/// top of the ones before it. The table does not check that the windows fit
/// inside 100; that is up to whoever edits it (see [`crate::config`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWeights {
    entries: Vec<(VehicleCategory, u32)>,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            entries: vec![
                (VehicleCategory::Car, DEFAULT_CAR_PERCENT),
                (VehicleCategory::Motorcycle, DEFAULT_MOTORCYCLE_PERCENT),
            ],
        }
    }
}

impl CategoryWeights {
    /// Table where every category has a zero window
    pub fn empty() -> Self {
        Self {
            entries: VehicleCategory::ALL.iter().map(|c| (*c, 0)).collect(),
        }
    }

    pub fn get(&self, category: VehicleCategory) -> u32 {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, percent)| *percent)
            .unwrap_or(0)
    }

    /// Set a category's percentage; a category not yet in the table is
    /// appended with the lowest priority
    pub fn set(&mut self, category: VehicleCategory, percent: u32) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = percent,
            None => self.entries.push((category, percent)),
        }
    }

    /// Sum of all percentages, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, (_, percent)| total.saturating_add(*percent))
    }

    pub fn iter(&self) -> impl Iterator<Item = (VehicleCategory, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Category selected by a draw in [0, 100), if any
    pub fn pick(&self, draw: u32) -> Option<VehicleCategory> {
        let mut accumulated = 0u32;
        for (category, percent) in &self.entries {
            accumulated = accumulated.saturating_add(*percent);
            if draw < accumulated {
                return Some(*category);
            }
        }
        None
    }
}

/// Creates vehicles and hands out random ones at the map boundaries
#[derive(Debug)]
pub struct VehicleGenerator {
    weights: CategoryWeights,
    next_id: u64,
    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl Default for VehicleGenerator {
    fn default() -> Self {
        Self::new(CategoryWeights::default())
    }
}

impl VehicleGenerator {
    pub fn new(weights: CategoryWeights) -> Self {
        Self {
            weights,
            next_id: 0,
            rng: None,
        }
    }

    /// Create a generator with a seeded RNG for reproducible draws
    pub fn new_with_seed(weights: CategoryWeights, seed: u64) -> Self {
        Self {
            weights,
            next_id: 0,
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut CategoryWeights {
        &mut self.weights
    }

    /// Number of vehicles created so far
    pub fn vehicles_created(&self) -> u64 {
        self.next_id
    }

    /// Build a vehicle with a fresh identifier
    pub fn new_vehicle(&mut self, category: VehicleCategory) -> Vehicle {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        Vehicle::new(id, category)
    }

    /// Draw the next boundary vehicle, or `None` when the draw lands past
    /// every category window
    pub fn generate_next(&mut self) -> Option<Vehicle> {
        let draw = self.random_percent();
        let category = self.weights.pick(draw)?;
        Some(self.new_vehicle(category))
    }

    /// Get a uniform value in [0, 100), using seeded RNG if available
    fn random_percent(&mut self) -> u32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(0..100),
            None => rand::rng().random_range(0..100),
        }
    }
}
