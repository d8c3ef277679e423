//! Road segments made of north/east-bound and south/west-bound lanes
//!
//! Standalone implementation with no knowledge of its neighbours; wiring
//! lives in [`super::network::SimNetwork`].

use std::fmt;
use std::hash::{Hash, Hasher};

use super::lane::Lane;
use super::types::{LaneGroup, RoadId};

/// A named road with a fixed number of slots per lane
#[derive(Debug)]
pub struct SimRoad {
    pub id: RoadId,
    name: String,
    slot_count: usize,
    /// North/east-bound lanes, entry at the left end
    ne_lanes: Vec<Lane>,
    /// South/west-bound lanes, entry at the right end
    sw_lanes: Vec<Lane>,
}

impl SimRoad {
    /// Build a road; negative sizes are treated as zero
    pub fn new(id: RoadId, name: &str, slot_count: i32, ne_lanes: i32, sw_lanes: i32) -> Self {
        let slot_count = slot_count.max(0) as usize;
        let ne_lanes = ne_lanes.max(0) as usize;
        let sw_lanes = sw_lanes.max(0) as usize;

        Self {
            id,
            name: name.to_string(),
            slot_count,
            ne_lanes: (0..ne_lanes).map(|_| Lane::new(slot_count, false)).collect(),
            sw_lanes: (0..sw_lanes).map(|_| Lane::new(slot_count, true)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn lane_count(&self, group: LaneGroup) -> usize {
        self.lanes(group).len()
    }

    pub fn lanes(&self, group: LaneGroup) -> &[Lane] {
        match group {
            LaneGroup::NorthEast => &self.ne_lanes,
            LaneGroup::SouthWest => &self.sw_lanes,
        }
    }

    pub fn lane(&self, group: LaneGroup, index: usize) -> Option<&Lane> {
        self.lanes(group).get(index)
    }

    pub fn lane_mut(&mut self, group: LaneGroup, index: usize) -> Option<&mut Lane> {
        match group {
            LaneGroup::NorthEast => self.ne_lanes.get_mut(index),
            LaneGroup::SouthWest => self.sw_lanes.get_mut(index),
        }
    }

    /// Total vehicles currently on this road
    pub fn occupied(&self) -> usize {
        self.ne_lanes
            .iter()
            .chain(self.sw_lanes.iter())
            .map(Lane::occupied)
            .sum()
    }

    /// Text picture of every lane
    ///
    /// South/west lanes come first (outermost lane on top), then a dashed
    /// centerline if the road carries both directions, then the north/east
    /// lanes. `_` marks an empty slot, otherwise the category's first letter.
    pub fn snapshot(&self) -> Vec<String> {
        let mut rows = Vec::with_capacity(self.ne_lanes.len() + self.sw_lanes.len() + 1);

        rows.extend(self.sw_lanes.iter().rev().map(Lane::render));

        if !self.ne_lanes.is_empty() && !self.sw_lanes.is_empty() {
            rows.push(centerline(self.slot_count));
        }

        rows.extend(self.ne_lanes.iter().map(Lane::render));
        rows
    }
}

/// Alternating space/dash row separating the two directions
fn centerline(width: usize) -> String {
    (0..width)
        .map(|i| if i % 2 == 0 { ' ' } else { '-' })
        .collect()
}

/// Roads compare by id alone. Ids are allocated per [`SimNetwork`](super::SimNetwork),
/// so equality is only meaningful between roads of the same network.
impl PartialEq for SimRoad {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SimRoad {}

impl Hash for SimRoad {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for SimRoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Road[identifier={},name={},carCount={},SWlanes={},NElanes={}]",
            self.id.0 .0,
            self.name,
            self.slot_count,
            self.sw_lanes.len(),
            self.ne_lanes.len()
        )
    }
}
