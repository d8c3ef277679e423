//! Core types for the traffic simulation
//!
//! Handles, headings and the two closed node kinds used by the wiring protocol.

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for road IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadId(pub SimId);

/// A wrapper type for boundary node IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub SimId);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u64);

/// Direction vehicles are travelling in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Parse a heading from its compass letter ('N', 'E', 'S' or 'W')
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Heading::North),
            'E' => Some(Heading::East),
            'S' => Some(Heading::South),
            'W' => Some(Heading::West),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }

    /// The lane group that carries traffic in this heading
    pub fn group(self) -> LaneGroup {
        match self {
            Heading::North | Heading::East => LaneGroup::NorthEast,
            Heading::South | Heading::West => LaneGroup::SouthWest,
        }
    }
}

/// One of the two travel super-directions a road stores lanes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LaneGroup {
    /// North- and east-bound lanes, stored in natural order
    NorthEast,
    /// South- and west-bound lanes, stored mirrored
    SouthWest,
}

/// Stable handle to a single lane of a road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneRef {
    pub road: RoadId,
    pub group: LaneGroup,
    pub index: usize,
}

impl LaneRef {
    pub fn new(road: RoadId, group: LaneGroup, index: usize) -> Self {
        Self { road, group, index }
    }
}

/// Anything that can be wired to another node (the "Connectable" side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Road(RoadId),
    Edge(EdgeId),
}

/// Anything vehicles can be taken from and that ticks (the "Connection" side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Connection {
    Lane(LaneRef),
    Edge(EdgeId),
}

impl From<RoadId> for Node {
    fn from(id: RoadId) -> Self {
        Node::Road(id)
    }
}

impl From<EdgeId> for Node {
    fn from(id: EdgeId) -> Self {
        Node::Edge(id)
    }
}

impl From<LaneRef> for Connection {
    fn from(lane: LaneRef) -> Self {
        Connection::Lane(lane)
    }
}

impl From<EdgeId> for Connection {
    fn from(id: EdgeId) -> Self {
        Connection::Edge(id)
    }
}
