//! Lane slot movement, road snapshots and road identity

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use slot_traffic::simulation::{
    Heading, Lane, LaneGroup, LaneRef, RoadId, SimId, SimNetwork, SimRoad, VehicleCategory,
    VehicleGenerator, VehicleId,
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Storage-order ids of every slot in a lane
fn slot_ids(lane: &Lane) -> Vec<Option<VehicleId>> {
    (0..lane.capacity())
        .map(|i| lane.slot(i).map(|v| v.id()))
        .collect()
}

#[test]
fn test_lane_shift_moves_each_vehicle_once() {
    let mut generator = VehicleGenerator::default();
    let mut lane = Lane::new(5, false);
    lane.place(0, generator.new_vehicle(VehicleCategory::Car)).unwrap();
    lane.place(1, generator.new_vehicle(VehicleCategory::Car)).unwrap();

    lane.shift_toward_exit();
    assert_eq!(
        slot_ids(&lane),
        vec![None, Some(VehicleId(0)), Some(VehicleId(1)), None, None]
    );

    lane.shift_toward_exit();
    assert_eq!(
        slot_ids(&lane),
        vec![None, None, Some(VehicleId(0)), Some(VehicleId(1)), None]
    );
}

#[test]
fn test_lane_blocked_vehicles_wait() {
    let mut generator = VehicleGenerator::default();
    let mut lane = Lane::new(3, false);
    for slot in 0..3 {
        lane.place(slot, generator.new_vehicle(VehicleCategory::Car)).unwrap();
    }

    // Nothing has left, so nothing can move
    lane.shift_toward_exit();
    assert_eq!(
        slot_ids(&lane),
        vec![Some(VehicleId(0)), Some(VehicleId(1)), Some(VehicleId(2))]
    );
    assert!(!lane.entry_open());

    let taken = lane.take_vehicle().expect("exit was occupied");
    assert_eq!(taken.id(), VehicleId(2));

    lane.shift_toward_exit();
    assert_eq!(
        slot_ids(&lane),
        vec![None, Some(VehicleId(0)), Some(VehicleId(1))]
    );
    assert!(lane.entry_open());
}

#[test]
fn test_lane_gap_closes_one_slot_per_shift() {
    let mut generator = VehicleGenerator::default();
    let mut lane = Lane::new(4, false);
    lane.place(0, generator.new_vehicle(VehicleCategory::Car)).unwrap();
    lane.place(3, generator.new_vehicle(VehicleCategory::Motorcycle)).unwrap();

    lane.shift_toward_exit();
    assert_eq!(
        slot_ids(&lane),
        vec![None, Some(VehicleId(0)), None, Some(VehicleId(1))]
    );
}

#[test]
fn test_lane_place_rejects_taken_and_missing_slots() {
    let mut generator = VehicleGenerator::default();
    let mut lane = Lane::new(2, false);
    lane.place(1, generator.new_vehicle(VehicleCategory::Car)).unwrap();

    let rejected = lane
        .place(1, generator.new_vehicle(VehicleCategory::Car))
        .unwrap_err();
    assert_eq!(rejected.id(), VehicleId(1));

    let rejected = lane
        .place(2, generator.new_vehicle(VehicleCategory::Car))
        .unwrap_err();
    assert_eq!(rejected.id(), VehicleId(2));
    assert_eq!(lane.occupied(), 1);
}

#[test]
fn test_zero_capacity_lane() {
    let mut lane = Lane::new(0, false);
    assert_eq!(lane.capacity(), 0);
    assert!(lane.take_vehicle().is_none());
    assert!(lane.vehicle_at(0).is_none());
    assert!(!lane.entry_open());
    lane.shift_toward_exit();
    assert_eq!(lane.render(), "");
}

#[test]
fn test_vehicle_at_reverse_flow() {
    let mut generator = VehicleGenerator::default();
    let mut lane = Lane::new(4, true);
    lane.place(0, generator.new_vehicle(VehicleCategory::Car)).unwrap();

    // Entry is on the right for reverse lanes
    assert!(lane.vehicle_at(0).is_none());
    assert_eq!(lane.vehicle_at(3).map(|v| v.id()), Some(VehicleId(0)));
    assert!(lane.vehicle_at(4).is_none());
    assert_eq!(lane.render(), "___c");

    let take = lane.take_vehicle();
    assert!(take.is_none(), "exit slot is empty");
}

#[test]
fn test_road_clamps_negative_sizes() {
    let road = SimRoad::new(RoadId(SimId(0)), "Broken", -4, -1, 2);
    assert_eq!(road.slot_count(), 0);
    assert_eq!(road.lane_count(LaneGroup::NorthEast), 0);
    assert_eq!(road.lane_count(LaneGroup::SouthWest), 2);
    assert_eq!(road.snapshot(), vec![String::new(), String::new()]);
}

#[test]
fn test_snapshot_fidelity() {
    let mut network = SimNetwork::new();
    let road = network.add_road("Short Road", 3, 1, 1);
    let ne = LaneRef::new(road, LaneGroup::NorthEast, 0);
    let sw = LaneRef::new(road, LaneGroup::SouthWest, 0);

    let car = network.new_vehicle(VehicleCategory::Car);
    network.place_vehicle(ne, 1, car).unwrap();

    // Storage slot 0 of a reverse lane is its rightmost position
    let bike = network.new_vehicle(VehicleCategory::Motorcycle);
    network.place_vehicle(sw, 0, bike).unwrap();

    let snapshot = network.snapshot(road).unwrap();
    assert_eq!(snapshot, vec!["__m", " - ", "_c_"]);

    // Reading a snapshot changes nothing
    assert_eq!(network.snapshot(road).unwrap(), snapshot);
    assert_eq!(network.stats().vehicles_on_roads, 2);
}

#[test]
fn test_snapshot_lane_order() {
    let mut network = SimNetwork::new();
    let road = network.add_road("Wide Road", 4, 2, 2);

    let car = network.new_vehicle(VehicleCategory::Car);
    network
        .place_vehicle(LaneRef::new(road, LaneGroup::SouthWest, 1), 3, car)
        .unwrap();
    let bike = network.new_vehicle(VehicleCategory::Motorcycle);
    network
        .place_vehicle(LaneRef::new(road, LaneGroup::NorthEast, 1), 0, bike)
        .unwrap();

    // Outer south/west lane first, outer north/east lane last
    assert_eq!(
        network.snapshot(road).unwrap(),
        vec!["c___", "____", " - -", "____", "m___"]
    );
}

#[test]
fn test_snapshot_single_direction_has_no_centerline() {
    let mut network = SimNetwork::new();
    let one_way = network.add_road("One Way", 5, 1, 0);
    let other_way = network.add_road("Other Way", 5, 0, 2);
    let empty = network.add_road("Nothing", 5, 0, 0);

    assert_eq!(network.snapshot(one_way).unwrap(), vec!["_____"]);
    assert_eq!(network.snapshot(other_way).unwrap(), vec!["_____", "_____"]);
    assert!(network.snapshot(empty).unwrap().is_empty());
}

#[test]
fn test_road_identity() {
    let mut network = SimNetwork::new();
    let a = network.add_road("Two Lane Road", 10, 1, 1);
    let b = network.add_road("Two Lane Road", 10, 1, 1);
    assert!(a < b);

    let road_a = network.road(a).unwrap();
    let road_b = network.road(b).unwrap();
    // Same name and shape, still different roads
    assert_ne!(road_a, road_b);
    assert_eq!(road_a, network.road(a).unwrap());
    assert_eq!(hash_of(road_a), hash_of(network.road(a).unwrap()));

    assert_eq!(
        road_a.to_string(),
        "Road[identifier=0,name=Two Lane Road,carCount=10,SWlanes=1,NElanes=1]"
    );
}

#[test]
fn test_road_equality_scoped_to_network() {
    let mut first = SimNetwork::new();
    let mut second = SimNetwork::new();
    let a = first.add_road("Main Street", 4, 1, 0);
    let b = second.add_road("Side Street", 8, 0, 2);

    // Each network allocates its own ids
    assert_eq!(a, b);
    assert_eq!(first.road(a).unwrap(), second.road(b).unwrap());
    assert_eq!(first.roads().count(), 1);
    assert!(first.road_by_name("Side Street").is_none());
}

#[test]
fn test_road_identifiers_unique() {
    let mut network = SimNetwork::new();
    let mut seen = HashSet::new();
    let mut last = None;

    for i in 0..2_000 {
        let id = network.add_road(&format!("Fake Road {}", i / 100), i % 7, i & 1, (i >> 1) & 1);
        assert!(seen.insert(id));
        if let Some(previous) = last {
            assert!(id > previous);
        }
        last = Some(id);
    }
    assert_eq!(network.roads().count(), 2_000);
}

/// Shift a previous snapshot row (in storage order) the way one tick should
fn expected_row(previous: &[char], current_entry: char) -> Vec<char> {
    let mut row = previous.to_vec();
    if let Some(exit) = row.last_mut() {
        *exit = '_';
    }
    for i in (1..row.len()).rev() {
        if row[i] == '_' {
            row[i] = row[i - 1];
            row[i - 1] = '_';
        }
    }
    if let Some(entry) = row.first_mut() {
        *entry = current_entry;
    }
    row
}

/// Wire a single road between one boundary node on both ends and check
/// that every vehicle moves exactly one slot per tick
fn check_road_ticks(slot_count: i32, ne_lanes: i32, sw_lanes: i32) {
    let mut network = SimNetwork::new_with_seed(1234);
    let road = network.add_road("Road under test", slot_count, ne_lanes, sw_lanes);
    let edge = network.add_edge_of_map();

    for lane in (0..ne_lanes.max(0) as usize).rev() {
        network.vehicles_go_to(edge, road, Heading::East, lane, lane);
        network.vehicles_go_to(road, edge, Heading::East, lane, lane);
    }
    for lane in (0..sw_lanes.max(0) as usize).rev() {
        network.vehicles_go_to(edge, road, Heading::West, lane, lane);
        network.vehicles_go_to(road, edge, Heading::West, lane, lane);
    }

    let sw_rows = sw_lanes.max(0) as usize;
    let max_ticks = 3 * slot_count.max(0) + 2;
    let mut last: Option<Vec<Vec<char>>> = None;

    for tick in 0..max_ticks {
        network.tick();
        let snapshot = network.snapshot(road).unwrap();
        let has_centerline = ne_lanes > 0 && sw_lanes > 0;

        // Lane rows only, each in storage order (entry first)
        let rows: Vec<Vec<char>> = snapshot
            .iter()
            .enumerate()
            .filter(|(i, _)| !(has_centerline && *i == sw_rows))
            .map(|(i, row)| {
                let chars: Vec<char> = row.chars().collect();
                if i < sw_rows {
                    chars.into_iter().rev().collect()
                } else {
                    chars
                }
            })
            .collect();

        if let Some(previous) = &last {
            for (lane, (before, now)) in previous.iter().zip(rows.iter()).enumerate() {
                let entry = now.first().copied().unwrap_or('_');
                assert_eq!(
                    &expected_row(before, entry),
                    now,
                    "tick {} lane row {} of {} slots / {} NE / {} SW",
                    tick,
                    lane,
                    slot_count,
                    ne_lanes,
                    sw_lanes
                );
            }
        }
        last = Some(rows);
    }
}

#[test]
fn test_two_lane_road_scenario() {
    check_road_ticks(10, 1, 1);
    check_road_ticks(10, 2, 2);
}

#[test]
fn test_small_and_degenerate_roads() {
    for slot_count in -1..=2 {
        for ne_lanes in -1..=2 {
            for sw_lanes in -1..=2 {
                check_road_ticks(slot_count, ne_lanes, sw_lanes);
            }
        }
    }
    check_road_ticks(9, 0, 1);
    check_road_ticks(9, 1, 0);
}

#[test]
fn test_lane_without_supplier_drains_to_exit() {
    // Unwired lanes still tick; with nothing upstream and nothing taking
    // from the exit, vehicles bunch up at the exit end
    let mut network = SimNetwork::new_with_seed(5);
    let road = network.add_road("Dead End", 5, 1, 0);
    let lane = LaneRef::new(road, LaneGroup::NorthEast, 0);

    for slot in [0, 2] {
        let car = network.new_vehicle(VehicleCategory::Car);
        network.place_vehicle(lane, slot, car).unwrap();
    }

    for _ in 0..5 {
        network.tick();
    }

    let ids: Vec<Option<VehicleId>> = slot_ids(network.lane(lane).unwrap());
    assert_eq!(
        ids,
        vec![None, None, None, Some(VehicleId(0)), Some(VehicleId(1))]
    );
    assert_eq!(network.stats().vehicles_on_roads, 2);
}
