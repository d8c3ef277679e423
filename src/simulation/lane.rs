//! Slot storage for a single unidirectional lane

use super::types::Connection;
use super::vehicle::Vehicle;

/// A fixed-length row of vehicle slots
///
/// Slot 0 is the entry end and receives vehicles from upstream; the last
/// slot is the exit end and is emptied by whoever is wired downstream.
#[derive(Debug)]
pub struct Lane {
    slots: Vec<Option<Vehicle>>,
    /// Positional queries count from the exit end instead of the entry end
    reverse_flow: bool,
    /// Where this lane pulls new vehicles from
    incoming: Option<Connection>,
}

impl Lane {
    pub fn new(capacity: usize, reverse_flow: bool) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            reverse_flow,
            incoming: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn reverse_flow(&self) -> bool {
        self.reverse_flow
    }

    pub fn incoming(&self) -> Option<Connection> {
        self.incoming
    }

    /// Replace the upstream supplier
    pub fn set_incoming(&mut self, incoming: Connection) {
        self.incoming = Some(incoming);
    }

    /// Remove whatever occupies the exit slot
    pub fn take_vehicle(&mut self) -> Option<Vehicle> {
        self.slots.last_mut()?.take()
    }

    /// Vehicle at a position counted in the road's left-to-right order
    pub fn vehicle_at(&self, index: usize) -> Option<&Vehicle> {
        let capacity = self.capacity();
        if index >= capacity {
            return None;
        }
        let index = if self.reverse_flow {
            capacity - index - 1
        } else {
            index
        };
        self.slots[index].as_ref()
    }

    /// Vehicle at a storage position (0 = entry)
    pub fn slot(&self, index: usize) -> Option<&Vehicle> {
        self.slots.get(index)?.as_ref()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Move every vehicle with a free slot ahead of it one step toward the exit
    ///
    /// Walks from the exit back to the entry so a vehicle that just moved is
    /// never looked at again in the same pass.
    pub fn shift_toward_exit(&mut self) {
        for i in (1..self.slots.len()).rev() {
            if self.slots[i].is_none() {
                self.slots[i] = self.slots[i - 1].take();
            }
        }
    }

    /// Whether the entry slot can take a vehicle from upstream
    pub fn entry_open(&self) -> bool {
        matches!(self.slots.first(), Some(None))
    }

    /// Put a vehicle pulled from upstream into the entry slot
    ///
    /// Hands the vehicle back if the entry slot is taken or missing.
    pub fn accept_at_entry(&mut self, vehicle: Vehicle) -> Result<(), Vehicle> {
        self.place(0, vehicle)
    }

    /// Put a vehicle into an empty storage slot
    pub fn place(&mut self, index: usize, vehicle: Vehicle) -> Result<(), Vehicle> {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(vehicle);
                Ok(())
            }
            _ => Err(vehicle),
        }
    }

    /// One character per slot in the road's left-to-right order
    pub fn render(&self) -> String {
        (0..self.capacity())
            .map(|i| {
                self.vehicle_at(i)
                    .map(|vehicle| vehicle.category().symbol())
                    .unwrap_or('_')
            })
            .collect()
    }
}
