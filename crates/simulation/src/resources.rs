//! Station resources: two pumps and the invoice clerk.

use forecourt_types::{PumpId, ResourceId, Vehicle};
use std::collections::VecDeque;

/// A single server with a FIFO wait line.
///
/// The vehicle in service is not stored here; it travels inside the pending
/// completion event. `busy` tracks whether such an event exists.
#[derive(Debug, Default)]
pub struct ServicePoint {
    busy: bool,
    queue: VecDeque<Vehicle>,
}

impl ServicePoint {
    /// An idle server with an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a vehicle is in service.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Start serving a vehicle. The server must be idle.
    pub fn occupy(&mut self) {
        debug_assert!(!self.busy, "server already has a vehicle in service");
        self.busy = true;
    }

    /// Finish serving the current vehicle.
    pub fn release(&mut self) {
        self.busy = false;
    }

    /// Join the back of the line.
    pub fn enqueue(&mut self, vehicle: Vehicle) {
        self.queue.push_back(vehicle);
    }

    /// Take the vehicle at the front of the line.
    pub fn dequeue(&mut self) -> Option<Vehicle> {
        self.queue.pop_front()
    }

    /// Vehicles waiting in line (excluding the one in service).
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}

/// Snapshot of the three wait-line lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueLengths {
    pub pump_a: usize,
    pub pump_b: usize,
    pub invoice: usize,
}

impl QueueLengths {
    /// Length of a pump's line.
    pub fn pump(&self, pump: PumpId) -> usize {
        match pump {
            PumpId::A => self.pump_a,
            PumpId::B => self.pump_b,
        }
    }

    /// Vehicles waiting anywhere.
    pub fn total(&self) -> usize {
        self.pump_a + self.pump_b + self.invoice
    }
}

/// Busy flags and wait lines of the whole station.
#[derive(Debug, Default)]
pub struct StationState {
    pump_a: ServicePoint,
    pump_b: ServicePoint,
    clerk: ServicePoint,
}

impl StationState {
    /// All servers idle, all lines empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pump.
    pub fn pump(&self, pump: PumpId) -> &ServicePoint {
        match pump {
            PumpId::A => &self.pump_a,
            PumpId::B => &self.pump_b,
        }
    }

    /// A pump, mutably.
    pub fn pump_mut(&mut self, pump: PumpId) -> &mut ServicePoint {
        match pump {
            PumpId::A => &mut self.pump_a,
            PumpId::B => &mut self.pump_b,
        }
    }

    /// The invoice clerk.
    pub fn clerk(&self) -> &ServicePoint {
        &self.clerk
    }

    /// The invoice clerk, mutably.
    pub fn clerk_mut(&mut self) -> &mut ServicePoint {
        &mut self.clerk
    }

    /// Any resource.
    pub fn resource(&self, resource: ResourceId) -> &ServicePoint {
        match resource {
            ResourceId::Pump(pump) => self.pump(pump),
            ResourceId::Clerk => &self.clerk,
        }
    }

    /// Current line lengths.
    pub fn queue_lengths(&self) -> QueueLengths {
        QueueLengths {
            pump_a: self.pump_a.queue_len(),
            pump_b: self.pump_b.queue_len(),
            invoice: self.clerk.queue_len(),
        }
    }

    /// Number of resources currently serving a vehicle.
    pub fn in_service(&self) -> usize {
        ResourceId::ALL
            .iter()
            .filter(|&&r| self.resource(r).is_busy())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecourt_types::{FuelType, SimTime, VehicleId};

    fn vehicle(id: u64) -> Vehicle {
        Vehicle::arrive(VehicleId(id), SimTime::ZERO, FuelType::Type92, false)
    }

    #[test]
    fn test_fifo_line() {
        let mut point = ServicePoint::new();
        point.enqueue(vehicle(1));
        point.enqueue(vehicle(2));
        point.enqueue(vehicle(3));
        assert_eq!(point.queue_len(), 3);

        let ids: Vec<VehicleId> = std::iter::from_fn(|| point.dequeue()).map(|v| v.id).collect();
        assert_eq!(ids, vec![VehicleId(1), VehicleId(2), VehicleId(3)]);
        assert!(point.dequeue().is_none());
    }

    #[test]
    fn test_busy_flag() {
        let mut point = ServicePoint::new();
        assert!(!point.is_busy());
        point.occupy();
        assert!(point.is_busy());
        point.release();
        assert!(!point.is_busy());
    }

    #[test]
    fn test_station_snapshot() {
        let mut state = StationState::new();
        state.pump_mut(PumpId::A).enqueue(vehicle(1));
        state.pump_mut(PumpId::A).enqueue(vehicle(2));
        state.pump_mut(PumpId::B).enqueue(vehicle(3));
        state.clerk_mut().enqueue(vehicle(4));
        state.pump_mut(PumpId::B).occupy();
        state.clerk_mut().occupy();

        let lengths = state.queue_lengths();
        assert_eq!(
            lengths,
            QueueLengths {
                pump_a: 2,
                pump_b: 1,
                invoice: 1
            }
        );
        assert_eq!(lengths.total(), 4);
        assert_eq!(lengths.pump(PumpId::A), 2);
        assert_eq!(state.in_service(), 2);
        assert!(!state.pump(PumpId::A).is_busy());
    }
}
