//! Vehicles moving through the station.

use crate::{FuelType, PumpId, SimTime, VehicleId};

/// A vehicle visiting the station.
///
/// A vehicle is owned by exactly one place at a time: a wait queue, the
/// event carrying it through service, or nowhere once it has departed.
/// It is moved between them and never cloned by the engine.
#[derive(Debug, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub arrival_time: SimTime,
    pub fuel_type: FuelType,
    pub needs_invoice: bool,
    pub fuel_service_start: Option<SimTime>,
    pub fuel_service_end: Option<SimTime>,
    pub invoice_queue_enter: Option<SimTime>,
    pub invoice_service_start: Option<SimTime>,
    pub total_stay_time: Option<f64>,
}

impl Vehicle {
    /// A vehicle that has just arrived and not yet been served.
    pub fn arrive(id: VehicleId, at: SimTime, fuel_type: FuelType, needs_invoice: bool) -> Self {
        Self {
            id,
            arrival_time: at,
            fuel_type,
            needs_invoice,
            fuel_service_start: None,
            fuel_service_end: None,
            invoice_queue_enter: None,
            invoice_service_start: None,
            total_stay_time: None,
        }
    }

    /// The pump this vehicle must use.
    pub fn pump(&self) -> PumpId {
        self.fuel_type.pump()
    }

    /// Time spent waiting for a pump, if fuel service has started.
    pub fn fuel_wait(&self) -> Option<f64> {
        self.fuel_service_start
            .map(|start| start.since(self.arrival_time))
    }

    /// Time spent in the invoice line, if invoice service has started.
    pub fn invoice_wait(&self) -> Option<f64> {
        self.invoice_service_start
            .zip(self.invoice_queue_enter)
            .map(|(start, entered)| start.since(entered))
    }

    /// Mark the vehicle as departed at `now` and return its stay time.
    pub fn depart(&mut self, now: SimTime) -> f64 {
        let stay = now.since(self.arrival_time);
        self.total_stay_time = Some(stay);
        stay
    }
}
