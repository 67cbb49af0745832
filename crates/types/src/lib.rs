//! Core types for the forecourt simulation.
//!
//! Value types shared by the engine and the replication driver: simulated
//! time, station identifiers, vehicles, and the metric mapping each
//! replication produces.

mod identifiers;
mod metrics;
mod time;
mod vehicle;

pub use identifiers::{FuelType, PumpId, ResourceId, VehicleId};
pub use metrics::{Metric, Metrics};
pub use time::{SimTime, MINUTES_PER_DAY};
pub use vehicle::Vehicle;
