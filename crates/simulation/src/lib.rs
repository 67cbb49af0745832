//! Deterministic gas station simulation.
//!
//! This crate simulates one replication of a forecourt with two fuel pumps
//! and one invoice clerk. Given the same config and seed, it produces
//! identical metrics every run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  StationSimulation                      │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Event Queue (BTreeMap<EventKey, Event>)        │ │
//! │  │     Ordered by: time, sequence                     │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     StationState: pump A, pump B, clerk            │ │
//! │  │     Arrival / FuelComplete / InvoiceComplete       │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     StatisticsCollector → Metrics                  │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod event;
mod event_queue;
mod resources;
mod runner;
mod stats;
mod variates;

pub use config::{ArrivalHorizon, StationConfig, UtilizationBase};
pub use error::SimulationError;
pub use event::{Event, EventKind};
pub use event_queue::{EventKey, EventQueue};
pub use resources::{QueueLengths, ServicePoint, StationState};
pub use runner::{RunPhase, RunStats, StationSimulation, TraceEntry};
pub use stats::{mean, BusyTime, StatisticsCollector};
pub use variates::VariateSource;

/// Run one replication to completion and return its metrics.
pub fn simulate(
    config: StationConfig,
    seed: u64,
    duration: forecourt_types::SimTime,
) -> Result<forecourt_types::Metrics, SimulationError> {
    StationSimulation::new(config, seed)?.run(duration)
}
