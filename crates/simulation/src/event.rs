//! Events driving the station.

use forecourt_types::{PumpId, Vehicle};
use std::fmt;

/// An event payload.
///
/// Completion events own the vehicle being served: while a vehicle is at a
/// pump or the clerk, the pending event is the only place it lives.
#[derive(Debug, PartialEq)]
pub enum Event {
    /// A new vehicle enters the station.
    Arrival,

    /// A vehicle finished fueling at `pump`.
    FuelComplete { vehicle: Vehicle, pump: PumpId },

    /// A vehicle finished paperwork at the clerk.
    InvoiceComplete { vehicle: Vehicle },
}

impl Event {
    /// The event's kind, without payload.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Arrival => EventKind::Arrival,
            Event::FuelComplete { .. } => EventKind::FuelComplete,
            Event::InvoiceComplete { .. } => EventKind::InvoiceComplete,
        }
    }

    /// The vehicle carried by this event, if any.
    pub fn vehicle(&self) -> Option<&Vehicle> {
        match self {
            Event::Arrival => None,
            Event::FuelComplete { vehicle, .. } | Event::InvoiceComplete { vehicle } => {
                Some(vehicle)
            }
        }
    }

    /// The pump this event concerns, if any.
    pub fn pump(&self) -> Option<PumpId> {
        match self {
            Event::FuelComplete { pump, .. } => Some(*pump),
            _ => None,
        }
    }
}

/// Event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Arrival,
    FuelComplete,
    InvoiceComplete,
}

impl EventKind {
    /// All kinds, for per-kind counters.
    pub const ALL: [EventKind; 3] = [
        EventKind::Arrival,
        EventKind::FuelComplete,
        EventKind::InvoiceComplete,
    ];

    /// Index into per-kind counter arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Arrival => write!(f, "Arrival"),
            EventKind::FuelComplete => write!(f, "FuelComplete"),
            EventKind::InvoiceComplete => write!(f, "InvoiceComplete"),
        }
    }
}
