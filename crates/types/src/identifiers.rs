//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle identifier.
///
/// Assigned in arrival order, starting from zero in every replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub u64);

impl VehicleId {
    /// The first vehicle of a replication.
    pub const FIRST: Self = VehicleId(0);

    /// Get the next vehicle id.
    pub fn next(self) -> Self {
        VehicleId(self.0 + 1)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vehicle({})", self.0)
    }
}

/// One of the two fuel pumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PumpId {
    /// Dispenses 92-octane fuel.
    A,
    /// Dispenses 95-octane fuel.
    B,
}

impl PumpId {
    /// Both pumps, in column order.
    pub const ALL: [PumpId; 2] = [PumpId::A, PumpId::B];

    /// The fuel grade this pump dispenses.
    pub fn fuel_type(self) -> FuelType {
        match self {
            PumpId::A => FuelType::Type92,
            PumpId::B => FuelType::Type95,
        }
    }
}

impl fmt::Display for PumpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PumpId::A => write!(f, "Pump A"),
            PumpId::B => write!(f, "Pump B"),
        }
    }
}

/// Fuel grade requested by a vehicle.
///
/// Each grade is served by exactly one pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FuelType {
    Type92,
    Type95,
}

impl FuelType {
    /// The pump that dispenses this grade.
    pub fn pump(self) -> PumpId {
        match self {
            FuelType::Type92 => PumpId::A,
            FuelType::Type95 => PumpId::B,
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelType::Type92 => write!(f, "92"),
            FuelType::Type95 => write!(f, "95"),
        }
    }
}

/// A station resource that can be busy serving a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceId {
    Pump(PumpId),
    Clerk,
}

impl ResourceId {
    /// All resources, in column order.
    pub const ALL: [ResourceId; 3] = [
        ResourceId::Pump(PumpId::A),
        ResourceId::Pump(PumpId::B),
        ResourceId::Clerk,
    ];
}

impl From<PumpId> for ResourceId {
    fn from(pump: PumpId) -> Self {
        ResourceId::Pump(pump)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Pump(pump) => write!(f, "{}", pump),
            ResourceId::Clerk => write!(f, "Clerk"),
        }
    }
}
