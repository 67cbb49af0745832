//! Simulation time.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// A point (or span) of simulated time, in minutes.
///
/// Wraps an `f64` with a total order so it can key ordered collections.
/// Time only advances when the engine processes an event.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(f64);

impl SimTime {
    /// The start of every replication.
    pub const ZERO: Self = SimTime(0.0);

    /// Create a time from a count of minutes.
    #[inline]
    pub const fn from_minutes(minutes: f64) -> Self {
        SimTime(minutes)
    }

    /// Create a time from a count of days.
    #[inline]
    pub fn from_days(days: f64) -> Self {
        SimTime(days * MINUTES_PER_DAY)
    }

    /// Raw minute value.
    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// Whether this is a usable duration: finite and not negative.
    pub fn is_valid_duration(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    /// Span between `earlier` and `self`. Never negative.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;

    fn add(self, minutes: f64) -> SimTime {
        SimTime(self.0 + minutes)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}min", self.0)
    }
}
