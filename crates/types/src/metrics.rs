//! Metric names and the per-replication metric mapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named per-replication output statistic.
///
/// Declaration order is the report's column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Pump A Max Queue")]
    PumpAMaxQueue,
    #[serde(rename = "Pump B Max Queue")]
    PumpBMaxQueue,
    #[serde(rename = "Avg Queue Length A")]
    AvgQueueLengthA,
    #[serde(rename = "Avg Queue Length B")]
    AvgQueueLengthB,
    #[serde(rename = "Avg Invoice Queue Length")]
    AvgInvoiceQueueLength,
    #[serde(rename = "Avg Fuel Wait A")]
    AvgFuelWaitA,
    #[serde(rename = "Avg Fuel Wait B")]
    AvgFuelWaitB,
    #[serde(rename = "Avg Invoice Wait")]
    AvgInvoiceWait,
    #[serde(rename = "Avg Stay Time A")]
    AvgStayTimeA,
    #[serde(rename = "Avg Stay Time B")]
    AvgStayTimeB,
    #[serde(rename = "Pump A Utilization")]
    PumpAUtilization,
    #[serde(rename = "Pump B Utilization")]
    PumpBUtilization,
    #[serde(rename = "Clerk Utilization")]
    ClerkUtilization,
    #[serde(rename = "Final Queue A")]
    FinalQueueA,
    #[serde(rename = "Final Queue B")]
    FinalQueueB,
    #[serde(rename = "Final Invoice Queue")]
    FinalInvoiceQueue,
    /// Collected but not part of the exported table.
    #[serde(rename = "Invoice Max Queue")]
    InvoiceMaxQueue,
}

impl Metric {
    /// Number of metrics collected per replication.
    pub const COUNT: usize = 17;

    /// Every collected metric.
    pub const ALL: [Metric; Self::COUNT] = [
        Metric::PumpAMaxQueue,
        Metric::PumpBMaxQueue,
        Metric::AvgQueueLengthA,
        Metric::AvgQueueLengthB,
        Metric::AvgInvoiceQueueLength,
        Metric::AvgFuelWaitA,
        Metric::AvgFuelWaitB,
        Metric::AvgInvoiceWait,
        Metric::AvgStayTimeA,
        Metric::AvgStayTimeB,
        Metric::PumpAUtilization,
        Metric::PumpBUtilization,
        Metric::ClerkUtilization,
        Metric::FinalQueueA,
        Metric::FinalQueueB,
        Metric::FinalInvoiceQueue,
        Metric::InvoiceMaxQueue,
    ];

    /// The columns of the exported report table.
    pub const COLUMNS: [Metric; 16] = [
        Metric::PumpAMaxQueue,
        Metric::PumpBMaxQueue,
        Metric::AvgQueueLengthA,
        Metric::AvgQueueLengthB,
        Metric::AvgInvoiceQueueLength,
        Metric::AvgFuelWaitA,
        Metric::AvgFuelWaitB,
        Metric::AvgInvoiceWait,
        Metric::AvgStayTimeA,
        Metric::AvgStayTimeB,
        Metric::PumpAUtilization,
        Metric::PumpBUtilization,
        Metric::ClerkUtilization,
        Metric::FinalQueueA,
        Metric::FinalQueueB,
        Metric::FinalInvoiceQueue,
    ];

    /// Column header used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Metric::PumpAMaxQueue => "Pump A Max Queue",
            Metric::PumpBMaxQueue => "Pump B Max Queue",
            Metric::AvgQueueLengthA => "Avg Queue Length A",
            Metric::AvgQueueLengthB => "Avg Queue Length B",
            Metric::AvgInvoiceQueueLength => "Avg Invoice Queue Length",
            Metric::AvgFuelWaitA => "Avg Fuel Wait A",
            Metric::AvgFuelWaitB => "Avg Fuel Wait B",
            Metric::AvgInvoiceWait => "Avg Invoice Wait",
            Metric::AvgStayTimeA => "Avg Stay Time A",
            Metric::AvgStayTimeB => "Avg Stay Time B",
            Metric::PumpAUtilization => "Pump A Utilization",
            Metric::PumpBUtilization => "Pump B Utilization",
            Metric::ClerkUtilization => "Clerk Utilization",
            Metric::FinalQueueA => "Final Queue A",
            Metric::FinalQueueB => "Final Queue B",
            Metric::FinalInvoiceQueue => "Final Invoice Queue",
            Metric::InvoiceMaxQueue => "Invoice Max Queue",
        }
    }

    /// Whether the value is a utilization percentage.
    pub fn is_utilization(self) -> bool {
        matches!(
            self,
            Metric::PumpAUtilization | Metric::PumpBUtilization | Metric::ClerkUtilization
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metric values of one replication (or one aggregate row).
///
/// Always holds a value for every [`Metric`]; unset metrics read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics(BTreeMap<Metric, f64>);

impl Metrics {
    /// A mapping with every metric set to zero.
    pub fn zeroed() -> Self {
        Self(Metric::ALL.iter().map(|&m| (m, 0.0)).collect())
    }

    /// Build a mapping by evaluating `f` for every metric.
    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        Self(Metric::ALL.iter().map(|&m| (m, f(m))).collect())
    }

    /// Set a metric value.
    pub fn set(&mut self, metric: Metric, value: f64) {
        self.0.insert(metric, value);
    }

    /// Get a metric value.
    pub fn get(&self, metric: Metric) -> f64 {
        self.0.get(&metric).copied().unwrap_or(0.0)
    }

    /// Iterate in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(&m, &v)| (m, v))
    }

    /// Bitwise equality on every value.
    ///
    /// Stricter than `==`: distinguishes `0.0` from `-0.0` and treats equal
    /// NaN payloads as equal.
    pub fn bit_identical(&self, other: &Metrics) -> bool {
        Metric::ALL
            .iter()
            .all(|&m| self.get(m).to_bits() == other.get(m).to_bits())
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::zeroed()
    }
}
