//! Per-replication statistics.

use crate::config::UtilizationBase;
use crate::resources::QueueLengths;
use forecourt_types::{FuelType, Metric, Metrics, PumpId, ResourceId, SimTime};

/// Busy time accumulated by one resource.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BusyTime {
    /// Sum of every drawn service time, including the part that runs past
    /// the end of the run.
    pub total: f64,
    /// The part of the service time that falls inside the run window.
    pub in_window: f64,
}

/// Samples collected during one replication.
///
/// Owned by the engine and discarded with it.
#[derive(Debug, Default, Clone)]
pub struct StatisticsCollector {
    fuel_waits_a: Vec<f64>,
    fuel_waits_b: Vec<f64>,
    invoice_waits: Vec<f64>,
    stays_92: Vec<f64>,
    stays_95: Vec<f64>,
    busy_pump_a: BusyTime,
    busy_pump_b: BusyTime,
    busy_clerk: BusyTime,
    queue_samples_a: Vec<usize>,
    queue_samples_b: Vec<usize>,
    queue_samples_invoice: Vec<usize>,
    max_queues: QueueLengths,
}

impl StatisticsCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how long a vehicle waited for a pump.
    pub fn record_fuel_wait(&mut self, pump: PumpId, wait: f64) {
        match pump {
            PumpId::A => self.fuel_waits_a.push(wait),
            PumpId::B => self.fuel_waits_b.push(wait),
        }
    }

    /// Record how long a vehicle waited for the clerk.
    pub fn record_invoice_wait(&mut self, wait: f64) {
        self.invoice_waits.push(wait);
    }

    /// Record a departed vehicle's time in the station.
    pub fn record_stay(&mut self, fuel_type: FuelType, stay: f64) {
        match fuel_type {
            FuelType::Type92 => self.stays_92.push(stay),
            FuelType::Type95 => self.stays_95.push(stay),
        }
    }

    /// Record a service of length `service` starting at `start`.
    ///
    /// `window_end` is the end of the run; service past it is excluded from
    /// the in-window total.
    pub fn record_busy(
        &mut self,
        resource: ResourceId,
        start: SimTime,
        service: f64,
        window_end: SimTime,
    ) {
        let busy = match resource {
            ResourceId::Pump(PumpId::A) => &mut self.busy_pump_a,
            ResourceId::Pump(PumpId::B) => &mut self.busy_pump_b,
            ResourceId::Clerk => &mut self.busy_clerk,
        };
        busy.total += service;
        busy.in_window += service.min(window_end.since(start));
    }

    /// Sample the line lengths after an event.
    pub fn sample_queues(&mut self, lengths: QueueLengths) {
        self.queue_samples_a.push(lengths.pump_a);
        self.queue_samples_b.push(lengths.pump_b);
        self.queue_samples_invoice.push(lengths.invoice);

        self.max_queues.pump_a = self.max_queues.pump_a.max(lengths.pump_a);
        self.max_queues.pump_b = self.max_queues.pump_b.max(lengths.pump_b);
        self.max_queues.invoice = self.max_queues.invoice.max(lengths.invoice);
    }

    /// Wait samples for a pump, in recording order.
    pub fn fuel_waits(&self, pump: PumpId) -> &[f64] {
        match pump {
            PumpId::A => &self.fuel_waits_a,
            PumpId::B => &self.fuel_waits_b,
        }
    }

    /// Wait samples for the clerk, in recording order.
    pub fn invoice_waits(&self) -> &[f64] {
        &self.invoice_waits
    }

    /// Stay samples for a fuel grade, in recording order.
    pub fn stays(&self, fuel_type: FuelType) -> &[f64] {
        match fuel_type {
            FuelType::Type92 => &self.stays_92,
            FuelType::Type95 => &self.stays_95,
        }
    }

    /// Busy time of a resource.
    pub fn busy_time(&self, resource: ResourceId) -> BusyTime {
        match resource {
            ResourceId::Pump(PumpId::A) => self.busy_pump_a,
            ResourceId::Pump(PumpId::B) => self.busy_pump_b,
            ResourceId::Clerk => self.busy_clerk,
        }
    }

    /// Largest line lengths seen.
    pub fn max_queues(&self) -> QueueLengths {
        self.max_queues
    }

    /// Number of post-event samples taken.
    pub fn sample_count(&self) -> usize {
        self.queue_samples_a.len()
    }

    /// Utilization percentage of a resource for a run of `duration`.
    pub fn utilization(
        &self,
        resource: ResourceId,
        base: UtilizationBase,
        duration: SimTime,
    ) -> f64 {
        let busy = self.busy_time(resource);
        let (busy, span) = match base {
            UtilizationBase::Elapsed => (busy.in_window, duration.minutes()),
            UtilizationBase::Fixed(span) => (busy.total, span.minutes()),
        };
        if span > 0.0 {
            busy / span * 100.0
        } else {
            0.0
        }
    }

    /// Build the metric mapping for a finished run.
    pub fn finish(
        &self,
        final_queues: QueueLengths,
        base: UtilizationBase,
        duration: SimTime,
    ) -> Metrics {
        let pump_a = ResourceId::Pump(PumpId::A);
        let pump_b = ResourceId::Pump(PumpId::B);

        Metrics::from_fn(|metric| match metric {
            Metric::PumpAMaxQueue => self.max_queues.pump_a as f64,
            Metric::PumpBMaxQueue => self.max_queues.pump_b as f64,
            Metric::InvoiceMaxQueue => self.max_queues.invoice as f64,
            Metric::AvgQueueLengthA => mean_len(&self.queue_samples_a),
            Metric::AvgQueueLengthB => mean_len(&self.queue_samples_b),
            Metric::AvgInvoiceQueueLength => mean_len(&self.queue_samples_invoice),
            Metric::AvgFuelWaitA => mean(&self.fuel_waits_a),
            Metric::AvgFuelWaitB => mean(&self.fuel_waits_b),
            Metric::AvgInvoiceWait => mean(&self.invoice_waits),
            Metric::AvgStayTimeA => mean(&self.stays_92),
            Metric::AvgStayTimeB => mean(&self.stays_95),
            Metric::PumpAUtilization => self.utilization(pump_a, base, duration),
            Metric::PumpBUtilization => self.utilization(pump_b, base, duration),
            Metric::ClerkUtilization => self.utilization(ResourceId::Clerk, base, duration),
            Metric::FinalQueueA => final_queues.pump_a as f64,
            Metric::FinalQueueB => final_queues.pump_b as f64,
            Metric::FinalInvoiceQueue => final_queues.invoice as f64,
        })
    }
}

/// Arithmetic mean, or 0 for no samples.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

fn mean_len(samples: &[usize]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<usize>() as f64 / samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collector_yields_zeroes() {
        let stats = StatisticsCollector::new();
        let metrics = stats.finish(
            QueueLengths::default(),
            UtilizationBase::Elapsed,
            SimTime::from_days(1.0),
        );
        assert!(metrics.bit_identical(&Metrics::zeroed()));
    }

    #[test]
    fn test_zero_duration_utilization_is_zero() {
        let mut stats = StatisticsCollector::new();
        stats.record_busy(ResourceId::Clerk, SimTime::ZERO, 5.0, SimTime::ZERO);
        let util = stats.utilization(ResourceId::Clerk, UtilizationBase::Elapsed, SimTime::ZERO);
        assert_eq!(util, 0.0);
    }

    #[test]
    fn test_means() {
        let mut stats = StatisticsCollector::new();
        stats.record_fuel_wait(PumpId::A, 1.0);
        stats.record_fuel_wait(PumpId::A, 3.0);
        stats.record_invoice_wait(0.5);
        stats.record_stay(FuelType::Type95, 10.0);

        let metrics = stats.finish(
            QueueLengths::default(),
            UtilizationBase::Elapsed,
            SimTime::from_minutes(100.0),
        );
        assert_eq!(metrics.get(Metric::AvgFuelWaitA), 2.0);
        assert_eq!(metrics.get(Metric::AvgFuelWaitB), 0.0);
        assert_eq!(metrics.get(Metric::AvgInvoiceWait), 0.5);
        assert_eq!(metrics.get(Metric::AvgStayTimeA), 0.0);
        assert_eq!(metrics.get(Metric::AvgStayTimeB), 10.0);
    }

    #[test]
    fn test_queue_samples_and_maxima() {
        let mut stats = StatisticsCollector::new();
        for (a, b, invoice) in [(0, 0, 0), (2, 1, 0), (1, 0, 3), (1, 0, 1)] {
            stats.sample_queues(QueueLengths {
                pump_a: a,
                pump_b: b,
                invoice,
            });
        }
        assert_eq!(stats.sample_count(), 4);
        assert_eq!(
            stats.max_queues(),
            QueueLengths {
                pump_a: 2,
                pump_b: 1,
                invoice: 3
            }
        );

        let final_queues = QueueLengths {
            pump_a: 1,
            pump_b: 0,
            invoice: 1,
        };
        let metrics = stats.finish(final_queues, UtilizationBase::Elapsed, SimTime::ZERO);
        assert_eq!(metrics.get(Metric::AvgQueueLengthA), 1.0);
        assert_eq!(metrics.get(Metric::AvgQueueLengthB), 0.25);
        assert_eq!(metrics.get(Metric::AvgInvoiceQueueLength), 1.0);
        assert_eq!(metrics.get(Metric::PumpAMaxQueue), 2.0);
        assert_eq!(metrics.get(Metric::InvoiceMaxQueue), 3.0);
        assert_eq!(metrics.get(Metric::FinalQueueA), 1.0);
        assert_eq!(metrics.get(Metric::FinalInvoiceQueue), 1.0);
    }

    #[test]
    fn test_busy_time_clipped_to_window() {
        let mut stats = StatisticsCollector::new();
        let end = SimTime::from_minutes(100.0);
        let pump = ResourceId::Pump(PumpId::B);
        stats.record_busy(pump, SimTime::from_minutes(10.0), 20.0, end);
        stats.record_busy(pump, SimTime::from_minutes(90.0), 30.0, end);

        let busy = stats.busy_time(pump);
        assert_eq!(busy.total, 50.0);
        assert_eq!(busy.in_window, 30.0);

        assert_eq!(stats.utilization(pump, UtilizationBase::Elapsed, end), 30.0);
        let fixed = UtilizationBase::Fixed(SimTime::from_minutes(200.0));
        assert_eq!(stats.utilization(pump, fixed, end), 25.0);
    }

    #[test]
    fn test_mean_helper() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
    }
}
