//! Station parameters and run policies.

use crate::SimulationError;
use forecourt_types::{PumpId, SimTime, MINUTES_PER_DAY};

/// When the engine stops generating new arrivals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArrivalHorizon {
    /// No arrival is scheduled after this absolute time, whatever the run
    /// duration. The classic station model uses one day.
    Fixed(SimTime),

    /// Arrivals continue until the end of the run.
    RunDuration,
}

impl ArrivalHorizon {
    /// Arrivals stop after the first simulated day.
    pub const ONE_DAY: Self = ArrivalHorizon::Fixed(SimTime::from_minutes(MINUTES_PER_DAY));

    /// The absolute cutoff for a run of `duration`.
    pub fn cutoff(self, duration: SimTime) -> SimTime {
        match self {
            ArrivalHorizon::Fixed(at) => at,
            ArrivalHorizon::RunDuration => duration,
        }
    }
}

impl Default for ArrivalHorizon {
    fn default() -> Self {
        Self::ONE_DAY
    }
}

/// Denominator used to turn busy time into a utilization percentage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum UtilizationBase {
    /// Busy time inside the run window over the run duration.
    /// Always within [0, 100].
    #[default]
    Elapsed,

    /// Total drawn service time over a fixed span, regardless of the run
    /// duration. `Fixed(one day)` reproduces historical reports.
    Fixed(SimTime),
}

impl UtilizationBase {
    /// Historical denominator: one day.
    pub const ONE_DAY: Self = UtilizationBase::Fixed(SimTime::from_minutes(MINUTES_PER_DAY));
}

/// Stochastic parameters of the station.
///
/// Times are in minutes.
#[derive(Clone, Debug, PartialEq)]
pub struct StationConfig {
    /// Poisson arrival rate, vehicles per hour.
    pub arrivals_per_hour: f64,

    /// Probability that a vehicle wants 92 (pump A); the rest want 95.
    pub pump_a_share: f64,

    /// Probability that a vehicle needs an invoice after fueling.
    pub invoice_probability: f64,

    /// Mean of the exponential fueling time.
    pub mean_fuel_service: f64,

    /// Probability that an invoice is the slow kind.
    pub complex_invoice_probability: f64,

    /// Mean of the exponential slow-invoice time.
    pub mean_complex_invoice: f64,

    /// Mean of the exponential fast-invoice time.
    pub mean_simple_invoice: f64,

    /// When arrivals stop.
    pub arrival_horizon: ArrivalHorizon,

    /// How utilization is normalized.
    pub utilization_base: UtilizationBase,
}

impl StationConfig {
    /// The classic two-pump, one-clerk station.
    pub fn new() -> Self {
        Self {
            arrivals_per_hour: 21.5,
            pump_a_share: 0.7,
            invoice_probability: 0.4,
            mean_fuel_service: 3.7,
            complex_invoice_probability: 0.5,
            mean_complex_invoice: 2.3,
            mean_simple_invoice: 35.0 / 60.0,
            arrival_horizon: ArrivalHorizon::default(),
            utilization_base: UtilizationBase::default(),
        }
    }

    /// The classic station with historical utilization normalization, for
    /// comparison with reports produced before the elapsed-time base.
    pub fn historical() -> Self {
        Self::new().with_utilization_base(UtilizationBase::ONE_DAY)
    }

    /// Set the arrival rate (vehicles per hour).
    pub fn with_arrivals_per_hour(mut self, rate: f64) -> Self {
        self.arrivals_per_hour = rate;
        self
    }

    /// Set the share of vehicles using pump A.
    pub fn with_pump_a_share(mut self, share: f64) -> Self {
        self.pump_a_share = share;
        self
    }

    /// Set the invoice probability.
    pub fn with_invoice_probability(mut self, probability: f64) -> Self {
        self.invoice_probability = probability;
        self
    }

    /// Set the mean fueling time.
    pub fn with_mean_fuel_service(mut self, minutes: f64) -> Self {
        self.mean_fuel_service = minutes;
        self
    }

    /// Set the share of invoices that are complex.
    pub fn with_complex_invoice_probability(mut self, probability: f64) -> Self {
        self.complex_invoice_probability = probability;
        self
    }

    /// Set the mean time to prepare a complex invoice.
    pub fn with_mean_complex_invoice(mut self, minutes: f64) -> Self {
        self.mean_complex_invoice = minutes;
        self
    }

    /// Set the mean time to prepare a simple invoice.
    pub fn with_mean_simple_invoice(mut self, minutes: f64) -> Self {
        self.mean_simple_invoice = minutes;
        self
    }

    /// Set the arrival horizon.
    pub fn with_arrival_horizon(mut self, horizon: ArrivalHorizon) -> Self {
        self.arrival_horizon = horizon;
        self
    }

    /// Set the utilization denominator.
    pub fn with_utilization_base(mut self, base: UtilizationBase) -> Self {
        self.utilization_base = base;
        self
    }

    /// Mean time between arrivals.
    pub fn mean_interarrival(&self) -> f64 {
        60.0 / self.arrivals_per_hour
    }

    /// Share of arrivals routed to `pump`.
    pub fn pump_share(&self, pump: PumpId) -> f64 {
        match pump {
            PumpId::A => self.pump_a_share,
            PumpId::B => 1.0 - self.pump_a_share,
        }
    }

    /// Offered load of a pump: arrival rate to it times mean service time.
    pub fn offered_load(&self, pump: PumpId) -> f64 {
        self.arrivals_per_hour / 60.0 * self.pump_share(pump) * self.mean_fuel_service
    }

    /// Check every parameter is in range.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let probabilities = [
            ("pump_a_share", self.pump_a_share),
            ("invoice_probability", self.invoice_probability),
            ("complex_invoice_probability", self.complex_invoice_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }

        let positives = [
            ("arrivals_per_hour", self.arrivals_per_hour),
            ("mean_fuel_service", self.mean_fuel_service),
            ("mean_complex_invoice", self.mean_complex_invoice),
            ("mean_simple_invoice", self.mean_simple_invoice),
        ];
        for (name, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        if let ArrivalHorizon::Fixed(at) = self.arrival_horizon {
            if !at.is_valid_duration() {
                return Err(SimulationError::InvalidConfig(format!(
                    "arrival horizon must be non-negative, got {}",
                    at.minutes()
                )));
            }
        }
        if let UtilizationBase::Fixed(span) = self.utilization_base {
            if !(span.is_valid_duration() && span.minutes() > 0.0) {
                return Err(SimulationError::InvalidConfig(format!(
                    "utilization base must be positive, got {}",
                    span.minutes()
                )));
            }
        }

        Ok(())
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(StationConfig::default().validate().is_ok());
        assert!(StationConfig::historical().validate().is_ok());
    }

    #[test]
    fn test_offered_load() {
        let config = StationConfig::new();
        let rho_a = 21.5 / 60.0 * 0.7 * 3.7;
        assert!((config.offered_load(PumpId::A) - rho_a).abs() < 1e-12);
        let rho_b = 21.5 / 60.0 * 0.3 * 3.7;
        assert!((config.offered_load(PumpId::B) - rho_b).abs() < 1e-12);
    }

    #[test]
    fn test_mean_interarrival() {
        let config = StationConfig::new();
        assert!((config.mean_interarrival() - 60.0 / 21.5).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = StationConfig::new()
            .with_invoice_probability(1.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(msg) if msg.contains("invoice_probability")));
    }

    #[test]
    fn test_invoice_builders() {
        let config = StationConfig::new()
            .with_complex_invoice_probability(0.25)
            .with_mean_complex_invoice(4.0)
            .with_mean_simple_invoice(1.0);
        assert_eq!(config.complex_invoice_probability, 0.25);
        assert_eq!(config.mean_complex_invoice, 4.0);
        assert_eq!(config.mean_simple_invoice, 1.0);
        assert!(config.validate().is_ok());

        let err = StationConfig::new()
            .with_complex_invoice_probability(-0.1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(msg) if msg.contains("complex_invoice_probability")));

        for config in [
            StationConfig::new().with_mean_complex_invoice(0.0),
            StationConfig::new().with_mean_simple_invoice(f64::INFINITY),
        ] {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_rejects_non_positive_mean() {
        let err = StationConfig::new()
            .with_mean_fuel_service(0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));

        let err = StationConfig::new()
            .with_arrivals_per_hour(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn test_horizon_cutoff() {
        let day = SimTime::from_days(1.0);
        let week = SimTime::from_days(7.0);
        assert_eq!(ArrivalHorizon::ONE_DAY.cutoff(week), day);
        assert_eq!(ArrivalHorizon::RunDuration.cutoff(week), week);
    }
}
