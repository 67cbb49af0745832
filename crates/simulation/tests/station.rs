//! Whole-replication properties of the station simulation.

use forecourt_simulation::{
    simulate, ArrivalHorizon, EventKind, StationConfig, StationSimulation, UtilizationBase,
};
use forecourt_types::{Metric, Metrics, PumpId, SimTime};
use tracing_test::traced_test;

fn run(seed: u64, duration: SimTime) -> StationSimulation {
    let mut sim = StationSimulation::new(StationConfig::new(), seed)
        .unwrap()
        .with_trace();
    sim.run(duration).unwrap();
    sim
}

#[traced_test]
#[test]
fn test_same_seed_is_bit_identical() {
    let duration = SimTime::from_days(1.0);
    let a = simulate(StationConfig::new(), 77, duration).unwrap();
    let b = simulate(StationConfig::new(), 77, duration).unwrap();
    assert!(a.bit_identical(&b));
}

#[traced_test]
#[test]
fn test_different_seeds_diverge() {
    let duration = SimTime::from_days(1.0);
    let a = simulate(StationConfig::new(), 1, duration).unwrap();
    let b = simulate(StationConfig::new(), 2, duration).unwrap();
    assert!(!a.bit_identical(&b));
}

#[traced_test]
#[test]
fn test_event_times_never_decrease() {
    let sim = run(3, SimTime::from_days(1.0));
    let trace = sim.trace().unwrap();
    assert!(!trace.is_empty());
    assert!(trace.windows(2).all(|w| w[0].time <= w[1].time));
}

#[traced_test]
#[test]
fn test_vehicle_conservation() {
    for (seed, minutes) in [(1, 60.0), (2, 500.0), (3, 1440.0), (4, 1000.0)] {
        let sim = run(seed, SimTime::from_minutes(minutes));
        let stats = sim.run_stats();

        assert_eq!(
            stats.vehicles_arrived,
            stats.routed_to(PumpId::A) + stats.routed_to(PumpId::B)
        );
        assert_eq!(
            stats.vehicles_arrived,
            stats.vehicles_departed + sim.vehicles_in_system() as u64,
            "seed {seed}: every arrival has either left or is still inside"
        );
        assert_eq!(stats.events_of(EventKind::Arrival), stats.vehicles_arrived);
    }
}

#[traced_test]
#[test]
fn test_metrics_are_finite_and_in_range() {
    for seed in 0..20 {
        let metrics = simulate(StationConfig::new(), seed, SimTime::from_minutes(720.0)).unwrap();
        for (metric, value) in metrics.iter() {
            assert!(value.is_finite() && value >= 0.0, "{metric} = {value}");
            if metric.is_utilization() {
                assert!(value <= 100.0, "{metric} = {value}");
            }
        }
    }
}

#[traced_test]
#[test]
fn test_final_queue_never_exceeds_max() {
    for seed in 0..10 {
        let metrics = simulate(StationConfig::new(), seed, SimTime::from_minutes(900.0)).unwrap();
        assert!(metrics.get(Metric::FinalQueueA) <= metrics.get(Metric::PumpAMaxQueue));
        assert!(metrics.get(Metric::FinalQueueB) <= metrics.get(Metric::PumpBMaxQueue));
        assert!(metrics.get(Metric::FinalInvoiceQueue) <= metrics.get(Metric::InvoiceMaxQueue));
    }
}

#[traced_test]
#[test]
fn test_zero_duration_is_all_zero() {
    let metrics = simulate(StationConfig::new(), 9, SimTime::ZERO).unwrap();
    assert!(metrics.bit_identical(&Metrics::zeroed()));
}

#[traced_test]
#[test]
fn test_idle_station_after_arrivals_stop() {
    // One day of arrivals, then a long tail: the station must empty out.
    let sim = run(5, SimTime::from_days(10.0));
    assert_eq!(sim.vehicles_in_system(), 0);
    assert!(sim.pending_events().is_empty());

    let metrics = simulate(StationConfig::new(), 5, SimTime::from_days(10.0)).unwrap();
    assert_eq!(metrics.get(Metric::FinalQueueA), 0.0);
    assert_eq!(metrics.get(Metric::FinalQueueB), 0.0);
    assert_eq!(metrics.get(Metric::FinalInvoiceQueue), 0.0);
    // Busy time is bounded by one day of arrivals spread over ten days.
    assert!(metrics.get(Metric::PumpAUtilization) < 15.0);
}

#[traced_test]
#[test]
fn test_historical_base_matches_total_busy_time() {
    let config = StationConfig::new().with_utilization_base(UtilizationBase::ONE_DAY);
    let mut sim = StationSimulation::new(config, 12).unwrap();
    let metrics = sim.run(SimTime::from_days(1.0)).unwrap();

    let total = sim
        .statistics()
        .busy_time(forecourt_types::ResourceId::Clerk)
        .total;
    let expected = total / 1440.0 * 100.0;
    assert!((metrics.get(Metric::ClerkUtilization) - expected).abs() < 1e-9);
}

#[traced_test]
#[test]
fn test_pump_a_load_near_offered_load() {
    // Pump A is offered rho = 21.5 / 60 * 0.7 * 3.7 ~= 0.926.
    let config = StationConfig::new().with_arrival_horizon(ArrivalHorizon::RunDuration);
    let rho = config.offered_load(PumpId::A);
    let runs = 40;
    let mean = (0..runs)
        .map(|seed| {
            simulate(config.clone(), seed, SimTime::from_days(1.0))
                .unwrap()
                .get(Metric::PumpAUtilization)
        })
        .sum::<f64>()
        / runs as f64;
    assert!(
        (mean / 100.0 - rho).abs() < 0.06,
        "mean utilization {mean}% vs offered load {rho}"
    );
}

fn mean_clerk_utilization(config: &StationConfig, runs: u64) -> f64 {
    (0..runs)
        .map(|seed| {
            simulate(config.clone(), seed, SimTime::from_days(1.0))
                .unwrap()
                .get(Metric::ClerkUtilization)
        })
        .sum::<f64>()
        / runs as f64
        / 100.0
}

#[traced_test]
#[test]
fn test_clerk_load_near_offered_load() {
    let config = StationConfig::new();
    let invoice_rate = config.arrivals_per_hour / 60.0 * config.invoice_probability;

    // Half complex (mean 2.3), half simple (mean 35 s): rho ~= 0.207.
    let mixed_service = config.complex_invoice_probability * config.mean_complex_invoice
        + (1.0 - config.complex_invoice_probability) * config.mean_simple_invoice;
    let rho = invoice_rate * mixed_service;
    let mean = mean_clerk_utilization(&config, 40);
    assert!(
        (mean - rho).abs() / rho < 0.1,
        "clerk utilization {mean} vs offered load {rho}"
    );

    // Every invoice complex: rho ~= 0.330.
    let complex_only = config.clone().with_complex_invoice_probability(1.0);
    let rho = invoice_rate * config.mean_complex_invoice;
    let mean = mean_clerk_utilization(&complex_only, 40);
    assert!(
        (mean - rho).abs() / rho < 0.1,
        "complex-only clerk utilization {mean} vs offered load {rho}"
    );

    // Every invoice simple: rho ~= 0.084.
    let simple_only = config.clone().with_complex_invoice_probability(0.0);
    let rho = invoice_rate * config.mean_simple_invoice;
    let mean = mean_clerk_utilization(&simple_only, 40);
    assert!(
        (mean - rho).abs() / rho < 0.1,
        "simple-only clerk utilization {mean} vs offered load {rho}"
    );
}

#[traced_test]
#[test]
fn test_invoice_waits_match_vehicle_timestamps() {
    let mut saw_line = false;
    for seed in 0..5 {
        // Arrivals stop after one day; three days drain every line.
        let mut sim = StationSimulation::new(StationConfig::new(), seed)
            .unwrap()
            .with_trace();
        let metrics = sim.run(SimTime::from_days(3.0)).unwrap();
        assert_eq!(sim.vehicles_in_system(), 0);

        // One clerk serving FIFO: completions come in service-start order.
        let completed: Vec<f64> = sim
            .trace()
            .unwrap()
            .iter()
            .filter(|e| e.kind == EventKind::InvoiceComplete)
            .map(|e| e.wait.unwrap())
            .collect();
        let waits = sim.statistics().invoice_waits();
        assert_eq!(waits, completed.as_slice());

        if metrics.get(Metric::InvoiceMaxQueue) > 0.0 {
            saw_line = true;
            assert!(
                waits.iter().any(|&w| w > 0.0),
                "seed {seed}: the invoice line formed but nobody waited"
            );
        }
    }
    assert!(saw_line);
}

#[traced_test]
#[test]
fn test_higher_arrival_rate_means_longer_lines() {
    let duration = SimTime::from_days(1.0);
    let mean_queue = |rate: f64| {
        let config = StationConfig::new().with_arrivals_per_hour(rate);
        (0..20)
            .map(|seed| {
                simulate(config.clone(), seed, duration)
                    .unwrap()
                    .get(Metric::AvgQueueLengthA)
            })
            .sum::<f64>()
            / 20.0
    };
    assert!(mean_queue(8.0) < mean_queue(21.5));
}
