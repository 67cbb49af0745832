//! Deterministic station simulation runner.
//!
//! One `StationSimulation` is one replication: it owns the event queue,
//! the station state, the variate source and the statistics, and is thrown
//! away once its metrics are extracted.

use crate::config::StationConfig;
use crate::event::{Event, EventKind};
use crate::event_queue::EventQueue;
use crate::resources::StationState;
use crate::stats::StatisticsCollector;
use crate::variates::VariateSource;
use crate::SimulationError;
use forecourt_types::{FuelType, Metrics, PumpId, ResourceId, SimTime, Vehicle, VehicleId};
use tracing::{debug, trace};

/// Lifecycle of a replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Created, not yet run.
    Idle,
    /// Processing events.
    Running,
    /// Finished; metrics have been produced.
    Drained,
}

/// Counters collected while running.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Total events processed.
    pub events_processed: u64,
    /// Events processed by kind, indexed by [`EventKind::index`].
    pub events_by_kind: [u64; 3],
    /// Vehicles created by arrival events.
    pub vehicles_arrived: u64,
    /// Arrivals that wanted pump A.
    pub routed_to_pump_a: u64,
    /// Arrivals that wanted pump B.
    pub routed_to_pump_b: u64,
    /// Fuel services started.
    pub fuel_services_started: u64,
    /// Fuel services completed.
    pub fuel_services_completed: u64,
    /// Invoice services started.
    pub invoices_started: u64,
    /// Invoice services completed.
    pub invoices_completed: u64,
    /// Vehicles that left the station.
    pub vehicles_departed: u64,
}

impl RunStats {
    /// Events processed of one kind.
    pub fn events_of(&self, kind: EventKind) -> u64 {
        self.events_by_kind[kind.index()]
    }

    /// Arrivals routed to a pump.
    pub fn routed_to(&self, pump: PumpId) -> u64 {
        match pump {
            PumpId::A => self.routed_to_pump_a,
            PumpId::B => self.routed_to_pump_b,
        }
    }
}

/// A processed event, recorded when tracing is enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceEntry {
    pub time: SimTime,
    pub kind: EventKind,
    pub vehicle: Option<VehicleId>,
    pub pump: Option<PumpId>,
    /// For completions, how long the vehicle waited before that service.
    pub wait: Option<f64>,
}

/// Discrete-event simulation of one replication of the station.
///
/// Given the same config and seed, produces identical metrics every run.
pub struct StationSimulation {
    config: StationConfig,

    /// Pending events, ordered by time then insertion.
    event_queue: EventQueue,

    /// Busy flags and wait lines.
    state: StationState,

    /// The only source of randomness in the replication.
    variates: VariateSource,

    /// Samples for the metric mapping.
    stats: StatisticsCollector,

    /// Counters.
    run_stats: RunStats,

    /// Current simulation time.
    now: SimTime,

    /// Length of the run window.
    duration: SimTime,

    /// No arrival is scheduled after this time.
    arrival_cutoff: SimTime,

    phase: RunPhase,

    next_vehicle: VehicleId,

    /// Processed events, when enabled.
    trace: Option<Vec<TraceEntry>>,
}

impl StationSimulation {
    /// Create a fresh replication.
    pub fn new(config: StationConfig, seed: u64) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            config,
            event_queue: EventQueue::new(),
            state: StationState::new(),
            variates: VariateSource::new(seed),
            stats: StatisticsCollector::new(),
            run_stats: RunStats::default(),
            now: SimTime::ZERO,
            duration: SimTime::ZERO,
            arrival_cutoff: SimTime::ZERO,
            phase: RunPhase::Idle,
            next_vehicle: VehicleId::FIRST,
            trace: None,
        })
    }

    /// Record every processed event.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Run the replication for `duration` and return its metrics.
    ///
    /// Events due after `duration` are never processed. Vehicles still in
    /// service or waiting at that point are reported through the final
    /// queue sizes.
    pub fn run(&mut self, duration: SimTime) -> Result<Metrics, SimulationError> {
        if self.phase != RunPhase::Idle {
            return Err(SimulationError::AlreadyRun);
        }
        if !duration.is_valid_duration() {
            return Err(SimulationError::InvalidDuration(duration.minutes()));
        }

        self.duration = duration;
        self.arrival_cutoff = self.config.arrival_horizon.cutoff(duration);
        self.now = SimTime::ZERO;
        self.phase = RunPhase::Running;

        debug!(
            seed = self.variates.seed(),
            duration_minutes = duration.minutes(),
            arrival_cutoff_minutes = self.arrival_cutoff.minutes(),
            "Starting replication"
        );

        self.schedule_arrival();

        while self.event_queue.peek_time().is_some_and(|t| t <= duration) {
            let Some((time, event)) = self.event_queue.pop_earliest() else {
                break;
            };
            debug_assert!(time >= self.now, "time went backward");
            self.now = time;
            self.dispatch(event);
            self.stats.sample_queues(self.state.queue_lengths());
        }

        self.phase = RunPhase::Drained;

        let final_queues = self.state.queue_lengths();
        debug!(
            events_processed = self.run_stats.events_processed,
            vehicles_arrived = self.run_stats.vehicles_arrived,
            vehicles_departed = self.run_stats.vehicles_departed,
            pending_events = self.event_queue.len(),
            final_queue_a = final_queues.pump_a,
            final_queue_b = final_queues.pump_b,
            final_invoice_queue = final_queues.invoice,
            "Replication drained"
        );

        Ok(self
            .stats
            .finish(final_queues, self.config.utilization_base, duration))
    }

    // ─── Accessors ──────────────────────────────────────────────────────

    /// Current simulation time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Station parameters.
    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// Seed of the variate source.
    pub fn seed(&self) -> u64 {
        self.variates.seed()
    }

    /// Counters.
    pub fn run_stats(&self) -> &RunStats {
        &self.run_stats
    }

    /// Collected samples.
    pub fn statistics(&self) -> &StatisticsCollector {
        &self.stats
    }

    /// Busy flags and wait lines.
    pub fn state(&self) -> &StationState {
        &self.state
    }

    /// Events scheduled but not processed.
    pub fn pending_events(&self) -> &EventQueue {
        &self.event_queue
    }

    /// Processed events, if tracing was enabled.
    pub fn trace(&self) -> Option<&[TraceEntry]> {
        self.trace.as_deref()
    }

    /// Vehicles waiting in a line or being served.
    pub fn vehicles_in_system(&self) -> usize {
        self.state.queue_lengths().total() + self.state.in_service()
    }

    // ─── Transitions ────────────────────────────────────────────────────

    fn dispatch(&mut self, event: Event) {
        let kind = event.kind();
        self.run_stats.events_processed += 1;
        self.run_stats.events_by_kind[kind.index()] += 1;

        if let Some(trace) = self.trace.as_mut() {
            trace.push(TraceEntry {
                time: self.now,
                kind,
                vehicle: event.vehicle().map(|v| v.id),
                pump: event.pump(),
                wait: match &event {
                    Event::Arrival => None,
                    Event::FuelComplete { vehicle, .. } => vehicle.fuel_wait(),
                    Event::InvoiceComplete { vehicle } => vehicle.invoice_wait(),
                },
            });
        }

        trace!(time = self.now.minutes(), %kind, "Processing event");

        match event {
            Event::Arrival => self.handle_arrival(),
            Event::FuelComplete { vehicle, pump } => self.handle_fuel_complete(vehicle, pump),
            Event::InvoiceComplete { vehicle } => self.handle_invoice_complete(vehicle),
        }
    }

    /// Schedule the next arrival unless it would fall past the cutoff.
    fn schedule_arrival(&mut self) {
        let at = self.now + self.variates.exponential(self.config.mean_interarrival());
        if at <= self.arrival_cutoff {
            self.event_queue.insert(at, Event::Arrival);
        } else {
            trace!(
                next_arrival = at.minutes(),
                cutoff = self.arrival_cutoff.minutes(),
                "Arrival horizon reached"
            );
        }
    }

    fn handle_arrival(&mut self) {
        let fuel_type = if self.variates.bernoulli(self.config.pump_a_share) {
            FuelType::Type92
        } else {
            FuelType::Type95
        };
        let needs_invoice = self.variates.bernoulli(self.config.invoice_probability);

        let id = self.next_vehicle;
        self.next_vehicle = id.next();
        let vehicle = Vehicle::arrive(id, self.now, fuel_type, needs_invoice);
        let pump = vehicle.pump();

        self.run_stats.vehicles_arrived += 1;
        match pump {
            PumpId::A => self.run_stats.routed_to_pump_a += 1,
            PumpId::B => self.run_stats.routed_to_pump_b += 1,
        }

        if self.state.pump(pump).is_busy() {
            self.state.pump_mut(pump).enqueue(vehicle);
        } else {
            self.start_fuel_service(vehicle, pump);
        }

        self.schedule_arrival();
    }

    fn start_fuel_service(&mut self, mut vehicle: Vehicle, pump: PumpId) {
        let service = self.variates.exponential(self.config.mean_fuel_service);
        let end = self.now + service;
        vehicle.fuel_service_start = Some(self.now);
        vehicle.fuel_service_end = Some(end);

        self.state.pump_mut(pump).occupy();
        self.stats
            .record_busy(ResourceId::Pump(pump), self.now, service, self.duration);
        self.run_stats.fuel_services_started += 1;

        self.event_queue
            .insert(end, Event::FuelComplete { vehicle, pump });
    }

    fn handle_fuel_complete(&mut self, mut vehicle: Vehicle, pump: PumpId) {
        self.run_stats.fuel_services_completed += 1;
        self.state.pump_mut(pump).release();

        if let Some(next) = self.state.pump_mut(pump).dequeue() {
            self.stats
                .record_fuel_wait(pump, self.now.since(next.arrival_time));
            self.start_fuel_service(next, pump);
        }

        if vehicle.needs_invoice {
            vehicle.invoice_queue_enter = Some(self.now);
            self.state.clerk_mut().enqueue(vehicle);
            if !self.state.clerk().is_busy() {
                self.start_invoice_service();
            }
        } else {
            self.depart(vehicle);
        }
    }

    /// Serve the next vehicle in the invoice line, if any.
    fn start_invoice_service(&mut self) {
        let Some(mut vehicle) = self.state.clerk_mut().dequeue() else {
            return;
        };
        self.state.clerk_mut().occupy();

        let mean = if self
            .variates
            .bernoulli(self.config.complex_invoice_probability)
        {
            self.config.mean_complex_invoice
        } else {
            self.config.mean_simple_invoice
        };
        let service = self.variates.exponential(mean);

        self.stats
            .record_busy(ResourceId::Clerk, self.now, service, self.duration);
        vehicle.invoice_service_start = Some(self.now);
        let entered = vehicle.invoice_queue_enter.unwrap_or(self.now);
        self.stats.record_invoice_wait(self.now.since(entered));
        self.run_stats.invoices_started += 1;

        self.event_queue
            .insert(self.now + service, Event::InvoiceComplete { vehicle });
    }

    fn handle_invoice_complete(&mut self, vehicle: Vehicle) {
        self.run_stats.invoices_completed += 1;
        self.depart(vehicle);
        self.state.clerk_mut().release();
        self.start_invoice_service();
    }

    fn depart(&mut self, mut vehicle: Vehicle) {
        let stay = vehicle.depart(self.now);
        self.stats.record_stay(vehicle.fuel_type, stay);
        self.run_stats.vehicles_departed += 1;
        trace!(vehicle = %vehicle.id, stay, "Vehicle departed");
    }
}
