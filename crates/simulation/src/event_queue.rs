//! Event queue with deterministic ordering.

use crate::event::Event;
use forecourt_types::SimTime;
use std::collections::BTreeMap;

/// Key for ordering events in the queue.
///
/// Events are ordered by:
/// 1. Time (earlier first)
/// 2. Sequence number (FIFO for events at the same time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventKey {
    /// When this event should be processed.
    pub time: SimTime,
    /// Insertion sequence number.
    pub sequence: u64,
}

/// Time-ordered queue of pending events.
///
/// Events cannot be cancelled or rescheduled once inserted.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: BTreeMap<EventKey, Event>,
    sequence: u64,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event due at `time`.
    pub fn insert(&mut self, time: SimTime, event: Event) -> EventKey {
        let key = EventKey {
            time,
            sequence: self.sequence,
        };
        self.sequence += 1;
        self.events.insert(key, event);
        key
    }

    /// Remove and return the earliest event.
    pub fn pop_earliest(&mut self) -> Option<(SimTime, Event)> {
        self.events
            .pop_first()
            .map(|(key, event)| (key.time, event))
    }

    /// Time of the earliest event, without removing it.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.events.first_key_value().map(|(key, _)| key.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
