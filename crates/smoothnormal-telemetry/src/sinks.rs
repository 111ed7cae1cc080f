//! Pluggable event sinks.
//!
//! Sinks consume events from the bus and process them
//! (log through `tracing`, capture in memory, etc.).

use std::sync::{Arc, Mutex, PoisonError};

use crate::events::{BakeEvent, EventKind};

/// Trait for event consumers.
///
/// Implement this to create custom telemetry outputs.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &BakeEvent);

    /// Called when the bake ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Shared view of the events a [`VecSink`] has collected.
pub type EventLog = Arc<Mutex<Vec<BakeEvent>>>;

/// A simple sink that collects events into a shared `Vec` for testing
/// and inspection.
#[derive(Default)]
pub struct VecSink {
    events: EventLog,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that stays readable after the sink is boxed into a bus.
    pub fn log(&self) -> EventLog {
        Arc::clone(&self.events)
    }

    /// Returns a copy of the collected events.
    pub fn events(&self) -> Vec<BakeEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &BakeEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that logs events using the `tracing` crate.
///
/// Routine events are logged at the sink's level. Failures and
/// fallbacks are logged at `WARN`, or at `ERROR` for an `ERROR` sink.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }

    /// Returns the level routine events are logged at.
    pub fn level(&self) -> tracing::Level {
        self.level
    }

    /// Level `kind` is logged at by this sink.
    pub fn event_level(&self, kind: &EventKind) -> tracing::Level {
        match kind {
            EventKind::MeshFailed { .. } | EventKind::EngineFallback { .. } => {
                if self.level == tracing::Level::ERROR {
                    tracing::Level::ERROR
                } else {
                    tracing::Level::WARN
                }
            }
            _ => self.level,
        }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &BakeEvent) {
        let kind = &event.kind;
        match self.event_level(kind) {
            level if level == tracing::Level::ERROR => {
                tracing::error!(batch = event.batch, event = ?kind, "bake_event");
            }
            level if level == tracing::Level::WARN => {
                tracing::warn!(batch = event.batch, event = ?kind, "bake_event");
            }
            level if level == tracing::Level::INFO => {
                tracing::info!(batch = event.batch, event = ?kind, "bake_event");
            }
            level if level == tracing::Level::DEBUG => {
                tracing::debug!(batch = event.batch, event = ?kind, "bake_event");
            }
            _ => {
                tracing::trace!(batch = event.batch, event = ?kind, "bake_event");
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
