//! # smoothnormal-telemetry
//!
//! Event bus for bake telemetry. The pipeline emits structured events
//! (batch start and end, per-mesh outcome, engine fallback) that can be
//! consumed by pluggable sinks (tracing logs, in-memory capture, etc.).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{BakeEvent, EventKind};
pub use sinks::{EventSink, TracingSink, VecSink};
