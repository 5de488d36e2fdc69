//! Event sink system for observability.
//!
//! Job runners publish [`AgentEvent`]s to an injected [`EventSink`]. Events
//! are an observability side channel; the job log is the authoritative
//! history and never depends on a sink.

mod sink;
mod types;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
pub use types::AgentEvent;
