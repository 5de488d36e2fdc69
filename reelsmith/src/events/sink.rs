//! Event sink trait and implementations.

use super::AgentEvent;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info, warn, Level};

/// Trait for event sinks that can receive agent events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event asynchronously.
    async fn emit(&self, event: &AgentEvent);

    /// Emits an event without blocking.
    ///
    /// Used from synchronous stage callbacks. Must never panic; failures
    /// are logged and dropped.
    fn try_emit(&self, event: &AgentEvent);
}

/// A no-op event sink that discards all events.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: &AgentEvent) {}

    fn try_emit(&self, _event: &AgentEvent) {}
}

/// An event sink that logs events using the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a new logging event sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    fn log_event(&self, event: &AgentEvent) {
        let event_type = event.event_type();
        let job_id = event.job_id();
        let data = event.to_json();

        // Degraded renders are worth surfacing regardless of level.
        if matches!(event, AgentEvent::RenderDegraded { .. }) {
            warn!(%job_id, event_type, event_data = %data, "Event: {}", event_type);
            return;
        }

        if self.level == Level::DEBUG {
            debug!(%job_id, event_type, event_data = %data, "Event: {}", event_type);
        } else {
            info!(%job_id, event_type, event_data = %data, "Event: {}", event_type);
        }
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: &AgentEvent) {
        self.log_event(event);
    }

    fn try_emit(&self, event: &AgentEvent) {
        self.log_event(event);
    }
}

/// A collecting event sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<AgentEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<AgentEvent> {
        self.events.read().clone()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Returns the dotted types of collected events, in order.
    #[must_use]
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.read().iter().map(AgentEvent::event_type).collect()
    }

    /// Returns events matching a type prefix.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<AgentEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type().starts_with(type_prefix))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: &AgentEvent) {
        self.events.write().push(event.clone());
    }

    fn try_emit(&self, event: &AgentEvent) {
        self.events.write().push(event.clone());
    }
}
