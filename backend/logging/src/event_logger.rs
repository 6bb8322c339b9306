//! Build Event Logger
//!
//! Structured events (parse, build, warning, failure) emitted under the
//! `qudom_events` target, one JSON object per event.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildEvent {
    IdentifierParsed {
        identifier: String,
        tag: String,
    },
    TreeBuilt {
        root: String,
        nodes: usize,
        depth: usize,
    },
    Warning {
        message: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    /// Where the event came from, e.g. `cli` or `server`.
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub event: BuildEvent,
}

pub struct EventLogger;

impl EventLogger {
    pub fn entry(source: &str, event: BuildEvent) -> EventLogEntry {
        EventLogEntry {
            source: source.into(),
            timestamp: Utc::now(),
            event,
        }
    }

    /// Serialize the event and hand it to the tracing system.
    pub fn log_event(source: &str, event: BuildEvent) {
        let entry = Self::entry(source, event);
        let json = serde_json::to_string(&entry).unwrap_or_else(|e| format!("{entry:?} ({e})"));

        match &entry.event {
            BuildEvent::Warning { .. } => warn!(target: "qudom_events", event = %json, "Build event"),
            BuildEvent::Failed { .. } => error!(target: "qudom_events", event = %json, "Build event"),
            _ => info!(target: "qudom_events", event = %json, "Build event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_with_type_tag() {
        let entry = EventLogger::entry(
            "cli",
            BuildEvent::TreeBuilt {
                root: "ul".into(),
                nodes: 3,
                depth: 2,
            },
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["source"], "cli");
        assert_eq!(value["event"]["type"], "tree_built");
        assert_eq!(value["event"]["nodes"], 3);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn log_event_does_not_panic_without_subscriber() {
        EventLogger::log_event("test", BuildEvent::Warning { message: "x".into() });
    }
}
