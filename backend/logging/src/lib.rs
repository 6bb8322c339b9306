//! Telemetry and structured logging for qudom.
//!
//! Handles subscriber setup (pretty or JSON console output, optional rolling
//! NDJSON files) and structured build events.

pub mod event_logger;
pub mod logger;

pub use event_logger::{BuildEvent, EventLogEntry, EventLogger};
pub use logger::{init_logger, LogFormat, LoggingOptions};
