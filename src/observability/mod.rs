//! Observability for bikeshop
//!
//! Structured JSON logging with a typed event catalogue. Observability is
//! read-only: it never changes the outcome of a command.
//!
//! ```ignore
//! use bikeshop::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::BikeAdded, &[("id", "5")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}

/// Severity a lifecycle event is logged at
pub fn event_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}
