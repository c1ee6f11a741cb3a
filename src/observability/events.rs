//! Observable events
//!
//! Events are explicit and typed; the string form is what appears in the
//! `event` key of a log line.

use std::fmt;

/// Observable events during a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Batch run begins
    RunStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Input exhausted, run finished
    RunComplete,
    /// Input could not be opened (FATAL)
    InputUnavailable,

    // Inventory
    /// Record linked into all three orderings
    BikeAdded,
    /// Record unlinked and finalised
    BikeDeleted,
    /// Retained tombstones reclaimed
    TombstonesPurged,

    // Transactions
    /// Rent transaction applied
    BikeRented,
    /// Return transaction applied
    BikeReturned,

    // Commands
    /// Command rejected with a reported error
    CommandRejected,
    /// Unknown command code skipped
    CommandSkipped,
    /// Input ended in the middle of a command
    InputTruncated,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RunStart => "RUN_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RunComplete => "RUN_COMPLETE",
            Event::InputUnavailable => "INPUT_UNAVAILABLE",

            Event::BikeAdded => "BIKE_ADDED",
            Event::BikeDeleted => "BIKE_DELETED",
            Event::TombstonesPurged => "TOMBSTONES_PURGED",

            Event::BikeRented => "BIKE_RENTED",
            Event::BikeReturned => "BIKE_RETURNED",

            Event::CommandRejected => "COMMAND_REJECTED",
            Event::CommandSkipped => "COMMAND_SKIPPED",
            Event::InputTruncated => "INPUT_TRUNCATED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::InputUnavailable)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::RunStart,
            Event::ConfigLoaded,
            Event::RunComplete,
            Event::InputUnavailable,
            Event::BikeAdded,
            Event::BikeDeleted,
            Event::TombstonesPurged,
            Event::BikeRented,
            Event::BikeReturned,
            Event::CommandRejected,
            Event::CommandSkipped,
            Event::InputTruncated,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_fatal_events() {
        assert!(Event::InputUnavailable.is_fatal());
        assert!(!Event::BikeDeleted.is_fatal());
    }
}
