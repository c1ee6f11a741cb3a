//! Command dispatcher
//!
//! Applies parsed commands to an inventory and writes the report. Every
//! command resolves its own errors: rejections are reported and logged,
//! never propagated. Only a failing report writer aborts a run.

use std::io::{self, Write};

use serde::Serialize;

use crate::inventory::{Bike, Inventory};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::transaction::{Charge, TransactionKind, TransactionProcessor};

use super::parser::{Command, ParseError, TokenStream};
use super::report::Report;

/// What happened to one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected,
    Skipped,
}

/// Totals for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub applied: usize,
    pub rejected: usize,
    pub skipped: usize,
    pub malformed: usize,
    pub truncated: bool,
}

/// Dispatches commands against an inventory, reporting to `W`
pub struct Dispatcher<W: Write> {
    report: Report<W>,
    summary: RunSummary,
}

impl<W: Write> Dispatcher<W> {
    pub fn new(out: W) -> Self {
        Self {
            report: Report::new(out),
            summary: RunSummary::default(),
        }
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn into_inner(self) -> W {
        self.report.into_inner()
    }

    /// Processes every command in `tokens` until the source is exhausted.
    pub fn run(
        &mut self,
        inventory: &mut Inventory,
        tokens: TokenStream<'_>,
    ) -> io::Result<RunSummary> {
        for parsed in tokens {
            match parsed {
                Ok(command) => {
                    self.apply(inventory, command)?;
                }
                Err(e) => {
                    self.malformed(&e)?;
                    if e.is_truncation() {
                        break;
                    }
                }
            }
        }
        self.report.flush()?;
        Ok(self.summary)
    }

    /// Applies one command.
    pub fn apply(&mut self, inventory: &mut Inventory, command: Command) -> io::Result<Outcome> {
        let name = command.name();

        let result = match command {
            Command::Add {
                id,
                size,
                daily_rate,
                manufacturer,
            } => inventory
                .insert(Bike::new(id, size, daily_rate, manufacturer))
                .map(|_| {
                    let id = id.to_string();
                    log_event_with_fields(Event::BikeAdded, &[("id", id.as_str())]);
                }),
            Command::List(listing) => {
                let walk = inventory.traverse(listing.order(), listing.filter());
                self.report.listing(listing, walk.bikes())?;
                Ok(())
            }
            Command::Rent { id, days, renter } => {
                match TransactionProcessor::rent(inventory, id, days, &renter) {
                    Ok(charge) => {
                        self.charged(&charge)?;
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            Command::Return { id, days } => {
                match TransactionProcessor::return_bike(inventory, id, days) {
                    Ok(charge) => {
                        self.charged(&charge)?;
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            Command::DeleteById(id) => match inventory.delete_by_id(id) {
                Ok(bike) => {
                    self.deleted(&bike)?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::DeleteByManufacturer(manufacturer) => {
                match inventory.delete_by_manufacturer(&manufacturer) {
                    Ok(bike) => {
                        self.deleted(&bike)?;
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            Command::Unknown(token) => {
                // Numeric codes are skipped silently; anything else is worth a warning
                let fields = [("token", token.as_str())];
                if token.parse::<i64>().is_ok() {
                    Logger::trace(Event::CommandSkipped.as_str(), &fields);
                } else {
                    Logger::warn(Event::CommandSkipped.as_str(), &fields);
                }
                self.summary.skipped += 1;
                return Ok(Outcome::Skipped);
            }
        };

        match result {
            Ok(()) => {
                self.summary.applied += 1;
                Ok(Outcome::Applied)
            }
            Err(e) => {
                let reason = e.to_string();
                Logger::warn(
                    Event::CommandRejected.as_str(),
                    &[("code", e.code()), ("command", name), ("reason", reason.as_str())],
                );
                self.report.rejected(&e)?;
                self.summary.rejected += 1;
                Ok(Outcome::Rejected)
            }
        }
    }

    fn charged(&mut self, charge: &Charge) -> io::Result<()> {
        let event = match charge.kind {
            TransactionKind::Rent => Event::BikeRented,
            TransactionKind::Return => Event::BikeReturned,
        };
        let amount = format!("{:.2}", charge.amount);
        let id = charge.bike_id.to_string();
        log_event_with_fields(event, &[("amount", amount.as_str()), ("id", id.as_str())]);
        self.report.charge(charge)
    }

    fn deleted(&mut self, bike: &Bike) -> io::Result<()> {
        let id = bike.id.to_string();
        log_event_with_fields(
            Event::BikeDeleted,
            &[("id", id.as_str()), ("manufacturer", bike.manufacturer.as_str())],
        );
        self.report.deleted(bike)
    }

    fn malformed(&mut self, err: &ParseError) -> io::Result<()> {
        let event = if err.is_truncation() {
            self.summary.truncated = true;
            Event::InputTruncated
        } else {
            self.summary.malformed += 1;
            Event::CommandRejected
        };
        let reason = err.to_string();
        Logger::warn(
            event.as_str(),
            &[("code", err.code()), ("reason", reason.as_str())],
        );
        self.report.malformed(err)
    }
}
