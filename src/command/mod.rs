//! Command layer for bikeshop
//!
//! Thin I/O around the inventory:
//! - `parser`: token stream to `Command`
//! - `dispatcher`: applies commands, resolves their errors
//! - `report`: human-readable output
//!
//! # Command codes
//!
//! | code | command |
//! |------|---------|
//! | 1 | add: id size rate manufacturer |
//! | 2-6 | listings (general, id, name, available, rented) |
//! | 7 | rent: id days first last |
//! | 8 | return: id days |
//! | 9 | delete by id |
//! | 10 | delete by manufacturer |

mod dispatcher;
mod parser;
mod report;

pub use dispatcher::{Dispatcher, Outcome, RunSummary};
pub use parser::{scan, Command, Listing, ParseError, ScanSummary, TokenStream};
pub use report::Report;
