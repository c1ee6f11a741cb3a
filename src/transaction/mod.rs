//! Rental transactions
//!
//! Rent and return operate in place on a record located by id in insertion
//! order. No transaction history is retained.

mod processor;

pub use processor::{Charge, TransactionKind, TransactionProcessor};
