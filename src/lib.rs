//! bikeshop - an in-memory rental bike inventory
//!
//! Records are kept in three orderings at once (insertion, identifier,
//! manufacturer) and driven by a batch command file.

pub mod cli;
pub mod command;
pub mod inventory;
pub mod observability;
pub mod ordering;
pub mod query;
pub mod transaction;
