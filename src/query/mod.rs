//! Traversal and query over the orderings
//!
//! Read-only: nothing in this module can relink a record.

mod traversal;

pub use traversal::{StatusFilter, Traversal};
