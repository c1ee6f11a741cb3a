//! Ordering invariant violations

use thiserror::Error;

use super::chain::ChainFault;
use super::kind::OrderKind;

/// First violated invariant found by [`super::Orderings::verify`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{kind} ordering is broken: {fault}")]
    Broken { kind: OrderKind, fault: ChainFault },

    #[error("{kind} ordering has id {before} ahead of id {after}")]
    OutOfOrder {
        kind: OrderKind,
        before: i64,
        after: i64,
    },

    #[error("{kind} ordering holds {found} records, expected {expected}")]
    LengthMismatch {
        kind: OrderKind,
        expected: usize,
        found: usize,
    },

    #[error("{kind} ordering references empty slot {slot}")]
    DanglingSlot { kind: OrderKind, slot: usize },
}

/// Result type for invariant checks
pub type InvariantResult<T> = Result<T, InvariantViolation>;
