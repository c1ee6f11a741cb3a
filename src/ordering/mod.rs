//! Ordered index maintenance
//!
//! Every record is threaded into three chains at once: insertion order,
//! identifier order and name order. No auxiliary index structure is kept;
//! each chain stores one predecessor/successor pair per arena slot.
//!
//! # Invariants
//!
//! - Linking and unlinking always touch all three chains in one call
//! - Identifier chain ascending by id
//! - Name chain ascending by (manufacturer, id)
//! - All three chains hold the same number of slots

mod chain;
mod errors;
mod kind;

pub use chain::{Chain, ChainFault, ChainIter, Links};
pub use errors::{InvariantResult, InvariantViolation};
pub use kind::OrderKind;

use std::cmp::Ordering;

use crate::inventory::{Arena, Bike};

/// The three chains over one arena.
#[derive(Debug, Clone, Default)]
pub struct Orderings {
    insertion: Chain,
    by_id: Chain,
    by_name: Chain,
}

impl Orderings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(&self, kind: OrderKind) -> &Chain {
        match kind {
            OrderKind::Insertion => &self.insertion,
            OrderKind::Id => &self.by_id,
            OrderKind::Name => &self.by_name,
        }
    }

    fn chain_mut(&mut self, kind: OrderKind) -> &mut Chain {
        match kind {
            OrderKind::Insertion => &mut self.insertion,
            OrderKind::Id => &mut self.by_id,
            OrderKind::Name => &mut self.by_name,
        }
    }

    /// Head slot of one ordering
    #[inline]
    pub fn head(&self, kind: OrderKind) -> Option<usize> {
        self.chain(kind).head()
    }

    /// Threads `slot` (already stored in `bikes`) into all three chains:
    /// appended to insertion order, sorted into the other two.
    pub fn link(&mut self, slot: usize, bikes: &Arena<Bike>) {
        let Some(new) = bikes.at(slot) else {
            debug_assert!(false, "linking empty slot {}", slot);
            return;
        };

        self.insertion.push_back(slot);

        for kind in [OrderKind::Id, OrderKind::Name] {
            self.chain_mut(kind).insert_sorted(slot, |existing| {
                bikes
                    .at(existing)
                    .is_some_and(|bike| kind.goes_before(new, bike))
            });
        }
    }

    /// Unlinks `slot` from every chain it is threaded into. Each chain is
    /// handled on its own since the slot may be head in one and tail in
    /// another. Returns how many chains held it.
    pub fn unlink(&mut self, slot: usize) -> usize {
        OrderKind::ALL
            .into_iter()
            .filter(|kind| self.chain_mut(*kind).unlink(slot))
            .count()
    }

    /// True if no chain references `slot`
    pub fn is_detached(&self, slot: usize) -> bool {
        OrderKind::ALL
            .iter()
            .all(|kind| self.chain(*kind).is_detached(slot))
    }

    /// Checks links, sort order and that all chains agree on membership count.
    pub fn verify(&self, bikes: &Arena<Bike>) -> InvariantResult<()> {
        let expected = self.insertion.len();

        for kind in OrderKind::ALL {
            let chain = self.chain(kind);
            chain
                .verify()
                .map_err(|fault| InvariantViolation::Broken { kind, fault })?;

            if chain.len() != expected {
                return Err(InvariantViolation::LengthMismatch {
                    kind,
                    expected,
                    found: chain.len(),
                });
            }

            let mut previous: Option<&Bike> = None;
            for slot in chain.iter() {
                let bike = bikes
                    .at(slot)
                    .ok_or(InvariantViolation::DanglingSlot { kind, slot })?;

                if let Some(prev) = previous {
                    if kind.compare(prev, bike) == Some(Ordering::Greater) {
                        return Err(InvariantViolation::OutOfOrder {
                            kind,
                            before: prev.id,
                            after: bike.id,
                        });
                    }
                }
                previous = Some(bike);
            }
        }
        Ok(())
    }
}
