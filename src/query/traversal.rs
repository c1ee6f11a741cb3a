//! Lazy walk over one ordering
//!
//! Tombstoned records are always skipped. A traversal holds shared borrows
//! only, so it can never change link structure; `restart` rewinds it to the
//! head it was created with.

use crate::inventory::{Arena, Bike, BikeKey, RentalStatus};
use crate::ordering::{Chain, OrderKind};

/// Status filter applied on top of the tombstone filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    AvailableOnly,
    RentedOnly,
}

impl StatusFilter {
    pub fn admits(&self, status: RentalStatus) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::AvailableOnly => status == RentalStatus::Available,
            StatusFilter::RentedOnly => status == RentalStatus::Rented,
        }
    }
}

/// Live records of one ordering, in order.
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    bikes: &'a Arena<Bike>,
    chain: &'a Chain,
    kind: OrderKind,
    filter: StatusFilter,
    cursor: Option<usize>,
}

impl<'a> Traversal<'a> {
    pub fn new(
        bikes: &'a Arena<Bike>,
        chain: &'a Chain,
        kind: OrderKind,
        filter: StatusFilter,
    ) -> Self {
        Self {
            bikes,
            chain,
            kind,
            filter,
            cursor: chain.head(),
        }
    }

    #[inline]
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    #[inline]
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Rewind to the head of the ordering
    pub fn restart(&mut self) {
        self.cursor = self.chain.head();
    }

    /// Yields only the records
    pub fn bikes(self) -> impl Iterator<Item = &'a Bike> + 'a {
        self.map(|(_, bike)| bike)
    }

    /// Yields only the identifiers
    pub fn ids(self) -> impl Iterator<Item = i64> + 'a {
        self.map(|(_, bike)| bike.id)
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (BikeKey, &'a Bike);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.cursor {
            self.cursor = self.chain.next(slot);

            let Some(key) = self.bikes.key_at(slot) else {
                continue;
            };
            let Some(bike) = self.bikes.get(key) else {
                continue;
            };
            if bike.is_live() && self.filter.admits(bike.status) {
                return Some((key, bike));
            }
        }
        None
    }
}
