//! The owning collection
//!
//! `Inventory` holds the arena and the three orderings. Every mutation goes
//! through `&mut self`, so a half-linked record can never be observed.
//!
//! # API
//!
//! - `insert(bike)` - store and link into all three orderings
//! - `delete_by_id(id)` / `delete_by_manufacturer(name)` - first live match
//!   in insertion order
//! - `traverse(kind, filter)` - lazy walk of one ordering
//! - `purge_tombstones()` - reclaim records kept by `DeleteMode::Retain`
//! - `check_invariants()` - full structural check

use super::arena::{Arena, SlotKey};
use super::errors::{InventoryError, InventoryResult};
use super::record::Bike;
use crate::ordering::{Chain, InvariantResult, InvariantViolation, OrderKind, Orderings};
use crate::query::{StatusFilter, Traversal};

/// Handle to a stored bike
pub type BikeKey = SlotKey;

/// What a delete does after locating its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Unlink from all three orderings, tombstone, free the slot
    #[default]
    Reclaim,
    /// Tombstone only; the record stays linked and is filtered on read
    Retain,
}

impl DeleteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteMode::Reclaim => "reclaim",
            DeleteMode::Retain => "retain",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "reclaim" => Some(DeleteMode::Reclaim),
            "retain" => Some(DeleteMode::Retain),
            _ => None,
        }
    }
}

/// Behavior switches for an inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryOptions {
    /// Reject an insert whose id matches a live record
    pub reject_duplicate_ids: bool,
    pub delete_mode: DeleteMode,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            reject_duplicate_ids: true,
            delete_mode: DeleteMode::Reclaim,
        }
    }
}

/// Bike records kept in insertion, identifier and name order.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    bikes: Arena<Bike>,
    orderings: Orderings,
    options: InventoryOptions,
    live: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: InventoryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> InventoryOptions {
        self.options
    }

    /// Number of live records
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Occupied arena slots, live or retained tombstones
    #[inline]
    pub fn slots_in_use(&self) -> usize {
        self.bikes.len()
    }

    /// Stores `bike` and links it into all three orderings.
    pub fn insert(&mut self, mut bike: Bike) -> InventoryResult<BikeKey> {
        if !bike.daily_rate.is_finite() || bike.daily_rate < 0.0 {
            return Err(InventoryError::InvalidRate(bike.daily_rate));
        }
        if self.options.reject_duplicate_ids && self.find_live_by_id(bike.id).is_some() {
            return Err(InventoryError::DuplicateId(bike.id));
        }

        bike.deleted = false;
        let key = self.bikes.insert(bike);
        self.orderings.link(key.index(), &self.bikes);
        self.live += 1;
        Ok(key)
    }

    pub fn get(&self, key: BikeKey) -> InventoryResult<&Bike> {
        self.bikes.get(key).ok_or(InventoryError::StaleKey(key))
    }

    pub(crate) fn get_mut(&mut self, key: BikeKey) -> InventoryResult<&mut Bike> {
        self.bikes.get_mut(key).ok_or(InventoryError::StaleKey(key))
    }

    /// Live records of `kind` that pass `filter`
    pub fn traverse(&self, kind: OrderKind, filter: StatusFilter) -> Traversal<'_> {
        Traversal::new(&self.bikes, self.orderings.chain(kind), kind, filter)
    }

    /// All live records of `kind`
    pub fn iter(&self, kind: OrderKind) -> Traversal<'_> {
        self.traverse(kind, StatusFilter::Any)
    }

    /// Raw chain for one ordering, tombstones included
    pub fn chain(&self, kind: OrderKind) -> &Chain {
        self.orderings.chain(kind)
    }

    /// Handle of the first record of `kind`, tombstoned or not
    pub fn head(&self, kind: OrderKind) -> Option<BikeKey> {
        self.orderings
            .head(kind)
            .and_then(|slot| self.bikes.key_at(slot))
    }

    /// First live record with `id`, in insertion order
    pub fn find_live_by_id(&self, id: i64) -> Option<BikeKey> {
        self.iter(OrderKind::Insertion)
            .find(|(_, bike)| bike.id == id)
            .map(|(key, _)| key)
    }

    /// First live record from `manufacturer`, in insertion order
    pub fn find_live_by_manufacturer(&self, manufacturer: &str) -> Option<BikeKey> {
        self.iter(OrderKind::Insertion)
            .find(|(_, bike)| bike.manufacturer == manufacturer)
            .map(|(key, _)| key)
    }

    /// Deletes the first live record with `id`.
    pub fn delete_by_id(&mut self, id: i64) -> InventoryResult<Bike> {
        let key = self
            .find_live_by_id(id)
            .ok_or(InventoryError::IdNotFound(id))?;
        self.delete(key)
    }

    /// Deletes the first live record from `manufacturer`. Further matches are
    /// left alone; repeat the call to remove them.
    pub fn delete_by_manufacturer(&mut self, manufacturer: &str) -> InventoryResult<Bike> {
        let key = self
            .find_live_by_manufacturer(manufacturer)
            .ok_or_else(|| InventoryError::ManufacturerNotFound(manufacturer.to_string()))?;
        self.delete(key)
    }

    /// Deletes one live record. Returns the record as it was finalised.
    pub fn delete(&mut self, key: BikeKey) -> InventoryResult<Bike> {
        if !self.get(key)?.is_live() {
            return Err(InventoryError::StaleKey(key));
        }

        let removed = match self.options.delete_mode {
            DeleteMode::Retain => {
                let bike = self.get_mut(key)?;
                bike.deleted = true;
                bike.clone()
            }
            DeleteMode::Reclaim => {
                self.orderings.unlink(key.index());
                self.reclaim(key)?
            }
        };

        self.live -= 1;
        Ok(removed)
    }

    /// Unlinks and frees every retained tombstone. Returns how many.
    ///
    /// A tombstone that cannot be reclaimed means the orderings are corrupt;
    /// the error is returned and the remaining tombstones stay in place.
    pub fn purge_tombstones(&mut self) -> InventoryResult<usize> {
        let tombstones: Vec<BikeKey> = self
            .bikes
            .iter()
            .filter(|(_, bike)| !bike.is_live())
            .map(|(key, _)| key)
            .collect();

        let mut purged = 0;
        for key in tombstones {
            self.orderings.unlink(key.index());
            self.reclaim(key)?;
            purged += 1;
        }
        Ok(purged)
    }

    /// Tombstones and frees a slot that no ordering references any more.
    fn reclaim(&mut self, key: BikeKey) -> InventoryResult<Bike> {
        if !self.orderings.is_detached(key.index()) {
            return Err(InventoryError::StillLinked(key.index()));
        }
        self.get_mut(key)?.deleted = true;
        self.bikes.remove(key).ok_or(InventoryError::StaleKey(key))
    }

    /// Verifies links and sort order of all three orderings, and that every
    /// stored record is linked.
    pub fn check_invariants(&self) -> InvariantResult<()> {
        self.orderings.verify(&self.bikes)?;

        let linked = self.orderings.chain(OrderKind::Insertion).len();
        if linked != self.bikes.len() {
            return Err(InvariantViolation::LengthMismatch {
                kind: OrderKind::Insertion,
                expected: self.bikes.len(),
                found: linked,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme_zeta() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.insert(Bike::new(5, 26, 2.5, "Acme")).unwrap();
        inventory.insert(Bike::new(2, 24, 3.0, "Zeta")).unwrap();
        inventory.insert(Bike::new(8, 28, 4.0, "Acme")).unwrap();
        inventory
    }

    fn ids(inventory: &Inventory, kind: OrderKind) -> Vec<i64> {
        inventory.iter(kind).ids().collect()
    }

    #[test]
    fn test_three_orderings_after_insert() {
        let inventory = acme_zeta();

        assert_eq!(ids(&inventory, OrderKind::Insertion), vec![5, 2, 8]);
        assert_eq!(ids(&inventory, OrderKind::Id), vec![2, 5, 8]);
        assert_eq!(ids(&inventory, OrderKind::Name), vec![5, 8, 2]);
        assert_eq!(inventory.len(), 3);
        inventory.check_invariants().unwrap();
    }

    #[test]
    fn test_duplicate_id_rejected_by_default() {
        let mut inventory = acme_zeta();
        let err = inventory.insert(Bike::new(5, 1, 1.0, "Other")).unwrap_err();

        assert_eq!(err, InventoryError::DuplicateId(5));
        assert_eq!(inventory.len(), 3);
        inventory.check_invariants().unwrap();
    }

    #[test]
    fn test_duplicate_id_allowed_when_configured() {
        let mut inventory = Inventory::with_options(InventoryOptions {
            reject_duplicate_ids: false,
            ..InventoryOptions::default()
        });
        let first = inventory.insert(Bike::new(5, 1, 1.0, "B")).unwrap();
        let second = inventory.insert(Bike::new(5, 1, 1.0, "A")).unwrap();

        let by_id: Vec<_> = inventory.iter(OrderKind::Id).map(|(k, _)| k).collect();
        assert_eq!(by_id, vec![first, second]);
        assert_eq!(inventory.find_live_by_id(5), Some(first));
        inventory.check_invariants().unwrap();
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut inventory = Inventory::new();
        let err = inventory.insert(Bike::new(1, 1, -2.0, "Acme")).unwrap_err();
        assert_eq!(err, InventoryError::InvalidRate(-2.0));
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_delete_by_id_reclaims_slot() {
        let mut inventory = acme_zeta();
        let key = inventory.find_live_by_id(2).unwrap();

        let removed = inventory.delete_by_id(2).unwrap();
        assert_eq!(removed.id, 2);
        assert!(removed.deleted);
        assert_eq!(inventory.slots_in_use(), 2);
        assert!(matches!(inventory.get(key), Err(InventoryError::StaleKey(_))));

        assert_eq!(ids(&inventory, OrderKind::Id), vec![5, 8]);
        assert_eq!(ids(&inventory, OrderKind::Name), vec![5, 8]);
        inventory.check_invariants().unwrap();
    }

    #[test]
    fn test_reclaimed_slot_is_reused() {
        let mut inventory = acme_zeta();
        let old = inventory.find_live_by_id(5).unwrap();
        inventory.delete_by_id(5).unwrap();

        let new = inventory.insert(Bike::new(1, 20, 1.0, "Bmx")).unwrap();
        assert_eq!(new.index(), old.index());
        assert!(inventory.get(old).is_err());
        assert_eq!(inventory.get(new).unwrap().id, 1);
        assert_eq!(ids(&inventory, OrderKind::Id), vec![1, 2, 8]);
        inventory.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut inventory = acme_zeta();
        let before: Vec<_> = OrderKind::ALL
            .iter()
            .map(|k| inventory.chain(*k).iter().collect::<Vec<_>>())
            .collect();

        assert_eq!(
            inventory.delete_by_id(99).unwrap_err(),
            InventoryError::IdNotFound(99)
        );
        assert_eq!(
            inventory.delete_by_manufacturer("Nope").unwrap_err(),
            InventoryError::ManufacturerNotFound("Nope".into())
        );

        let after: Vec<_> = OrderKind::ALL
            .iter()
            .map(|k| inventory.chain(*k).iter().collect::<Vec<_>>())
            .collect();
        assert_eq!(before, after);
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_retain_mode_keeps_tombstone_linked() {
        let mut inventory = Inventory::with_options(InventoryOptions {
            delete_mode: DeleteMode::Retain,
            ..InventoryOptions::default()
        });
        inventory.insert(Bike::new(5, 26, 2.5, "Acme")).unwrap();
        inventory.insert(Bike::new(2, 24, 3.0, "Zeta")).unwrap();

        inventory.delete_by_id(5).unwrap();

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.slots_in_use(), 2);
        assert_eq!(inventory.chain(OrderKind::Insertion).len(), 2);
        assert_eq!(ids(&inventory, OrderKind::Insertion), vec![2]);
        assert_eq!(inventory.find_live_by_id(5), None);
        assert!(inventory.delete_by_id(5).is_err());
        inventory.check_invariants().unwrap();

        assert_eq!(inventory.purge_tombstones().unwrap(), 1);
        assert_eq!(inventory.slots_in_use(), 1);
        assert_eq!(inventory.chain(OrderKind::Id).len(), 1);
        inventory.check_invariants().unwrap();
    }

    #[test]
    fn test_purge_in_reclaim_mode_is_noop() {
        let mut inventory = acme_zeta();
        inventory.delete_by_id(5).unwrap();
        assert_eq!(inventory.purge_tombstones().unwrap(), 0);
        inventory.check_invariants().unwrap();
    }

    #[test]
    fn test_reclaim_refuses_linked_slot() {
        let mut inventory = acme_zeta();
        let key = inventory.find_live_by_id(2).unwrap();

        assert_eq!(
            inventory.reclaim(key).unwrap_err(),
            InventoryError::StillLinked(key.index())
        );
        assert_eq!(inventory.len(), 3);
        assert!(inventory.get(key).unwrap().is_live());
        inventory.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_mode_parse() {
        assert_eq!(DeleteMode::parse("retain"), Some(DeleteMode::Retain));
        assert_eq!(DeleteMode::parse("reclaim"), Some(DeleteMode::Reclaim));
        assert_eq!(DeleteMode::parse("compact"), None);
    }
}
