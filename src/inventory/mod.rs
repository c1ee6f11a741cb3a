//! Record store for bikeshop
//!
//! Records live in a generational arena and are threaded into three
//! orderings (see [`crate::ordering`]). The arena hands out `BikeKey`
//! handles; a handle to a reclaimed record never resolves again.
//!
//! # Invariants
//!
//! - A stored record is linked into all three orderings, or into none
//! - A slot is freed only after no ordering references it
//! - Tombstoned records are never returned by lookups or traversals

mod arena;
mod errors;
mod record;
mod store;

pub use arena::{Arena, SlotKey};
pub use errors::{InventoryError, InventoryResult};
pub use record::{Bike, RentalStatus};
pub use store::{BikeKey, DeleteMode, Inventory, InventoryOptions};
