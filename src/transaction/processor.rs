//! Rent/return transactions
//!
//! State machine per record:
//!
//! ```text
//! Available --rent--> Rented --return--> Available
//! ```
//!
//! A request that does not fit the current status is rejected and leaves the
//! record untouched. The charge is computed and reported, never stored.

use crate::inventory::{Inventory, InventoryError, InventoryResult, RentalStatus};

/// Which side of the state machine a charge came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Rent,
    Return,
}

/// Outcome of an applied transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    pub kind: TransactionKind,
    pub bike_id: i64,
    pub days: f64,
    pub daily_rate: f64,
    /// `days * daily_rate`
    pub amount: f64,
}

/// Applies rent/return requests to an inventory
pub struct TransactionProcessor;

impl TransactionProcessor {
    /// Rents the first live bike with `id` to `renter` for `days` days.
    pub fn rent(
        inventory: &mut Inventory,
        id: i64,
        days: f64,
        renter: &str,
    ) -> InventoryResult<Charge> {
        Self::check_duration(days)?;
        let key = inventory
            .find_live_by_id(id)
            .ok_or(InventoryError::IdNotFound(id))?;
        let bike = inventory.get_mut(key)?;

        if bike.status == RentalStatus::Rented {
            return Err(InventoryError::AlreadyRented { id });
        }

        let charge = Charge {
            kind: TransactionKind::Rent,
            bike_id: id,
            days,
            daily_rate: bike.daily_rate,
            amount: bike.charge_for(days),
        };
        bike.status = RentalStatus::Rented;
        bike.renter = renter.to_string();
        Ok(charge)
    }

    /// Returns the first live bike with `id` after `days` days of use.
    pub fn return_bike(inventory: &mut Inventory, id: i64, days: f64) -> InventoryResult<Charge> {
        Self::check_duration(days)?;
        let key = inventory
            .find_live_by_id(id)
            .ok_or(InventoryError::IdNotFound(id))?;
        let bike = inventory.get_mut(key)?;

        if bike.status == RentalStatus::Available {
            return Err(InventoryError::NotRented { id });
        }

        let charge = Charge {
            kind: TransactionKind::Return,
            bike_id: id,
            days,
            daily_rate: bike.daily_rate,
            amount: bike.charge_for(days),
        };
        bike.renter.clear();
        bike.status = RentalStatus::Available;
        Ok(charge)
    }

    fn check_duration(days: f64) -> InventoryResult<()> {
        if days.is_finite() && days >= 0.0 {
            Ok(())
        } else {
            Err(InventoryError::InvalidDuration(days))
        }
    }
}
