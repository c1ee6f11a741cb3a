//! Bike record type
//!
//! A record carries only its own attributes. Its positions in the three
//! orderings live in the per-ordering chains, keyed by arena slot.

use std::fmt;

/// Rental status of a bike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RentalStatus {
    /// On the shelf
    #[default]
    Available,
    /// Out with a renter
    Rented,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Available => "available",
            RentalStatus::Rented => "rented",
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One piece of rentable equipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Bike {
    /// Manufacturer name, a single whitespace-free token
    pub manufacturer: String,
    /// Numeric identifier
    pub id: i64,
    /// Rental status
    pub status: RentalStatus,
    /// Renter name, empty when available
    pub renter: String,
    /// Size/category
    pub size: i64,
    /// Daily rate
    pub daily_rate: f64,
    /// Tombstone flag
    pub deleted: bool,
}

impl Bike {
    /// Creates an available, live record
    pub fn new(id: i64, size: i64, daily_rate: f64, manufacturer: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            id,
            status: RentalStatus::Available,
            renter: String::new(),
            size,
            daily_rate,
            deleted: false,
        }
    }

    /// Not tombstoned
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.deleted
    }

    #[inline]
    pub fn is_rented(&self) -> bool {
        self.status == RentalStatus::Rented
    }

    /// Charge for keeping this bike `days` days.
    #[inline]
    pub fn charge_for(&self, days: f64) -> f64 {
        days * self.daily_rate
    }
}
