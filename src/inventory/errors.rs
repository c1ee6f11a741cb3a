//! Inventory errors
//!
//! Every variant is recoverable at the command level. The `Display` text is
//! the line shown to the user; `code()` is the stable identifier used in logs.

use thiserror::Error;

use super::arena::SlotKey;

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    #[error("No bike found with id {0}")]
    IdNotFound(i64),

    #[error("No bike found from manufacturer {0}")]
    ManufacturerNotFound(String),

    #[error("This Bike has already been rented!")]
    AlreadyRented { id: i64 },

    #[error("This Bike has not been rented yet!")]
    NotRented { id: i64 },

    #[error("Bike {0} already exists")]
    DuplicateId(i64),

    #[error("Invalid rental duration: {0}")]
    InvalidDuration(f64),

    #[error("Invalid daily rate: {0}")]
    InvalidRate(f64),

    #[error("Stale bike handle {0}")]
    StaleKey(SlotKey),

    #[error("Slot {0} is still linked in an ordering")]
    StillLinked(usize),
}

impl InventoryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::IdNotFound(_) | InventoryError::ManufacturerNotFound(_) => {
                "BIKE_NOT_FOUND"
            }
            InventoryError::AlreadyRented { .. } => "BIKE_ALREADY_RENTED",
            InventoryError::NotRented { .. } => "BIKE_NOT_RENTED",
            InventoryError::DuplicateId(_) => "BIKE_DUPLICATE_ID",
            InventoryError::InvalidDuration(_) => "BIKE_INVALID_DURATION",
            InventoryError::InvalidRate(_) => "BIKE_INVALID_RATE",
            InventoryError::StaleKey(_) => "BIKE_STALE_KEY",
            InventoryError::StillLinked(_) => "BIKE_STILL_LINKED",
        }
    }

    /// True for rent/return requests that do not fit the current status
    pub fn is_state_transition(&self) -> bool {
        matches!(
            self,
            InventoryError::AlreadyRented { .. } | InventoryError::NotRented { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            InventoryError::IdNotFound(_) | InventoryError::ManufacturerNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(InventoryError::IdNotFound(1).code(), "BIKE_NOT_FOUND");
        assert_eq!(
            InventoryError::ManufacturerNotFound("Acme".into()).code(),
            "BIKE_NOT_FOUND"
        );
        assert_eq!(
            InventoryError::AlreadyRented { id: 1 }.code(),
            "BIKE_ALREADY_RENTED"
        );
        assert_eq!(InventoryError::DuplicateId(3).code(), "BIKE_DUPLICATE_ID");
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            InventoryError::NotRented { id: 4 }.to_string(),
            "This Bike has not been rented yet!"
        );
        assert_eq!(
            InventoryError::IdNotFound(42).to_string(),
            "No bike found with id 42"
        );
    }

    #[test]
    fn test_classification() {
        assert!(InventoryError::NotRented { id: 1 }.is_state_transition());
        assert!(!InventoryError::IdNotFound(1).is_state_transition());
        assert!(InventoryError::IdNotFound(1).is_not_found());
    }
}
