//! The three orderings and their comparators

use std::cmp::Ordering;
use std::fmt;

use crate::inventory::Bike;

/// One of the three orderings every record participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderKind {
    /// Arrival order, append-only
    Insertion,
    /// Ascending identifier
    Id,
    /// Ascending manufacturer, ties by ascending identifier
    Name,
}

impl OrderKind {
    pub const ALL: [OrderKind; 3] = [OrderKind::Insertion, OrderKind::Id, OrderKind::Name];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::Insertion => "insertion",
            OrderKind::Id => "id",
            OrderKind::Name => "name",
        }
    }

    /// Key comparison for the sorted orderings; `None` for insertion order.
    pub fn compare(&self, a: &Bike, b: &Bike) -> Option<Ordering> {
        match self {
            OrderKind::Insertion => None,
            OrderKind::Id => Some(a.id.cmp(&b.id)),
            OrderKind::Name => Some(
                a.manufacturer
                    .as_bytes()
                    .cmp(b.manufacturer.as_bytes())
                    .then(a.id.cmp(&b.id)),
            ),
        }
    }

    /// True if `new` must be spliced in front of `existing`, i.e. the
    /// existing key is strictly greater. Never true for insertion order.
    #[inline]
    pub fn goes_before(&self, new: &Bike, existing: &Bike) -> bool {
        self.compare(existing, new) == Some(Ordering::Greater)
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_comparator() {
        let a = Bike::new(2, 0, 1.0, "Zeta");
        let b = Bike::new(5, 0, 1.0, "Acme");
        assert_eq!(OrderKind::Id.compare(&a, &b), Some(Ordering::Less));
        assert!(OrderKind::Id.goes_before(&a, &b));
        assert!(!OrderKind::Id.goes_before(&b, &a));
    }

    #[test]
    fn test_name_comparator_breaks_ties_by_id() {
        let low = Bike::new(5, 0, 1.0, "Acme");
        let high = Bike::new(8, 0, 1.0, "Acme");
        let zeta = Bike::new(2, 0, 1.0, "Zeta");

        assert!(OrderKind::Name.goes_before(&low, &high));
        assert!(OrderKind::Name.goes_before(&high, &zeta));
        assert!(!OrderKind::Name.goes_before(&zeta, &low));
    }

    #[test]
    fn test_name_comparator_is_case_sensitive_bytewise() {
        let upper = Bike::new(1, 0, 1.0, "Zeta");
        let lower = Bike::new(2, 0, 1.0, "acme");
        assert!(OrderKind::Name.goes_before(&upper, &lower));
    }

    #[test]
    fn test_insertion_never_goes_before() {
        let a = Bike::new(1, 0, 1.0, "A");
        let b = Bike::new(2, 0, 1.0, "B");
        assert!(!OrderKind::Insertion.goes_before(&a, &b));
        assert_eq!(OrderKind::Insertion.compare(&a, &b), None);
    }

    #[test]
    fn test_equal_keys_do_not_go_before() {
        let a = Bike::new(3, 0, 1.0, "Acme");
        let b = Bike::new(3, 0, 1.0, "Acme");
        assert!(!OrderKind::Id.goes_before(&a, &b));
        assert!(!OrderKind::Name.goes_before(&a, &b));
    }
}
