//! Index-based doubly linked chain
//!
//! One `Chain` per ordering. Nodes are arena slot indices. The chain stores a
//! predecessor/successor pair per slot plus its own head and tail, so several
//! chains can thread the same slots independently.
//!
//! # Invariants
//!
//! - `a.next == Some(b)` implies `b.prev == Some(a)`
//! - the head has no predecessor, the tail has no successor
//! - a slot that is not linked has both pointers cleared and is not the head

use thiserror::Error;

/// Predecessor/successor pair for one slot in one chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Links {
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// Structural defect found by [`Chain::verify`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainFault {
    #[error("head {0} has a predecessor")]
    HeadHasPredecessor(usize),

    #[error("{node}.next = {next} but {next}.prev = {back:?}")]
    BrokenBackLink {
        node: usize,
        next: usize,
        back: Option<usize>,
    },

    #[error("cycle detected after {0} nodes")]
    Cycle(usize),

    #[error("tail is {recorded:?} but walk ended at {walked:?}")]
    TailMismatch {
        recorded: Option<usize>,
        walked: Option<usize>,
    },

    #[error("length is {recorded} but walk visited {walked}")]
    LengthMismatch { recorded: usize, walked: usize },
}

/// Doubly linked sequence over arena slots.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    head: Option<usize>,
    tail: Option<usize>,
    links: Vec<Links>,
    len: usize,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// First slot of the ordering
    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    #[inline]
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn links(&self, slot: usize) -> Links {
        self.links.get(slot).copied().unwrap_or_default()
    }

    #[inline]
    pub fn next(&self, slot: usize) -> Option<usize> {
        self.links(slot).next
    }

    #[inline]
    pub fn prev(&self, slot: usize) -> Option<usize> {
        self.links(slot).prev
    }

    /// True if `slot` is currently threaded into this chain
    pub fn contains(&self, slot: usize) -> bool {
        self.head == Some(slot) || self.links(slot) != Links::default()
    }

    #[inline]
    pub fn is_detached(&self, slot: usize) -> bool {
        !self.contains(slot)
    }

    fn reserve_slot(&mut self, slot: usize) {
        if slot >= self.links.len() {
            self.links.resize(slot + 1, Links::default());
        }
    }

    /// Appends `slot` after the current tail.
    pub fn push_back(&mut self, slot: usize) {
        self.reserve_slot(slot);
        debug_assert!(self.is_detached(slot), "slot {} already linked", slot);

        match self.tail {
            None => {
                self.head = Some(slot);
            }
            Some(tail) => {
                self.links[tail].next = Some(slot);
                self.links[slot].prev = Some(tail);
            }
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Splices `slot` immediately before `anchor`. If `anchor` was the head,
    /// `slot` becomes the new head.
    pub fn insert_before(&mut self, slot: usize, anchor: usize) {
        self.reserve_slot(slot);
        debug_assert!(self.is_detached(slot), "slot {} already linked", slot);
        debug_assert!(self.contains(anchor), "anchor {} not linked", anchor);

        let prev = self.links[anchor].prev;
        self.links[slot] = Links {
            prev,
            next: Some(anchor),
        };
        self.links[anchor].prev = Some(slot);

        match prev {
            Some(p) => self.links[p].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.len += 1;
    }

    /// Sorted insert: scans from the head and places `slot` before the first
    /// node for which `goes_before(node)` holds, or at the tail if none does.
    pub fn insert_sorted<F>(&mut self, slot: usize, mut goes_before: F)
    where
        F: FnMut(usize) -> bool,
    {
        let mut cursor = self.head;
        while let Some(current) = cursor {
            if goes_before(current) {
                self.insert_before(slot, current);
                return;
            }
            cursor = self.links[current].next;
        }
        self.push_back(slot);
    }

    /// Removes `slot` from the chain and clears its pointers.
    ///
    /// Returns false (and changes nothing) if the slot is not linked.
    pub fn unlink(&mut self, slot: usize) -> bool {
        if self.is_detached(slot) {
            return false;
        }

        let Links { prev, next } = self.links[slot];

        // Head moves to the successor before the target's own pointer is cleared
        match prev {
            None => self.head = next,
            Some(p) => self.links[p].next = next,
        }
        match next {
            Some(n) => self.links[n].prev = prev,
            None => self.tail = prev,
        }

        self.links[slot] = Links::default();
        self.len -= 1;
        true
    }

    /// Slots from head to tail
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            cursor: self.head,
        }
    }

    /// Walks the chain and checks every structural invariant.
    pub fn verify(&self) -> Result<(), ChainFault> {
        if let Some(head) = self.head {
            if self.links(head).prev.is_some() {
                return Err(ChainFault::HeadHasPredecessor(head));
            }
        }

        let mut walked = 0usize;
        let mut last = None;
        let mut cursor = self.head;

        while let Some(node) = cursor {
            walked += 1;
            if walked > self.links.len() {
                return Err(ChainFault::Cycle(walked));
            }

            let next = self.links(node).next;
            if let Some(n) = next {
                let back = self.links(n).prev;
                if back != Some(node) {
                    return Err(ChainFault::BrokenBackLink {
                        node,
                        next: n,
                        back,
                    });
                }
            }
            last = Some(node);
            cursor = next;
        }

        if last != self.tail {
            return Err(ChainFault::TailMismatch {
                recorded: self.tail,
                walked: last,
            });
        }
        if walked != self.len {
            return Err(ChainFault::LengthMismatch {
                recorded: self.len,
                walked,
            });
        }
        Ok(())
    }
}

/// Iterator over the slots of a chain
#[derive(Debug, Clone)]
pub struct ChainIter<'a> {
    chain: &'a Chain,
    cursor: Option<usize>,
}

impl Iterator for ChainIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.cursor?;
        self.cursor = self.chain.next(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(chain: &Chain) -> Vec<usize> {
        chain.iter().collect()
    }

    #[test]
    fn test_push_back_into_empty_sets_head() {
        let mut chain = Chain::new();
        chain.push_back(3);

        assert_eq!(chain.head(), Some(3));
        assert_eq!(chain.tail(), Some(3));
        assert_eq!(chain.links(3), Links::default());
        assert_eq!(chain.len(), 1);
        chain.verify().unwrap();
    }

    #[test]
    fn test_insert_before_head_moves_head() {
        let mut chain = Chain::new();
        chain.push_back(0);
        chain.push_back(1);
        chain.insert_before(2, 0);

        assert_eq!(chain.head(), Some(2));
        assert_eq!(collect(&chain), vec![2, 0, 1]);
        assert_eq!(chain.prev(0), Some(2));
        chain.verify().unwrap();
    }

    #[test]
    fn test_insert_sorted() {
        let keys = [30, 10, 20, 40, 5];
        let mut chain = Chain::new();
        for (slot, key) in keys.iter().enumerate() {
            chain.insert_sorted(slot, |existing| keys[existing] > *key);
        }

        let ordered: Vec<_> = chain.iter().map(|s| keys[s]).collect();
        assert_eq!(ordered, vec![5, 10, 20, 30, 40]);
        chain.verify().unwrap();
    }

    #[test]
    fn test_insert_sorted_equal_keys_keep_arrival_order() {
        let keys = [7, 7, 7];
        let mut chain = Chain::new();
        for (slot, key) in keys.iter().enumerate() {
            chain.insert_sorted(slot, |existing| keys[existing] > *key);
        }
        assert_eq!(collect(&chain), vec![0, 1, 2]);
    }

    #[test]
    fn test_unlink_head_interior_tail() {
        let mut chain = Chain::new();
        for slot in 0..5 {
            chain.push_back(slot);
        }

        assert!(chain.unlink(0));
        assert_eq!(chain.head(), Some(1));
        assert_eq!(chain.prev(1), None);
        chain.verify().unwrap();

        assert!(chain.unlink(2));
        assert_eq!(chain.next(1), Some(3));
        assert_eq!(chain.prev(3), Some(1));
        chain.verify().unwrap();

        assert!(chain.unlink(4));
        assert_eq!(chain.tail(), Some(3));
        assert_eq!(chain.next(3), None);
        chain.verify().unwrap();

        assert_eq!(collect(&chain), vec![1, 3]);
        for gone in [0, 2, 4] {
            assert!(chain.is_detached(gone));
        }
    }

    #[test]
    fn test_unlink_only_node_empties_chain() {
        let mut chain = Chain::new();
        chain.push_back(0);
        assert!(chain.unlink(0));

        assert!(chain.is_empty());
        assert_eq!(chain.head(), None);
        assert_eq!(chain.tail(), None);
        chain.verify().unwrap();
    }

    #[test]
    fn test_unlink_detached_is_noop() {
        let mut chain = Chain::new();
        chain.push_back(0);
        assert!(!chain.unlink(9));
        assert!(!chain.unlink(1));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_verify_detects_broken_back_link() {
        let mut chain = Chain::new();
        chain.push_back(0);
        chain.push_back(1);
        chain.links[1].prev = None;

        assert!(matches!(
            chain.verify(),
            Err(ChainFault::BrokenBackLink { node: 0, next: 1, .. })
        ));
    }

    #[test]
    fn test_verify_detects_cycle() {
        let mut chain = Chain::new();
        chain.push_back(0);
        chain.push_back(1);
        chain.links[1].next = Some(0);

        assert!(chain.verify().is_err());
    }
}
