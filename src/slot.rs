use std::mem;

/// A tri-state cell in the slot array.
///
/// `Open` slots have never been written since construction or the last
/// rehash, so a probe may terminate at one. `Deleted` slots are
/// tombstones: their payload is gone, but the slot stays non-open so
/// probe chains running through it are not cut short.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    /// Never written since construction or the last rehash
    Open,
    /// Tombstone left behind by an erase; payload already dropped
    Deleted,
    /// Live entry, exclusively owned by this slot
    Used {
        /// The stored key
        key: K,
        /// The value associated with the key
        value: V,
    },
}

impl<K, V> Slot<K, V> {
    /// Returns true if the slot holds a live entry
    pub(crate) fn is_used(&self) -> bool {
        matches!(self, Self::Used { .. })
    }

    /// Returns true if the slot is a tombstone
    pub(crate) fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// Takes the payload out of a live slot, leaving a tombstone
    /// behind. Open and already-deleted slots are left untouched.
    pub(crate) fn take(&mut self) -> Option<(K, V)> {
        if self.is_used() {
            match mem::replace(self, Self::Deleted) {
                Self::Used { key, value } => Some((key, value)),
                // `is_used` just held; nothing to restore
                Self::Open | Self::Deleted => None,
            }
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_live_slot_leaves_tombstone() {
        let mut slot = Slot::Used { key: "k", value: 7 };
        assert_eq!(slot.take(), Some(("k", 7)));
        assert!(slot.is_deleted());
    }

    #[test]
    fn test_take_is_idempotent_on_non_live_slots() {
        let mut open: Slot<&str, i32> = Slot::Open;
        assert_eq!(open.take(), None);
        assert!(!open.is_deleted());

        let mut tombstone: Slot<&str, i32> = Slot::Deleted;
        assert_eq!(tombstone.take(), None);
        assert!(tombstone.is_deleted());
    }
}
