//! Bounded, append-only item list.
//!
//! [`BoundedList`] keeps the most recent N items in insertion order and
//! silently evicts the oldest ones once the capacity is exceeded.  It is the
//! single piece of shared state between the polling worker and the UI, so it
//! deliberately has a tiny surface: push, indexed get, iteration, snapshot.
//!
//! The list is **not** internally synchronized.  All mutation must be
//! serialized by the owner — in this application the worker delivers over a
//! channel and only the UI thread pushes; a host that shares a list across
//! tasks wraps it in a `Mutex` (see the tests).

use std::collections::VecDeque;

use thiserror::Error;

/// Errors reportable by [`BoundedList`].
///
/// Both variants are caller mistakes, and both are recoverable — a bad index
/// is reported, never aborted on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    /// The list cannot hold anything with a zero capacity.
    #[error("capacity must be at least 1")]
    InvalidCapacity,

    /// `get` was called with an index outside `[0, len)`.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An append-only list that retains at most `capacity` items, evicting the
/// oldest first.
///
/// Order among retained items is strictly insertion order.  There is no
/// removal-by-value, no reordering, and no de-duplication.
#[derive(Debug, Clone)]
pub struct BoundedList<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedList<T> {
    /// Create an empty list with the given fixed capacity.
    ///
    /// Fails fast with [`ListError::InvalidCapacity`] when `capacity` is
    /// zero rather than deferring the problem to the first push.
    pub fn new(capacity: usize) -> Result<Self, ListError> {
        if capacity == 0 {
            return Err(ListError::InvalidCapacity);
        }
        Ok(Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Create a list pre-populated from `items`, e.g. a persisted snapshot.
    ///
    /// If `items` is longer than `capacity` the eviction rule applies: only
    /// the last `capacity` elements are retained, in their original order.
    pub fn with_items(
        capacity: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<Self, ListError> {
        let mut list = Self::new(capacity)?;
        for item in items {
            list.push(item);
        }
        Ok(list)
    }

    /// Append `item`, evicting from the front until the capacity invariant
    /// holds again.
    ///
    /// Returns `true` when an older item was evicted to make room.  The UI
    /// uses this signal to distinguish "a row was replaced" from "a row was
    /// added".
    pub fn push(&mut self, item: T) -> bool {
        self.items.push_back(item);
        let mut evicted = false;
        while self.items.len() > self.capacity {
            self.items.pop_front();
            evicted = true;
        }
        evicted
    }

    /// The item at `index` in insertion order.
    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        self.items.get(index).ok_or(ListError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Current element count, always `<= capacity()`.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The fixed capacity this list was constructed with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over the retained items, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> BoundedList<T> {
    /// A cloning snapshot of the current items, oldest first.
    ///
    /// This is the persistence seam: the host hands the snapshot to its
    /// store; the list itself never touches the disk.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    // -- construction --------------------------------------------------------

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            BoundedList::<String>::new(0).unwrap_err(),
            ListError::InvalidCapacity
        );
    }

    #[test]
    fn new_list_starts_empty() {
        let list = BoundedList::<&str>::new(3).unwrap();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 3);
    }

    #[test]
    fn with_items_keeps_short_input_unchanged() {
        let list = BoundedList::with_items(3, ["a", "b"]).unwrap();
        assert_eq!(list.snapshot(), vec!["a", "b"]);
    }

    #[test]
    fn with_items_evicts_bulk_overflow() {
        // Overflow by more than one in a single load.
        let list = BoundedList::with_items(3, ["a", "b", "c", "d", "e"]).unwrap();
        assert_eq!(list.snapshot(), vec!["c", "d", "e"]);
    }

    // -- push / eviction -----------------------------------------------------

    #[test]
    fn len_never_exceeds_capacity() {
        let mut list = BoundedList::new(4).unwrap();
        for i in 0..100 {
            list.push(i);
            assert!(list.len() <= list.capacity(), "after push {i}");
        }
    }

    #[test]
    fn retains_exactly_the_last_capacity_items_in_order() {
        let mut list = BoundedList::new(3).unwrap();
        for s in ["a", "b", "c", "d"] {
            list.push(s);
        }
        assert_eq!(list.snapshot(), vec!["b", "c", "d"]);
    }

    #[test]
    fn push_reports_whether_an_eviction_occurred() {
        let mut list = BoundedList::new(2).unwrap();
        assert!(!list.push("a"));
        assert!(!list.push("b"));
        assert!(list.push("c"), "list was full, so pushing must evict");
        assert!(list.push("d"));
    }

    // -- get -----------------------------------------------------------------

    #[test]
    fn get_returns_items_in_insertion_order() {
        let mut list = BoundedList::new(3).unwrap();
        for s in ["a", "b", "c", "d"] {
            list.push(s);
        }
        assert_eq!(list.get(0), Ok(&"b"));
        assert_eq!(list.get(1), Ok(&"c"));
        assert_eq!(list.get(2), Ok(&"d"));
    }

    #[test]
    fn get_out_of_range_is_an_error_not_a_panic() {
        let mut list = BoundedList::new(3).unwrap();
        for s in ["a", "b", "c", "d"] {
            list.push(s);
        }
        assert_eq!(
            list.get(3),
            Err(ListError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            list.get(usize::MAX),
            Err(ListError::IndexOutOfRange {
                index: usize::MAX,
                len: 3
            })
        );
    }

    #[test]
    fn get_on_empty_list_is_out_of_range() {
        let list = BoundedList::<&str>::new(1).unwrap();
        assert_eq!(
            list.get(0),
            Err(ListError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    // -- shared-access discipline --------------------------------------------

    /// Concurrent pushes are the one correctness hazard around this type:
    /// a host that shares a list across tasks must serialize mutation.  With
    /// the lock discipline, the invariant holds no matter how appends
    /// interleave.
    #[test]
    fn concurrent_pushes_through_a_mutex_keep_the_invariant() {
        let list = Arc::new(Mutex::new(BoundedList::new(5).unwrap()));
        let mut handles = Vec::new();

        for task in 0..8 {
            let list = Arc::clone(&list);
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    let mut guard = list.lock().unwrap();
                    guard.push(task * 1000 + i);
                    assert!(guard.len() <= guard.capacity());
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let guard = list.lock().unwrap();
        assert_eq!(guard.len(), 5);
    }
}
