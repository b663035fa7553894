//! A single floor: a [`SpotSet`] behind its own lock.

use parking_lot::Mutex;
use tracing::trace;

use crate::spot_set::SpotSet;

/// One floor of the lot.
///
/// Each call takes the floor's mutex for its whole duration, so an occupy is
/// atomic with respect to every other call on the same floor. Different
/// floors have independent locks.
pub struct Floor {
    index: usize,
    capacity: usize,
    spots: Mutex<SpotSet>,
}

impl Floor {
    /// Create floor `index` with `spots` spots, all free.
    pub fn new(index: usize, spots: usize) -> Self {
        Self {
            index,
            capacity: spots,
            spots: Mutex::new(SpotSet::new(spots)),
        }
    }

    /// Position of this floor in the lot.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total spots on this floor. Fixed at construction; takes no lock.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reserve `n` consecutive spots, returning the first index.
    ///
    /// See [`SpotSet::occupy`] for the selection policy.
    pub fn occupy(&self, n: usize) -> Option<usize> {
        let start = self.spots.lock().occupy(n);
        trace!(floor = self.index, spots = n, ?start, "occupy");
        start
    }

    /// Release `start..start + n`.
    ///
    /// Same contract as [`SpotSet::free`]: the range must have been handed
    /// out by [`occupy`](Floor::occupy) and not freed since.
    pub fn free(&self, start: usize, n: usize) {
        self.spots.lock().free(start, n);
        trace!(floor = self.index, start, spots = n, "free");
    }

    /// Number of free spots.
    pub fn available_count(&self) -> usize {
        self.spots.lock().available_count()
    }

    /// Whether this floor has no free spot.
    pub fn is_full(&self) -> bool {
        self.spots.lock().is_full()
    }

    /// Longest run of free spots.
    pub fn largest_run(&self) -> usize {
        self.spots.lock().largest_run()
    }

    /// Snapshot of the free indices, ascending.
    pub fn free_indices(&self) -> Vec<usize> {
        self.spots.lock().free_indices()
    }

    /// Snapshot of the free runs as `(start, len)`, ascending.
    pub fn runs(&self) -> Vec<(usize, usize)> {
        self.spots.lock().runs()
    }
}

impl std::fmt::Debug for Floor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let spots = self.spots.lock();
        f.debug_struct("Floor")
            .field("index", &self.index)
            .field("capacity", &self.capacity)
            .field("available", &spots.available_count())
            .field("runs", &spots.runs())
            .finish()
    }
}
