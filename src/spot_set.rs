//! Free-spot tracking for a single floor.
//!
//! Free spots are stored as maximal runs of consecutive indices, keyed by
//! run start:
//!
//! ```text
//! spots:  0 1 2 3 4 5 6 7
//! state:  . . X . . . X .      (. free, X occupied)
//! runs:   {0: 2, 3: 3, 7: 1}
//! ```
//!
//! Adjacent runs are merged when spots are freed, so the map never holds two
//! runs that touch. Every query that needs "the lowest free index" or "the
//! lowest-start run of at least `n`" walks the map in ascending key order, so
//! the nearest-spot tie-break falls out of the `BTreeMap` ordering.

use std::collections::BTreeMap;

/// Set of free spot indices in `0..capacity`, stored as coalesced runs.
#[derive(Clone, Debug)]
pub struct SpotSet {
    /// run start -> run length (always > 0).
    runs: BTreeMap<usize, usize>,
    /// Sum of all run lengths.
    free: usize,
    capacity: usize,
}

impl SpotSet {
    /// Create a set with every spot in `0..capacity` free.
    pub fn new(capacity: usize) -> Self {
        let mut runs = BTreeMap::new();
        if capacity > 0 {
            runs.insert(0, capacity);
        }
        Self {
            runs,
            free: capacity,
            capacity,
        }
    }

    /// Total number of spots, free or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of free spots.
    #[inline]
    pub fn available_count(&self) -> usize {
        self.free
    }

    /// Whether no spot is free.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free == 0
    }

    /// Reserve `n` consecutive free spots and return the first index.
    ///
    /// Picks the run with the lowest start among those at least `n` long,
    /// and takes the low end of it. For `n == 1` that is simply the smallest
    /// free index. Returns `None` without touching the set when no run is
    /// long enough, or when `n == 0`.
    pub fn occupy(&mut self, n: usize) -> Option<usize> {
        if n == 0 || n > self.free {
            return None;
        }

        let (start, len) = self
            .runs
            .iter()
            .find(|(_, &len)| len >= n)
            .map(|(&start, &len)| (start, len))?;

        self.runs.remove(&start);
        if len > n {
            self.runs.insert(start + n, len - n);
        }
        self.free -= n;
        Some(start)
    }

    /// Return `start..start + n` to the free set.
    ///
    /// The caller must only free spots it previously got from [`occupy`]
    /// with the same `n`, and only once. This is not checked in release
    /// builds; the lot's registry is the source of truth for what is held.
    ///
    /// [`occupy`]: SpotSet::occupy
    pub fn free(&mut self, start: usize, n: usize) {
        if n == 0 {
            return;
        }
        let end = start + n;
        debug_assert!(
            end <= self.capacity,
            "freeing {start}..{end} past capacity {}",
            self.capacity
        );
        debug_assert!(
            self.runs.range(start..end).next().is_none(),
            "freeing {start}..{end} overlaps a free run"
        );

        let mut run_start = start;
        let mut run_len = n;

        if let Some((&prev_start, &prev_len)) = self.runs.range(..start).next_back() {
            debug_assert!(
                prev_start + prev_len <= start,
                "freeing {start}..{end} overlaps free run at {prev_start}"
            );
            if prev_start + prev_len == start {
                self.runs.remove(&prev_start);
                run_start = prev_start;
                run_len += prev_len;
            }
        }

        if let Some(next_len) = self.runs.remove(&end) {
            run_len += next_len;
        }

        self.runs.insert(run_start, run_len);
        self.free += n;
    }

    /// Whether `index` is currently free.
    pub fn is_free(&self, index: usize) -> bool {
        match self.runs.range(..=index).next_back() {
            Some((&start, &len)) => index < start + len,
            None => false,
        }
    }

    /// Length of the longest free run, or 0 when full.
    pub fn largest_run(&self) -> usize {
        self.runs.values().copied().max().unwrap_or(0)
    }

    /// Free runs as `(start, len)`, ascending by start.
    pub fn runs(&self) -> Vec<(usize, usize)> {
        self.runs.iter().map(|(&s, &l)| (s, l)).collect()
    }

    /// Every free index, ascending.
    pub fn free_indices(&self) -> Vec<usize> {
        self.runs.iter().flat_map(|(&s, &l)| s..s + l).collect()
    }
}
