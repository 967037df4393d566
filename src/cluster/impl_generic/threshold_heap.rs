//! Bounded min-heap over assignment distances.
//!
//! Keeps the `capacity` largest distances inserted since the last `clear`.
//! Its minimum is the trimming threshold of the round.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Threshold reported when trimming is disabled (`capacity == 0`).
pub const NO_TRIM_THRESHOLD: f64 = f64::INFINITY;

#[derive(Debug, Clone, Copy)]
struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Min-heap retaining at most `capacity` of the largest inserted values.
#[derive(Debug, Clone)]
pub struct ThresholdHeap {
    heap: BinaryHeap<Reverse<Distance>>,
    capacity: usize,
}

impl ThresholdHeap {
    pub fn new(capacity: usize) -> Self {
        let mut heap = Self {
            heap: BinaryHeap::with_capacity(capacity.max(1)),
            capacity,
        };
        heap.clear();
        heap
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remove all values. A zero-capacity heap keeps the
    /// [`NO_TRIM_THRESHOLD`] sentinel so `peek` never trims.
    pub fn clear(&mut self) {
        self.heap.clear();
        if self.capacity == 0 {
            self.heap.push(Reverse(Distance(NO_TRIM_THRESHOLD)));
        }
    }

    /// Offer a distance. NaN is ignored.
    pub fn insert(&mut self, distance: f64) {
        if distance.is_nan() || self.capacity == 0 {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(Distance(distance)));
            return;
        }
        if let Some(mut min) = self.heap.peek_mut() {
            if distance > min.0.0 {
                *min = Reverse(Distance(distance));
            }
        }
    }

    /// Smallest retained value.
    pub fn peek(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(d)| d.0)
    }

    /// Retained values in ascending order.
    pub fn retained(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.heap.iter().map(|Reverse(d)| d.0).collect();
        values.sort_by(f64::total_cmp);
        values
    }
}
