use bitvec::prelude::*;
use fxhash::FxHashMap;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::Index;

/// Fixed-size set of small integers, used for adjacency rows of dense graphs
/// and for visited-marks during traversals.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    cardinality: usize,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.iter().map(|i| i.to_string()).collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bit_vec: [{}]}}",
            self.cardinality,
            values.join(", "),
        )
    }
}

impl BitSet {
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size],
        }
    }

    /// Sets `idx`, returns whether it was already set.
    #[inline]
    pub fn set_bit(&mut self, idx: usize) -> bool {
        if self.bit_vec[idx] {
            true
        } else {
            self.bit_vec.set(idx, true);
            self.cardinality += 1;
            false
        }
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bit_vec
            .iter()
            .enumerate()
            .filter(|(_, x)| **x)
            .map(|(i, _)| i)
    }
}

impl Index<usize> for BitSet {
    type Output = bool;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.bit_vec.index(index)
    }
}

/// Indexed binary min-heap whose priorities can be updated in place.
/// Drives the vertex selection of the elimination heuristics.
pub struct BinaryQueue {
    heap: Vec<usize>,
    values: FxHashMap<usize, i64>,
    indices: FxHashMap<usize, usize>,
}

impl Default for BinaryQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryQueue {
    pub fn new() -> Self {
        Self {
            heap: Vec::default(),
            values: FxHashMap::default(),
            indices: FxHashMap::default(),
        }
    }

    /// Inserts `element`, or updates its priority when already queued.
    pub fn insert(&mut self, element: usize, priority: i64) {
        if let Some(value) = self.values.get_mut(&element) {
            *value = priority;
            let idx = self.indices[&element];
            let idx = self.up(idx);
            self.down(idx);
        } else {
            self.values.insert(element, priority);
            self.indices.insert(element, self.heap.len());
            self.heap.push(element);
            self.up(self.heap.len() - 1);
        }
    }

    pub fn pop_min(&mut self) -> Option<(usize, i64)> {
        let last = self.heap.pop()?;
        let min = if self.heap.is_empty() {
            last
        } else {
            let min = self.heap[0];
            self.heap[0] = last;
            self.indices.insert(last, 0);
            self.down(0);
            min
        };
        self.indices.remove(&min);
        let priority = self.values.remove(&min)?;
        Some((min, priority))
    }

    fn priority(&self, idx: usize) -> i64 {
        self.values[&self.heap[idx]]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.indices.insert(self.heap[a], a);
        self.indices.insert(self.heap[b], b);
    }

    fn up(&mut self, mut idx: usize) -> usize {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.priority(idx) < self.priority(parent) {
                self.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
        idx
    }

    fn down(&mut self, mut idx: usize) {
        loop {
            let first = 2 * idx + 1;
            let second = first + 1;
            if first >= self.heap.len() {
                break;
            }
            let smallest = if second < self.heap.len() && self.priority(second) < self.priority(first)
            {
                second
            } else {
                first
            };
            if self.priority(smallest) < self.priority(idx) {
                self.swap(idx, smallest);
                idx = smallest;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::datastructures::{BinaryQueue, BitSet};

    #[test]
    fn iter() {
        let mut bs = BitSet::new(256);

        let a: Vec<usize> = (0..256).filter(|i| i % 2 == 0).collect();
        for i in &a {
            bs.set_bit(*i);
        }

        let b: Vec<usize> = bs.iter().collect();
        assert_eq!(a, b);
        assert_eq!(bs.cardinality(), 128);
    }

    #[test]
    fn set_bit_twice() {
        let mut bs = BitSet::new(10);
        assert!(!bs.set_bit(3));
        assert!(bs.set_bit(3));
        assert!(bs[3] && !bs[4]);
        assert_eq!(bs.cardinality(), 1);
    }

    #[test]
    fn pq_pop_min() {
        let mut pq = BinaryQueue::new();

        pq.insert(0, 10);
        pq.insert(16, 1);
        pq.insert(1, 15);

        assert_eq!(pq.pop_min(), Some((16, 1)));
        assert_eq!(pq.pop_min(), Some((0, 10)));
        assert_eq!(pq.pop_min(), Some((1, 15)));
        assert_eq!(pq.pop_min(), None);
    }

    #[test]
    fn pq_update() {
        let mut pq = BinaryQueue::new();

        pq.insert(0, 10);
        pq.insert(16, 1);
        pq.insert(1, 15);
        pq.insert(16, 11);

        assert_eq!(pq.pop_min(), Some((0, 10)));
        assert_eq!(pq.pop_min(), Some((16, 11)));
        assert_eq!(pq.pop_min(), Some((1, 15)));
        assert_eq!(pq.pop_min(), None);
    }

    #[test]
    fn pq_reinsert_after_pop() {
        let mut pq = BinaryQueue::new();
        pq.insert(4, 2);
        pq.insert(5, 3);
        assert_eq!(pq.pop_min(), Some((4, 2)));
        pq.insert(4, 7);
        assert_eq!(pq.pop_min(), Some((5, 3)));
        assert_eq!(pq.pop_min(), Some((4, 7)));
        assert_eq!(pq.pop_min(), None);
    }
}
