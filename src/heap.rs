/*
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! A binary heap over column indices with decrease-key.
//!
//! Since the keys are the dense ids `0..C`, the position of every column
//! on the heap is tracked in a direct-addressed table instead of a map.
//! Equal distances are ordered by column index, so the pop order is
//! deterministic.

use crate::num::traits::Float;

/// The column is not (or no longer) on the heap.
const ABSENT: u32 = u32::MAX;
/// The column has been popped with its final distance.
const SETTLED: u32 = u32::MAX - 1;

/// Min-heap of columns keyed by tentative distance.
///
/// A column is in one of three states: untouched, queued or settled.
/// [`ColumnHeap::relax`] queues a column or decreases its key;
/// [`ColumnHeap::pop_min`] settles the minimum. `clear` resets all
/// columns for the next search.
pub struct ColumnHeap<F> {
    /// Column ids in heap order.
    heap: Vec<u32>,
    /// Position of each column in `heap`, or `ABSENT`/`SETTLED`.
    pos: Vec<u32>,
    /// Tentative (or, once settled, final) distance of each column.
    dist: Vec<F>,
}

impl<F> ColumnHeap<F>
where
    F: Float,
{
    pub fn new(num_cols: u32) -> Self {
        ColumnHeap {
            heap: Vec::with_capacity(num_cols as usize),
            pos: vec![ABSENT; num_cols as usize],
            dist: vec![F::infinity(); num_cols as usize],
        }
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        for p in &mut self.pos {
            *p = ABSENT;
        }
        for d in &mut self.dist {
            *d = F::infinity();
        }
    }

    /// The tentative or final distance of `col` (infinite if untouched).
    pub fn distance(&self, col: u32) -> F {
        self.dist[col as usize]
    }

    pub fn is_settled(&self, col: u32) -> bool {
        self.pos[col as usize] == SETTLED
    }

    /// Queue `col` with distance `d` or decrease its key to `d`.
    ///
    /// Returns `true` if the distance improved. Settled columns and
    /// non-improving distances are ignored.
    pub fn relax(&mut self, col: u32, d: F) -> bool {
        let idx = col as usize;
        match self.pos[idx] {
            SETTLED => false,
            ABSENT => {
                self.dist[idx] = d;
                self.pos[idx] = self.heap.len() as u32;
                self.heap.push(col);
                self.sift_up(self.heap.len() - 1);
                true
            }
            _ => {
                if d < self.dist[idx] {
                    self.dist[idx] = d;
                    self.sift_up(self.pos[idx] as usize);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Pop and settle the column with the smallest distance.
    pub fn pop_min(&mut self) -> Option<(u32, F)> {
        if self.heap.is_empty() {
            return None;
        }

        let min = self.heap.swap_remove(0);
        self.pos[min as usize] = SETTLED;
        if !self.heap.is_empty() {
            self.pos[self.heap[0] as usize] = 0;
            self.sift_down(0);
        }
        Some((min, self.dist[min as usize]))
    }

    /// `true` if column `a` orders before column `b`.
    fn before(&self, a: u32, b: u32) -> bool {
        let (da, db) = (self.dist[a as usize], self.dist[b as usize]);
        da < db || (!(db < da) && a < b)
    }

    fn sift_up(&mut self, mut cur: usize) {
        while cur > 0 {
            let parent = (cur - 1) / 2;
            if !self.before(self.heap[cur], self.heap[parent]) {
                break;
            }
            self.heap.swap(cur, parent);
            self.pos[self.heap[cur] as usize] = cur as u32;
            self.pos[self.heap[parent] as usize] = parent as u32;
            cur = parent;
        }
    }

    fn sift_down(&mut self, mut cur: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * cur + 1;
            let right = left + 1;
            let mut next = cur;
            if left < n && self.before(self.heap[left], self.heap[next]) {
                next = left;
            }
            if right < n && self.before(self.heap[right], self.heap[next]) {
                next = right;
            }
            if next == cur {
                break;
            }
            self.heap.swap(cur, next);
            self.pos[self.heap[cur] as usize] = cur as u32;
            self.pos[self.heap[next] as usize] = next as u32;
            cur = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnHeap;

    #[test]
    fn test_pop_order() {
        let mut heap = ColumnHeap::new(5);
        assert!(heap.relax(3, 2.0));
        assert!(heap.relax(0, 5.0));
        assert!(heap.relax(4, 1.0));
        assert!(heap.relax(1, 3.0));

        assert_eq!(heap.pop_min(), Some((4, 1.0)));
        assert_eq!(heap.pop_min(), Some((3, 2.0)));
        assert_eq!(heap.pop_min(), Some((1, 3.0)));
        assert_eq!(heap.pop_min(), Some((0, 5.0)));
        assert_eq!(heap.pop_min(), None);
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = ColumnHeap::new(3);
        heap.relax(0, 4.0);
        heap.relax(1, 2.0);
        assert!(!heap.relax(0, 6.0)); // not an improvement
        assert!(heap.relax(0, 1.0));
        assert_eq!(heap.distance(0), 1.0);
        assert_eq!(heap.pop_min(), Some((0, 1.0)));
        assert!(heap.is_settled(0));
        assert!(!heap.relax(0, 0.5)); // settled columns stay settled
        assert_eq!(heap.pop_min(), Some((1, 2.0)));
    }

    #[test]
    fn test_ties_pop_smallest_column_first() {
        let mut heap = ColumnHeap::new(4);
        heap.relax(2, 1.0);
        heap.relax(0, 1.0);
        heap.relax(3, 1.0);
        heap.relax(1, 1.0);
        let order: Vec<u32> = std::iter::from_fn(|| heap.pop_min().map(|(c, _)| c)).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut heap = ColumnHeap::<f64>::new(2);
        heap.relax(0, 1.0);
        heap.pop_min();
        heap.clear();
        assert!(!heap.is_settled(0));
        assert!(heap.distance(0).is_infinite());
        assert!(heap.relax(0, 3.0));
        assert_eq!(heap.pop_min(), Some((0, 3.0)));
    }
}
