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

//! The shortest augmenting path engine.
//!
//! For a free row a Dijkstra-like search runs over the columns, with the
//! distance to a column accumulated along the alternating path of
//! reduced costs. All reduced costs are non-negative by the dual
//! feasibility invariant, so the search settles columns in distance
//! order. When a free column is settled the search stops, the column
//! potentials of all settled columns are corrected and the assignment is
//! flipped along the path.

use crate::costs::SparseCosts;
use crate::heap::ColumnHeap;
use crate::matching::Matching;
use crate::num::traits::{Float, NumAssign};

/// Search state reused across the augmentations of one solve.
pub struct AugmentEngine<F> {
    heap: ColumnHeap<F>,
    /// Predecessor row of each column on the shortest alternating path.
    pred: Vec<u32>,
}

impl<F> AugmentEngine<F>
where
    F: Float + NumAssign,
{
    pub fn new(num_cols: u32) -> Self {
        AugmentEngine {
            heap: ColumnHeap::new(num_cols),
            pred: vec![0; num_cols as usize],
        }
    }

    /// Augment the matching along a shortest path from the free row `r0`.
    ///
    /// On success the path is flipped (assigning `r0` and re-assigning
    /// every other row on the path) and the column duals of the settled
    /// columns are updated. Returns `false` if no free column is
    /// reachable; the matching and the duals are left untouched in that
    /// case.
    pub fn augment(&mut self, costs: &SparseCosts<F>, matching: &mut Matching, v: &mut [F], r0: u32) -> bool {
        let heap = &mut self.heap;
        heap.clear();

        let (cols, ws) = costs.row(r0);
        for (&c, &w) in cols.iter().zip(ws) {
            if heap.relax(c, w - v[c as usize]) {
                self.pred[c as usize] = r0;
            }
        }

        let mut sink = None;
        while let Some((j, dj)) = heap.pop_min() {
            let i = match matching.row_of(j) {
                None => {
                    sink = Some((j, dj));
                    break;
                }
                Some(i) => i,
            };

            // distance at which row i is entered over its matched edge
            let (cols, ws) = costs.row(i);
            let mut base = F::infinity();
            for (&c, &w) in cols.iter().zip(ws) {
                if c == j {
                    base = dj - (w - v[c as usize]);
                    break;
                }
            }

            for (&c, &w) in cols.iter().zip(ws) {
                if c != j && heap.relax(c, base + w - v[c as usize]) {
                    self.pred[c as usize] = i;
                }
            }
        }

        let (sink, mind) = match sink {
            Some(s) => s,
            None => return false,
        };

        // correct the potentials of all settled columns; the sink itself
        // contributes zero
        for c in 0..costs.num_cols() {
            if heap.is_settled(c) {
                v[c as usize] += heap.distance(c) - mind;
            }
        }

        // flip the alternating path back to r0
        let mut j = sink;
        loop {
            let i = self.pred[j as usize];
            let prev = matching.col_of(i);
            matching.assign(i, j);
            match prev {
                Some(next) => j = next,
                None => break, // reached the free row that started the search
            }
        }

        true
    }
}
