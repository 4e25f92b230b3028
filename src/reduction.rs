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

//! The cheap reduction phases run before the augmenting path search.
//!
//! Column reduction builds an initial partial assignment and column
//! potentials, reduction transfer moves slack from column onto row
//! potentials, and augmenting row reduction resolves many of the
//! remaining free rows by local bidding. Every phase preserves dual
//! feasibility: `cost - u[r] - v[c] >= 0` for every stored entry.

use crate::costs::SparseCosts;
use crate::matching::{Matching, UNASSIGNED};
use crate::num::traits::{Float, NumAssign};

use std::collections::VecDeque;

/// Initial column reduction.
///
/// Sets `v[c]` to the minimum cost over all entries of column `c` and
/// tentatively assigns the earliest row achieving that minimum, unless
/// the row was already claimed by an earlier column.
pub fn column_reduction<F>(costs: &SparseCosts<F>, matching: &mut Matching, v: &mut [F])
where
    F: Float + NumAssign,
{
    let num_cols = costs.num_cols() as usize;
    let mut min_cost = vec![F::infinity(); num_cols];
    let mut min_row = vec![UNASSIGNED; num_cols];

    for r in 0..costs.num_rows() {
        let (cols, ws) = costs.row(r);
        for (&c, &w) in cols.iter().zip(ws) {
            // strict comparison keeps the earliest row on ties
            if w < min_cost[c as usize] {
                min_cost[c as usize] = w;
                min_row[c as usize] = r;
            }
        }
    }

    for c in 0..num_cols {
        let r = min_row[c];
        if r == UNASSIGNED {
            continue; // column without entries
        }
        v[c] = min_cost[c];
        if matching.is_row_free(r) {
            matching.assign(r, c as u32);
        }
    }
}

/// Reduction transfer from assigned rows to their columns.
///
/// For every row in `rows` holding an assignment, the second-smallest
/// reduced cost `mu` becomes the row potential and the assigned column's
/// potential absorbs the difference, pushing tightness from the column
/// dual onto the row dual. Rows with a single entry are left untouched.
pub fn reduction_transfer<F>(costs: &SparseCosts<F>, matching: &Matching, rows: &[u32], u: &mut [F], v: &mut [F])
where
    F: Float + NumAssign,
{
    for &r in rows {
        let j1 = match matching.col_of(r) {
            Some(c) => c,
            None => continue,
        };
        let (cols, ws) = costs.row(r);
        let mut mu = F::infinity();
        for (&c, &w) in cols.iter().zip(ws) {
            if c != j1 {
                let red = w - v[c as usize];
                if red < mu {
                    mu = red;
                }
            }
        }
        if mu.is_finite() {
            v[j1 as usize] -= mu - u[r as usize];
            u[r as usize] = mu;
        }
    }
}

/// One pass of augmenting row reduction over the rows in `free`.
///
/// Every free row bids for the column with its smallest reduced cost
/// `cost - v[c]`. If that column is strictly better than the runner-up,
/// the row takes it, the bid gap is transferred to the column potential
/// and an evicted incumbent is re-examined immediately. On ties the
/// incumbent keeps its column and the bidding row falls back to the
/// runner-up column if free, otherwise it is left for the augmentation
/// engine. Ties never evict.
///
/// Every eviction re-queues a row, so the pass is bounded to two
/// examinations per row in `free`; when more columns are contested than
/// are reachable the bidding would otherwise cycle. Returns the rows
/// that are still free when the pass ends.
pub fn augmenting_row_reduction<F>(
    costs: &SparseCosts<F>,
    matching: &mut Matching,
    v: &mut [F],
    free: &[u32],
) -> Vec<u32>
where
    F: Float + NumAssign,
{
    let mut work: VecDeque<u32> = free.iter().copied().collect();
    let mut leftover = Vec::new();
    let mut budget = 2 * free.len();

    while budget > 0 {
        let r = match work.pop_front() {
            Some(r) => r,
            None => break,
        };
        budget -= 1;
        let (cols, ws) = costs.row(r);

        // smallest and second-smallest reduced cost; earliest column on ties
        let mut j1 = UNASSIGNED;
        let mut u1 = F::infinity();
        let mut j2 = UNASSIGNED;
        let mut u2 = F::infinity();
        for (&c, &w) in cols.iter().zip(ws) {
            let red = w - v[c as usize];
            if red < u1 {
                j2 = j1;
                u2 = u1;
                j1 = c;
                u1 = red;
            } else if red < u2 {
                j2 = c;
                u2 = red;
            }
        }

        if u1 < u2 {
            if u2.is_finite() {
                // the runner-up bounds how much slack the column can absorb
                v[j1 as usize] -= u2 - u1;
                if let Some(i1) = matching.row_of(j1) {
                    // evicted incumbent is re-examined immediately
                    work.push_front(i1);
                }
                matching.assign(r, j1);
            } else if matching.is_col_free(j1) {
                // single candidate column
                matching.assign(r, j1);
            } else {
                leftover.push(r);
            }
        } else if matching.is_col_free(j1) {
            matching.assign(r, j1);
        } else if j2 != UNASSIGNED && matching.is_col_free(j2) {
            matching.assign(r, j2);
        } else {
            leftover.push(r);
        }
    }

    leftover.extend(work);
    leftover
}
