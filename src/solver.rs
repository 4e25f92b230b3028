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

//! The solver driver running the phase pipeline.

use crate::augment::AugmentEngine;
use crate::costs::{Error, SparseCosts};
use crate::matching::{Matching, UNASSIGNED};
use crate::num::traits::{Float, NumAssign};
use crate::reduction::{augmenting_row_reduction, column_reduction, reduction_transfer};

/// A sparse Jonker-Volgenant assignment solver.
///
/// Borrows an immutable cost store and owns the mutable solve state:
/// the partial matching, the dual potentials and the search scratch
/// space. One instance can be reused for repeated solves of the same
/// instance; every [`solve`][SparseLap::solve] starts from a fresh
/// state.
pub struct SparseLap<'a, F> {
    costs: &'a SparseCosts<F>,

    matching: Matching,
    u: Vec<F>,
    v: Vec<F>,
    engine: AugmentEngine<F>,

    /// Number of augmenting row reduction passes before the path
    /// search; only square instances run this phase. The default of 2
    /// follows the classical algorithm, 0 disables the phase.
    pub row_reduction_passes: usize,

    naugment: usize,
}

impl<'a, F> SparseLap<'a, F>
where
    F: Float + NumAssign,
{
    pub fn new(costs: &'a SparseCosts<F>) -> Self {
        SparseLap {
            costs,
            matching: Matching::new(costs.num_rows(), costs.num_cols()),
            u: vec![F::zero(); costs.num_rows() as usize],
            v: vec![F::zero(); costs.num_cols() as usize],
            engine: AugmentEngine::new(costs.num_cols()),
            row_reduction_passes: 2,
            naugment: 0,
        }
    }

    /// Solve the instance.
    ///
    /// Square instances run the classical pipeline: column reduction,
    /// reduction transfer, augmenting row reduction and the shortest
    /// augmenting path search. Rectangular instances, and square ones
    /// where a row proves unassignable, are solved by plain successive
    /// shortest paths instead, transposed first when the rows outnumber
    /// the columns.
    ///
    /// Afterwards every row is either assigned or proven unassignable
    /// under the sparse connectivity, and the cost is minimal for the
    /// rows that are assigned.
    pub fn solve(&mut self) {
        self.matching.clear();
        for x in &mut self.u {
            *x = F::zero();
        }
        for y in &mut self.v {
            *y = F::zero();
        }
        self.naugment = 0;

        if self.costs.num_rows() > self.costs.num_cols() {
            self.solve_transposed();
        } else {
            let reduced = self.costs.num_rows() == self.costs.num_cols() && self.solve_reduced();
            if !reduced {
                // the reduction potentials certify optimality only for
                // a perfect matching; start over without them
                self.matching.clear();
                for y in &mut self.v {
                    *y = F::zero();
                }
                self.solve_plain();
            }
        }

        self.extract_row_duals();
    }

    /// The classical pipeline. Returns `false` as soon as a row proves
    /// unassignable.
    fn solve_reduced(&mut self) -> bool {
        let costs = self.costs;

        column_reduction(costs, &mut self.matching, &mut self.v);

        let assigned: Vec<u32> = (0..costs.num_rows()).filter(|&r| !self.matching.is_row_free(r)).collect();
        reduction_transfer(costs, &self.matching, &assigned, &mut self.u, &mut self.v);

        let mut free: Vec<u32> = (0..costs.num_rows()).filter(|&r| self.matching.is_row_free(r)).collect();
        for _ in 0..self.row_reduction_passes {
            if free.is_empty() {
                break;
            }
            free = augmenting_row_reduction(costs, &mut self.matching, &mut self.v, &free);
        }

        // rows that failed the cheap phases, in ascending order for
        // reproducible tie-breaking
        free.sort_unstable();
        for r in free {
            self.naugment += 1;
            if !self.engine.augment(costs, &mut self.matching, &mut self.v, r) {
                return false;
            }
        }
        true
    }

    /// Successive shortest paths from an empty matching.
    ///
    /// The column potentials start at zero and only ever decrease, and
    /// a free column is settled at most once (as the endpoint of a
    /// path), so columns that end up unmatched keep a potential of
    /// zero. That makes the matching cost-minimal for the rows it
    /// covers even when columns are left over.
    fn solve_plain(&mut self) {
        let costs = self.costs;
        for r in 0..costs.num_rows() {
            self.naugment += 1;
            self.engine.augment(costs, &mut self.matching, &mut self.v, r);
        }
    }

    /// More rows than columns: search on the transposed instance, so
    /// every column picks its best row instead of the first rows
    /// claiming all columns.
    fn solve_transposed(&mut self) {
        let costs = self.costs;
        let flipped = costs.transposed();

        let mut matching = Matching::new(costs.num_cols(), costs.num_rows());
        let mut vt = vec![F::zero(); costs.num_rows() as usize];
        let mut engine = AugmentEngine::new(costs.num_rows());
        for j in 0..costs.num_cols() {
            self.naugment += 1;
            engine.augment(&flipped, &mut matching, &mut vt, j);
        }

        for (j, &r) in matching.row_to_col().iter().enumerate() {
            if r != UNASSIGNED {
                self.matching.assign(r, j as u32);
            }
        }

        // the row potentials of the transposed instance become the
        // column potentials of the original one
        for j in 0..costs.num_cols() {
            let (rows, ws) = flipped.row(j);
            self.v[j as usize] = match matching.col_of(j) {
                Some(r) => {
                    let mut w_jr = F::zero();
                    for (&k, &w) in rows.iter().zip(ws) {
                        if k == r {
                            w_jr = w;
                            break;
                        }
                    }
                    w_jr - vt[r as usize]
                }
                None => {
                    let mut mu = F::infinity();
                    for (&k, &w) in rows.iter().zip(ws) {
                        let red = w - vt[k as usize];
                        if red < mu {
                            mu = red;
                        }
                    }
                    if mu.is_finite() {
                        mu
                    } else {
                        F::zero()
                    }
                }
            };
        }
    }

    /// Row duals: tight on assigned edges, the smallest reduced cost
    /// otherwise.
    fn extract_row_duals(&mut self) {
        let costs = self.costs;
        for r in 0..costs.num_rows() {
            let (cols, ws) = costs.row(r);
            self.u[r as usize] = match self.matching.col_of(r) {
                Some(c) => {
                    let mut w_rc = F::zero();
                    for (&k, &w) in cols.iter().zip(ws) {
                        if k == c {
                            w_rc = w;
                            break;
                        }
                    }
                    w_rc - self.v[c as usize]
                }
                None => {
                    let mut mu = F::infinity();
                    for (&k, &w) in cols.iter().zip(ws) {
                        let red = w - self.v[k as usize];
                        if red < mu {
                            mu = red;
                        }
                    }
                    mu
                }
            };
        }
    }

    /// Total cost of the current assignment.
    pub fn value(&self) -> F {
        let mut total = F::zero();
        for r in 0..self.costs.num_rows() {
            if let Some(c) = self.matching.col_of(r) {
                let (cols, ws) = self.costs.row(r);
                for (&k, &w) in cols.iter().zip(ws) {
                    if k == c {
                        total += w;
                        break;
                    }
                }
            }
        }
        total
    }

    /// Number of shortest path searches of the latest solve.
    pub fn num_augmentations(&self) -> usize {
        self.naugment
    }

    pub fn matching(&self) -> &Matching {
        &self.matching
    }

    /// Row→column assignment with `UNASSIGNED` sentinels.
    pub fn row_assignment(&self) -> &[u32] {
        self.matching.row_to_col()
    }

    /// Column→row assignment with `UNASSIGNED` sentinels.
    pub fn col_assignment(&self) -> &[u32] {
        self.matching.col_to_row()
    }

    pub fn row_duals(&self) -> &[F] {
        &self.u
    }

    pub fn col_duals(&self) -> &[F] {
        &self.v
    }
}

/// Solve a sparse assignment problem and return the assignment vectors.
///
/// Rows and columns that cannot be matched under the given connectivity
/// hold the [`UNASSIGNED`][crate::matching::UNASSIGNED] sentinel.
pub fn solve<F, I>(num_rows: u32, num_cols: u32, edges: I) -> Result<(Vec<u32>, Vec<u32>), Error>
where
    F: Float + NumAssign,
    I: IntoIterator<Item = (u32, u32, F)>,
{
    let (x, y, _, _) = solve_with_duals(num_rows, num_cols, edges)?;
    Ok((x, y))
}

/// Solve a sparse assignment problem and return the assignment vectors
/// together with the dual potentials certifying optimality.
pub fn solve_with_duals<F, I>(
    num_rows: u32,
    num_cols: u32,
    edges: I,
) -> Result<(Vec<u32>, Vec<u32>, Vec<F>, Vec<F>), Error>
where
    F: Float + NumAssign,
    I: IntoIterator<Item = (u32, u32, F)>,
{
    let costs = SparseCosts::from_entries(num_rows, num_cols, edges)?;
    let mut lap = SparseLap::new(&costs);
    lap.solve();

    let SparseLap { matching, u, v, .. } = lap;
    let (x, y) = matching.into_vectors();
    Ok((x, y, u, v))
}

#[cfg(test)]
mod tests {
    use super::{solve, solve_with_duals, SparseLap};
    use crate::costs::SparseCosts;
    use crate::matching::UNASSIGNED;

    #[test]
    fn test_worked_example() {
        let entries = vec![
            (0u32, 0u32, 5.0),
            (0, 1, 4.0),
            (0, 2, 1.0),
            (1, 0, 2.0),
            (1, 1, 6.0),
            (1, 2, 4.0),
            (2, 0, 4.0),
            (2, 1, 3.0),
            (2, 2, 7.0),
        ];
        let (x, y) = solve(3, 3, entries).unwrap();
        assert_eq!(x, vec![2, 0, 1]);
        assert_eq!(y, vec![1, 2, 0]);
    }

    #[test]
    fn test_duals_certify_optimality() {
        let entries: Vec<(u32, u32, f64)> = vec![
            (0u32, 0u32, 5.0),
            (0, 1, 4.0),
            (0, 2, 1.0),
            (1, 0, 2.0),
            (1, 1, 6.0),
            (1, 2, 4.0),
            (2, 0, 4.0),
            (2, 1, 3.0),
            (2, 2, 7.0),
        ];
        let (x, _, u, v) = solve_with_duals(3, 3, entries.clone()).unwrap();

        // feasibility on every edge, tight on assigned edges
        for &(r, c, w) in &entries {
            let red = w - u[r as usize] - v[c as usize];
            assert!(red >= -1e-9, "negative reduced cost at ({}, {})", r, c);
            if x[r as usize] == c {
                assert!(red.abs() < 1e-9);
            }
        }

        // the dual objective matches the assigned cost (total 6)
        let total: f64 = u.iter().chain(v.iter()).sum();
        assert!((total - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_unassignable_row() {
        // two rows compete for a single reachable column
        let entries = vec![(0u32, 0u32, 1.0), (1, 0, 2.0), (1, 1, 9.0)];
        let (x, y) = solve(2, 2, entries).unwrap();
        assert_eq!(x, vec![0, 1]);
        assert_eq!(y, vec![0, 1]);

        let entries = vec![(0u32, 0u32, 1.0), (1, 0, 2.0)];
        let (x, y) = solve(2, 2, entries).unwrap();
        assert_eq!(x[0], 0);
        assert_eq!(x[1], UNASSIGNED);
        assert_eq!(y, vec![0, UNASSIGNED]);
    }

    #[test]
    fn test_square_with_contested_columns() {
        // three rows reach only the first two columns, with strictly
        // improving bids that would keep evicting each other; one row
        // stays unassigned and the other two get the cheapest pairing
        let entries = vec![
            (0u32, 0u32, 0.0),
            (0, 1, 1.0),
            (1, 0, 0.0),
            (1, 1, 2.0),
            (2, 0, 0.0),
            (2, 1, 4.0),
        ];
        let (x, y) = solve(3, 3, entries).unwrap();
        assert_eq!(x, vec![1, 0, UNASSIGNED]);
        assert_eq!(y, vec![1, 0, UNASSIGNED]);
    }

    #[test]
    fn test_more_columns_prefers_free_columns() {
        // both rows have a zero-cost column of their own; taking the
        // greedy column minima instead would cost 3
        let c = [[3.0, 0.0, 2.0], [3.0, 2.0, 0.0]];
        let mut entries = Vec::new();
        for (r, row) in c.iter().enumerate() {
            for (j, &w) in row.iter().enumerate() {
                entries.push((r as u32, j as u32, w));
            }
        }
        let (x, y) = solve(2, 3, entries).unwrap();
        assert_eq!(x, vec![1, 2]);
        assert_eq!(y, vec![UNASSIGNED, 0, 1]);
    }

    #[test]
    fn test_more_rows_chooses_cheapest_rows() {
        // the expensive first row must lose out to the two rows with
        // zero-cost columns
        let entries = vec![
            (0u32, 0u32, 3.0),
            (0, 1, 3.0),
            (1, 0, 0.0),
            (1, 1, 2.0),
            (2, 0, 2.0),
            (2, 1, 0.0),
        ];
        let costs = SparseCosts::from_entries(3, 2, entries).unwrap();
        let mut lap = SparseLap::new(&costs);
        lap.solve();

        assert_eq!(lap.row_assignment(), &[UNASSIGNED, 0, 1]);
        assert_eq!(lap.col_assignment(), &[1, 2]);
        assert_eq!(lap.value(), 0.0);
    }
}
