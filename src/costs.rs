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

//! The sparse cost store.
//!
//! A problem instance consists of `R` rows, `C` columns and a list of
//! `(row, column, cost)` entries. A pair without an entry is forbidden
//! (implicit cost $\infty$). The entries are stored grouped by row in a
//! compressed form: one contiguous slice of `(column, cost)` pairs per
//! row, addressed by a start offset and a count.
//!
//! The store is validated eagerly on construction and immutable
//! afterwards.

use crate::num::traits::Float;

use std::error;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Error describing a malformed sparse cost instance.
///
/// All variants are detected during construction, before any algorithmic
/// work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An entry references a row outside `[0, num_rows)`.
    RowOutOfRange { row: u32 },
    /// An entry references a column outside `[0, num_cols)`.
    ColOutOfRange { row: u32, col: u32 },
    /// A row lists the same column twice.
    DuplicateColumn { row: u32, col: u32 },
    /// An entry has a NaN or infinite cost.
    NonFiniteCost { row: u32, col: u32 },
    /// A row has no entries at all and can therefore never be assigned.
    EmptyRow { row: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Error::RowOutOfRange { row } => write!(fmt, "row index {} out of range", row),
            Error::ColOutOfRange { row, col } => write!(fmt, "column index {} out of range in row {}", col, row),
            Error::DuplicateColumn { row, col } => write!(fmt, "duplicate column {} in row {}", col, row),
            Error::NonFiniteCost { row, col } => write!(fmt, "non-finite cost at ({}, {})", row, col),
            Error::EmptyRow { row } => write!(fmt, "row {} has no entries", row),
        }
    }
}

impl error::Error for Error {}

/// Sparse cost entries in compressed row-grouped form.
///
/// Rows are numbered `0..R-1`, columns `0..C-1`. Column indices within a
/// row keep the order in which they were supplied; they need not be
/// sorted but must be unique.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SparseCosts<F> {
    num_rows: u32,
    num_cols: u32,
    /// Offset of the first entry of each row in `cols`/`costs`.
    starts: Vec<u32>,
    /// Number of entries of each row.
    counts: Vec<u32>,
    cols: Vec<u32>,
    costs: Vec<F>,
}

impl<F> SparseCosts<F>
where
    F: Float,
{
    /// Build a cost store from a list of `(row, column, cost)` entries.
    ///
    /// The entries may be supplied in any order; within a row the
    /// supplied order is preserved. Fails if an index is out of range, a
    /// row lists a column twice, a cost is NaN or infinite, or a row has
    /// no entries.
    pub fn from_entries<I>(num_rows: u32, num_cols: u32, entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (u32, u32, F)>,
    {
        let entries: Vec<_> = entries.into_iter().collect();

        let mut counts = vec![0u32; num_rows as usize];
        for &(r, c, w) in &entries {
            if r >= num_rows {
                return Err(Error::RowOutOfRange { row: r });
            }
            if c >= num_cols {
                return Err(Error::ColOutOfRange { row: r, col: c });
            }
            if !w.is_finite() {
                return Err(Error::NonFiniteCost { row: r, col: c });
            }
            counts[r as usize] += 1;
        }

        let mut starts = vec![0u32; num_rows as usize];
        let mut offset = 0u32;
        for r in 0..num_rows as usize {
            if counts[r] == 0 {
                return Err(Error::EmptyRow { row: r as u32 });
            }
            starts[r] = offset;
            offset += counts[r];
        }

        // stable counting sort by row
        let mut cursor = starts.clone();
        let mut cols = vec![0u32; entries.len()];
        let mut costs = vec![F::zero(); entries.len()];
        for (r, c, w) in entries {
            let pos = cursor[r as usize] as usize;
            cols[pos] = c;
            costs[pos] = w;
            cursor[r as usize] += 1;
        }

        // `seen[c]` holds `r + 1` if column c has already appeared in row r.
        let mut seen = vec![0u32; num_cols as usize];
        for r in 0..num_rows {
            let (start, count) = (starts[r as usize] as usize, counts[r as usize] as usize);
            for &c in &cols[start..start + count] {
                if seen[c as usize] == r + 1 {
                    return Err(Error::DuplicateColumn { row: r, col: c });
                }
                seen[c as usize] = r + 1;
            }
        }

        Ok(SparseCosts {
            num_rows,
            num_cols,
            starts,
            counts,
            cols,
            costs,
        })
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    pub fn num_cols(&self) -> u32 {
        self.num_cols
    }

    /// Total number of stored entries.
    pub fn num_entries(&self) -> usize {
        self.cols.len()
    }

    /// Offset of the first entry of row `r`.
    pub fn start(&self, r: u32) -> u32 {
        self.starts[r as usize]
    }

    /// Number of entries of row `r`.
    pub fn count(&self, r: u32) -> u32 {
        self.counts[r as usize]
    }

    /// The `(columns, costs)` slices of row `r`.
    pub fn row(&self, r: u32) -> (&[u32], &[F]) {
        let start = self.starts[r as usize] as usize;
        let end = start + self.counts[r as usize] as usize;
        (&self.cols[start..end], &self.costs[start..end])
    }

    /// Cost of the pair `(r, c)`, or `None` if the pair is not listed.
    pub fn cost(&self, r: u32, c: u32) -> Option<F> {
        let (cols, costs) = self.row(r);
        cols.iter().position(|&k| k == c).map(|idx| costs[idx])
    }

    /// The transposed instance: rows become columns and vice versa.
    ///
    /// Columns of the original instance may be empty, so the result can
    /// contain rows without entries and skips the construction checks.
    pub(crate) fn transposed(&self) -> SparseCosts<F> {
        let mut counts = vec![0u32; self.num_cols as usize];
        for &c in &self.cols {
            counts[c as usize] += 1;
        }

        let mut starts = vec![0u32; self.num_cols as usize];
        let mut offset = 0u32;
        for (s, &n) in starts.iter_mut().zip(&counts) {
            *s = offset;
            offset += n;
        }

        let mut cursor = starts.clone();
        let mut cols = vec![0u32; self.cols.len()];
        let mut costs = vec![F::zero(); self.costs.len()];
        for r in 0..self.num_rows {
            let (rcols, rws) = self.row(r);
            for (&c, &w) in rcols.iter().zip(rws) {
                let pos = cursor[c as usize] as usize;
                cols[pos] = r;
                costs[pos] = w;
                cursor[c as usize] += 1;
            }
        }

        SparseCosts {
            num_rows: self.num_cols,
            num_cols: self.num_rows,
            starts,
            counts,
            cols,
            costs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, SparseCosts};

    #[test]
    fn test_row_grouping() {
        // entries interleaved across rows, per-row order preserved
        let costs = SparseCosts::from_entries(
            3,
            4,
            vec![
                (2u32, 1u32, 7.0),
                (0, 3, 1.0),
                (1, 0, 2.0),
                (0, 0, 5.0),
                (2, 3, 4.0),
            ],
        )
        .unwrap();

        assert_eq!(costs.num_rows(), 3);
        assert_eq!(costs.num_cols(), 4);
        assert_eq!(costs.num_entries(), 5);
        assert_eq!(costs.row(0), (&[3u32, 0][..], &[1.0, 5.0][..]));
        assert_eq!(costs.row(1), (&[0u32][..], &[2.0][..]));
        assert_eq!(costs.row(2), (&[1u32, 3][..], &[7.0, 4.0][..]));
        assert_eq!(costs.start(2), 3);
        assert_eq!(costs.count(0), 2);
        assert_eq!(costs.cost(0, 3), Some(1.0));
        assert_eq!(costs.cost(0, 1), None);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            SparseCosts::from_entries(2, 2, vec![(2u32, 0u32, 1.0), (0, 0, 1.0), (1, 1, 1.0)]),
            Err(Error::RowOutOfRange { row: 2 })
        );
        assert_eq!(
            SparseCosts::from_entries(2, 2, vec![(0u32, 2u32, 1.0), (1, 0, 1.0)]),
            Err(Error::ColOutOfRange { row: 0, col: 2 })
        );
        assert_eq!(
            SparseCosts::from_entries(2, 2, vec![(0u32, 0u32, 1.0), (1, 1, 2.0), (0, 0, 3.0)]),
            Err(Error::DuplicateColumn { row: 0, col: 0 })
        );
        assert_eq!(
            SparseCosts::from_entries(2, 2, vec![(0u32, 0u32, f64::NAN), (1, 1, 1.0)]),
            Err(Error::NonFiniteCost { row: 0, col: 0 })
        );
        assert_eq!(
            SparseCosts::from_entries(2, 2, vec![(0u32, 0u32, f64::INFINITY), (1, 1, 1.0)]),
            Err(Error::NonFiniteCost { row: 0, col: 0 })
        );
        assert_eq!(
            SparseCosts::from_entries(2, 2, vec![(0u32, 0u32, 1.0), (0, 1, 2.0)]),
            Err(Error::EmptyRow { row: 1 })
        );
    }

    #[test]
    fn test_transposed() {
        let costs = SparseCosts::from_entries(
            3,
            4,
            vec![
                (2u32, 1u32, 7.0),
                (0, 3, 1.0),
                (1, 0, 2.0),
                (0, 0, 5.0),
                (2, 3, 4.0),
            ],
        )
        .unwrap();
        let t = costs.transposed();

        assert_eq!(t.num_rows(), 4);
        assert_eq!(t.num_cols(), 3);
        assert_eq!(t.num_entries(), 5);
        assert_eq!(t.row(0), (&[0u32, 1][..], &[5.0, 2.0][..]));
        assert_eq!(t.row(1), (&[2u32][..], &[7.0][..]));
        // a column without entries turns into an empty row
        assert_eq!(t.row(2), (&[][..], &[][..]));
        assert_eq!(t.row(3), (&[0u32, 2][..], &[1.0, 4.0][..]));
    }

    #[test]
    fn test_duplicate_same_column_different_rows_ok() {
        let costs =
            SparseCosts::from_entries(2, 1, vec![(0u32, 0u32, 1.0), (1, 0, 2.0)]).unwrap();
        assert_eq!(costs.cost(0, 0), Some(1.0));
        assert_eq!(costs.cost(1, 0), Some(2.0));
    }

    #[cfg(feature = "serialize")]
    mod serialize {
        use super::super::SparseCosts;

        #[test]
        fn test_serde() {
            let costs: SparseCosts<f64> =
                SparseCosts::from_entries(2, 2, vec![(0, 0, 1.5), (0, 1, 2.0), (1, 1, 3.0)]).unwrap();

            let serialized = serde_json::to_string(&costs).unwrap();
            let other: SparseCosts<f64> = serde_json::from_str(&serialized).unwrap();

            assert_eq!(other.num_rows(), costs.num_rows());
            assert_eq!(other.num_cols(), costs.num_cols());
            for r in 0..costs.num_rows() {
                assert_eq!(other.row(r), costs.row(r));
            }
        }
    }
}
