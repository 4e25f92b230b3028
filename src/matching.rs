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

//! The partial assignment between rows and columns.
//!
//! The row→column and column→row vectors are two views of one relation.
//! All mutation goes through [`Matching::assign`] and the unassign
//! operations, which always update both directions together.

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Sentinel marking an unassigned row or column.
pub const UNASSIGNED: u32 = u32::MAX;

/// A partial one-to-one matching between rows and columns.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matching {
    row_to_col: Vec<u32>,
    col_to_row: Vec<u32>,
}

impl Matching {
    /// Create a matching with all rows and columns unassigned.
    pub fn new(num_rows: u32, num_cols: u32) -> Self {
        Matching {
            row_to_col: vec![UNASSIGNED; num_rows as usize],
            col_to_row: vec![UNASSIGNED; num_cols as usize],
        }
    }

    pub fn num_rows(&self) -> u32 {
        self.row_to_col.len() as u32
    }

    pub fn num_cols(&self) -> u32 {
        self.col_to_row.len() as u32
    }

    /// The column assigned to row `r`.
    pub fn col_of(&self, r: u32) -> Option<u32> {
        match self.row_to_col[r as usize] {
            UNASSIGNED => None,
            c => Some(c),
        }
    }

    /// The row assigned to column `c`.
    pub fn row_of(&self, c: u32) -> Option<u32> {
        match self.col_to_row[c as usize] {
            UNASSIGNED => None,
            r => Some(r),
        }
    }

    pub fn is_row_free(&self, r: u32) -> bool {
        self.row_to_col[r as usize] == UNASSIGNED
    }

    pub fn is_col_free(&self, c: u32) -> bool {
        self.col_to_row[c as usize] == UNASSIGNED
    }

    /// Assign row `r` to column `c`.
    ///
    /// Previous partners of either side are unassigned first, so the two
    /// vectors stay mutually consistent.
    pub fn assign(&mut self, r: u32, c: u32) {
        self.unassign_row(r);
        self.unassign_col(c);
        self.row_to_col[r as usize] = c;
        self.col_to_row[c as usize] = r;
    }

    /// Remove the assignment of row `r`, if any.
    pub fn unassign_row(&mut self, r: u32) {
        let c = self.row_to_col[r as usize];
        if c != UNASSIGNED {
            self.row_to_col[r as usize] = UNASSIGNED;
            self.col_to_row[c as usize] = UNASSIGNED;
        }
    }

    /// Remove the assignment of column `c`, if any.
    pub fn unassign_col(&mut self, c: u32) {
        let r = self.col_to_row[c as usize];
        if r != UNASSIGNED {
            self.col_to_row[c as usize] = UNASSIGNED;
            self.row_to_col[r as usize] = UNASSIGNED;
        }
    }

    /// Unassign all rows and columns.
    pub fn clear(&mut self) {
        for x in &mut self.row_to_col {
            *x = UNASSIGNED;
        }
        for y in &mut self.col_to_row {
            *y = UNASSIGNED;
        }
    }

    /// Number of assigned rows.
    pub fn len(&self) -> usize {
        self.row_to_col.iter().filter(|&&c| c != UNASSIGNED).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The row→column vector with `UNASSIGNED` sentinels.
    pub fn row_to_col(&self) -> &[u32] {
        &self.row_to_col
    }

    /// The column→row vector with `UNASSIGNED` sentinels.
    pub fn col_to_row(&self) -> &[u32] {
        &self.col_to_row
    }

    /// Consume the matching and return the two assignment vectors.
    pub fn into_vectors(self) -> (Vec<u32>, Vec<u32>) {
        (self.row_to_col, self.col_to_row)
    }
}
