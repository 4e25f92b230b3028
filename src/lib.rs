// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! A sparse Jonker-Volgenant solver for the rectangular linear
//! assignment problem.
//!
//! Given rows, columns and a sparse list of finite `(row, column, cost)`
//! entries (pairs without an entry are forbidden), the solver finds a
//! one-to-one matching of minimum total cost. Rows or columns that
//! cannot be matched under the sparse connectivity are reported with the
//! [`UNASSIGNED`] sentinel.
//!
//! # Example
//!
//! ```
//! use sparse_lap::solve;
//!
//! // the dense 3x3 cost matrix [[5,4,1],[2,6,4],[4,3,7]]
//! let edges = vec![
//!     (0u32, 0u32, 5.0), (0, 1, 4.0), (0, 2, 1.0),
//!     (1, 0, 2.0), (1, 1, 6.0), (1, 2, 4.0),
//!     (2, 0, 4.0), (2, 1, 3.0), (2, 2, 7.0),
//! ];
//!
//! let (rows, cols) = solve(3, 3, edges).unwrap();
//! assert_eq!(rows, vec![2, 0, 1]); // total cost 1 + 2 + 3 = 6
//! assert_eq!(cols, vec![1, 2, 0]);
//! ```

mod num {
    pub use num_traits as traits;
}

pub mod costs;
pub use self::costs::{Error, SparseCosts};

pub mod matching;
pub use self::matching::{Matching, UNASSIGNED};

pub mod heap;

pub mod reduction;

pub mod augment;

pub mod solver;
pub use self::solver::{solve, solve_with_duals, SparseLap};
