//! Compressed-column sparse matrices.
//!
//! Each relation type in the graph is stored as a boolean adjacency matrix in
//! compressed sparse column (CSC) form:
//!
//! - `col_ptr` holds `ncols + 1` non-decreasing offsets, starting at 0
//! - `row_idx` holds the row index of every non-zero, column by column,
//!   ascending within each column
//!
//! The non-zeros of column `j` are `row_idx[col_ptr[j]..col_ptr[j + 1]]`.
//!
//! # Overview
//!
//! - [`SparseMatrix`] - Owned, validated CSC storage
//! - [`MatrixView`] - Borrowed window over a whole matrix or a single column
//! - [`TuplesIter`] - Column-major iterator over the non-zeros of a view

mod iter;

pub use iter::TuplesIter;

use crate::store::{GraphError, GraphResult};

/// A boolean sparse matrix in compressed-column form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix {
    nrows: usize,
    ncols: usize,
    /// Column start offsets, `ncols + 1` entries.
    col_ptr: Vec<usize>,
    /// Row index of each non-zero, grouped by column.
    row_idx: Vec<usize>,
}

impl SparseMatrix {
    /// Creates an empty `nrows x ncols` matrix.
    #[must_use]
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self { nrows, ncols, col_ptr: vec![0; ncols + 1], row_idx: Vec::new() }
    }

    /// Builds a matrix from `(row, col)` coordinates.
    ///
    /// Coordinates may arrive in any order; duplicates collapse into a single
    /// non-zero.
    pub fn from_tuples(
        nrows: usize,
        ncols: usize,
        tuples: impl IntoIterator<Item = (usize, usize)>,
    ) -> GraphResult<Self> {
        let mut tuples: Vec<(usize, usize)> = tuples.into_iter().collect();
        if let Some(&(row, col)) = tuples.iter().find(|&&(r, c)| r >= nrows || c >= ncols) {
            return Err(GraphError::IndexOutOfBounds { row, col, nrows, ncols });
        }

        tuples.sort_unstable_by_key(|&(row, col)| (col, row));
        tuples.dedup();

        let mut col_ptr = vec![0; ncols + 1];
        for &(_, col) in &tuples {
            col_ptr[col + 1] += 1;
        }
        for j in 0..ncols {
            col_ptr[j + 1] += col_ptr[j];
        }
        let row_idx = tuples.into_iter().map(|(row, _)| row).collect();

        Ok(Self { nrows, ncols, col_ptr, row_idx })
    }

    /// Builds a matrix from raw CSC arrays, validating every layout invariant.
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
    ) -> GraphResult<Self> {
        if col_ptr.len() != ncols + 1 {
            return Err(GraphError::MalformedMatrix(format!(
                "expected {} column offsets, got {}",
                ncols + 1,
                col_ptr.len()
            )));
        }
        if col_ptr[0] != 0 {
            return Err(GraphError::MalformedMatrix("first column offset must be 0".to_owned()));
        }
        if col_ptr[ncols] != row_idx.len() {
            return Err(GraphError::MalformedMatrix(format!(
                "final column offset {} does not match {} stored rows",
                col_ptr[ncols],
                row_idx.len()
            )));
        }
        for j in 0..ncols {
            let (start, end) = (col_ptr[j], col_ptr[j + 1]);
            if start > end || end > row_idx.len() {
                return Err(GraphError::MalformedMatrix(format!(
                    "column offsets out of order at column {j}"
                )));
            }
            let rows = &row_idx[start..end];
            if let Some(&row) = rows.iter().find(|&&row| row >= nrows) {
                return Err(GraphError::IndexOutOfBounds { row, col: j, nrows, ncols });
            }
            if rows.windows(2).any(|w| w[0] >= w[1]) {
                return Err(GraphError::MalformedMatrix(format!(
                    "rows of column {j} are not strictly ascending"
                )));
            }
        }

        Ok(Self { nrows, ncols, col_ptr, row_idx })
    }

    /// Number of rows.
    #[must_use]
    pub const fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[must_use]
    pub const fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored non-zeros.
    #[must_use]
    pub fn nvals(&self) -> usize {
        self.row_idx.len()
    }

    /// Row indices of the non-zeros in column `col`, or `None` if the column
    /// is out of range.
    #[must_use]
    pub fn column(&self, col: usize) -> Option<&[usize]> {
        let start = *self.col_ptr.get(col)?;
        let end = *self.col_ptr.get(col + 1)?;
        self.row_idx.get(start..end)
    }

    /// Returns true if `(row, col)` is a non-zero.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.column(col).is_some_and(|rows| rows.binary_search(&row).is_ok())
    }

    /// Returns the transpose as a new matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut col_ptr = vec![0; self.nrows + 1];
        for &row in &self.row_idx {
            col_ptr[row + 1] += 1;
        }
        for i in 0..self.nrows {
            col_ptr[i + 1] += col_ptr[i];
        }

        // Walking source columns in order keeps each target column ascending.
        let mut next = col_ptr.clone();
        let mut row_idx = vec![0; self.row_idx.len()];
        for col in 0..self.ncols {
            for &row in &self.row_idx[self.col_ptr[col]..self.col_ptr[col + 1]] {
                row_idx[next[row]] = col;
                next[row] += 1;
            }
        }

        Self { nrows: self.ncols, ncols: self.nrows, col_ptr, row_idx }
    }

    /// A view over the whole matrix.
    #[must_use]
    pub fn view(&self) -> MatrixView<'_> {
        MatrixView { nrows: self.nrows, first_col: 0, col_ptr: &self.col_ptr, row_idx: &self.row_idx }
    }

    /// A single-column view, or `None` if the column is out of range.
    #[must_use]
    pub fn column_view(&self, col: usize) -> Option<MatrixView<'_>> {
        let col_ptr = self.col_ptr.get(col..col + 2)?;
        let row_idx = self.row_idx.get(col_ptr[0]..col_ptr[1])?;
        Some(MatrixView { nrows: self.nrows, first_col: col, col_ptr, row_idx })
    }

    /// Iterates every non-zero of the matrix in column-major order.
    #[must_use]
    pub fn iter(&self) -> TuplesIter<'_> {
        TuplesIter::new(self.view())
    }
}

/// A borrowed, read-only window over a contiguous range of columns.
///
/// Column offsets are rebased so that the first column of the window starts
/// at zero, which lets a single column of a large matrix be walked exactly
/// like a standalone matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixView<'a> {
    nrows: usize,
    /// Absolute index of the window's first column.
    first_col: usize,
    /// `ncols + 1` offsets, absolute within the parent matrix.
    col_ptr: &'a [usize],
    /// The window's non-zeros, already sliced to the window.
    row_idx: &'a [usize],
}

impl<'a> MatrixView<'a> {
    /// A view with no columns and no non-zeros.
    #[must_use]
    pub const fn empty() -> Self {
        Self { nrows: 0, first_col: 0, col_ptr: &[0], row_idx: &[] }
    }

    /// Number of rows of the underlying matrix.
    #[must_use]
    pub const fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns in the window.
    #[must_use]
    pub const fn ncols(&self) -> usize {
        self.col_ptr.len() - 1
    }

    /// Number of non-zeros in the window.
    #[must_use]
    pub const fn nvals(&self) -> usize {
        self.row_idx.len()
    }

    /// Absolute index of the window's first column.
    #[must_use]
    pub const fn first_col(&self) -> usize {
        self.first_col
    }

    /// Offset of window column `j` relative to the window's first non-zero.
    #[inline]
    pub(crate) fn col_start(&self, j: usize) -> usize {
        self.col_ptr[j] - self.col_ptr[0]
    }

    /// Row index of the `k`-th non-zero of the window.
    #[inline]
    pub(crate) fn row_at(&self, k: usize) -> usize {
        self.row_idx[k]
    }

    /// Iterates the window's non-zeros.
    #[must_use]
    pub fn iter(self) -> TuplesIter<'a> {
        TuplesIter::new(self)
    }
}

impl Default for MatrixView<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
