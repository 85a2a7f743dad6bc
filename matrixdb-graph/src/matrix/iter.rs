//! Column-major iteration over the non-zeros of a sparse matrix.

use std::iter::FusedIterator;

use super::MatrixView;

/// Iterator over the `(row, col)` positions of a matrix view's non-zeros.
///
/// Non-zeros come out column by column, rows ascending within a column. The
/// iterator holds only cursor state and a borrowed view; [`reuse`](Self::reuse)
/// rebinds it to another view without reallocating, which the path search
/// relies on to keep one iterator per hop depth.
#[derive(Debug, Clone)]
pub struct TuplesIter<'a> {
    view: MatrixView<'a>,
    /// Number of non-zeros in the bound view.
    nvals: usize,
    /// Number of non-zeros emitted so far.
    nnz_idx: usize,
    /// Column currently being walked. Never moves backwards until reset.
    col_idx: usize,
    /// Position inside the current column.
    p: usize,
}

impl<'a> TuplesIter<'a> {
    /// Creates an iterator positioned at the first non-zero of `view`.
    #[must_use]
    pub fn new(view: MatrixView<'a>) -> Self {
        Self { view, nvals: view.nvals(), nnz_idx: 0, col_idx: 0, p: 0 }
    }

    /// Rewinds to the first non-zero of the bound view.
    pub fn reset(&mut self) {
        self.nnz_idx = 0;
        self.col_idx = 0;
        self.p = 0;
    }

    /// Rebinds the iterator to `view` and rewinds it.
    pub fn reuse(&mut self, view: MatrixView<'a>) {
        self.view = view;
        self.nvals = view.nvals();
        self.reset();
    }

    /// Number of non-zeros in the bound view.
    #[must_use]
    pub const fn nvals(&self) -> usize {
        self.nvals
    }

    /// Number of non-zeros emitted since the last reset.
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.nnz_idx
    }

    /// Returns true once every non-zero has been emitted.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.nnz_idx >= self.nvals
    }
}

impl Iterator for TuplesIter<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_depleted() {
            return None;
        }

        let row = self.view.row_at(self.nnz_idx);

        // Advance to the column holding the current non-zero. Empty columns
        // are skipped once, so a full pass is O(nvals + ncols).
        let ncols = self.view.ncols();
        let mut col = None;
        let mut j = self.col_idx;
        while j < ncols {
            if self.p + self.view.col_start(j) < self.view.col_start(j + 1) {
                self.p += 1;
                col = Some(j);
                break;
            }
            self.p = 0;
            j += 1;
        }

        self.col_idx = j;
        self.nnz_idx += 1;

        debug_assert!(col.is_some(), "column offsets do not account for non-zero {}", self.nnz_idx);
        col.map(|j| (row, self.view.first_col() + j))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.nvals.saturating_sub(self.nnz_idx);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TuplesIter<'_> {}

impl FusedIterator for TuplesIter<'_> {}
