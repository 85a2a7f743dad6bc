//! Bounded-hop enumeration of all paths from a single source.

use matrixdb_core::{Edge, NodeId, RelationId};

use super::{Direction, HopRange, PathMode};
use crate::matrix::{SparseMatrix, TuplesIter};
use crate::path::Path;
use crate::store::{GraphError, GraphResult};

/// Enumerates every path from a source vertex whose length lies in a
/// [`HopRange`].
///
/// The search is an iterative depth-first walk over the adjacency matrix of
/// one relation. Depth `d` keeps a [`TuplesIter`] over the column of the
/// vertex reached at hop `d - 1`; when the walk descends again at the same
/// depth the iterator is rebound with [`TuplesIter::reuse`] rather than
/// rebuilt, so a search allocates one iterator per depth reached however
/// many vertices it visits.
///
/// Paths are reported in walk orientation (see [`Path`]). Zero-length paths
/// are never produced, even when the range admits zero hops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllPaths {
    relation: RelationId,
    direction: Direction,
    hops: HopRange,
    mode: PathMode,
}

impl AllPaths {
    /// Creates a search over `relation` in `direction`, with the default
    /// [`PathMode::Trail`] policy.
    #[must_use]
    pub fn new(relation: RelationId, direction: Direction, hops: HopRange) -> Self {
        Self { relation, direction, hops, mode: PathMode::default() }
    }

    /// Sets the revisit policy.
    #[must_use]
    pub const fn with_mode(mut self, mode: PathMode) -> Self {
        self.mode = mode;
        self
    }

    /// The relation being walked.
    #[must_use]
    pub const fn relation(&self) -> RelationId {
        self.relation
    }

    /// The traversal direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// The hop bounds.
    #[must_use]
    pub const fn hops(&self) -> HopRange {
        self.hops
    }

    /// The revisit policy.
    #[must_use]
    pub const fn mode(&self) -> PathMode {
        self.mode
    }

    /// Appends every path from `source` to `paths`, returning how many were
    /// added.
    ///
    /// `matrix` must be the square adjacency for this search's relation in
    /// its direction: column `v` lists the vertices one hop from `v`. The
    /// buffer may grow; callers must not hold references into it across a
    /// call.
    pub fn search(
        &self,
        matrix: &SparseMatrix,
        source: NodeId,
        paths: &mut Vec<Path>,
    ) -> GraphResult<usize> {
        if matrix.nrows() != matrix.ncols() {
            return Err(GraphError::DimensionMismatch {
                expected: matrix.ncols(),
                nrows: matrix.nrows(),
                ncols: matrix.ncols(),
            });
        }
        let root = matrix.column_view(source.index()).ok_or(GraphError::NodeNotFound(source))?;

        let max = self.hops.max();
        if max == 0 {
            return Ok(0);
        }

        // `max` may be unbounded. Scratch space starts at the vertex count and
        // grows for walks that revisit vertices.
        let depth_hint = max.min(matrix.ncols());
        let before = paths.len();
        let mut levels: Vec<TuplesIter<'_>> = Vec::with_capacity(depth_hint);
        levels.push(root.iter());
        let mut depth = 1;
        // Vertices of the current path, source first; `frontier[d - 1]` is
        // the vertex expanded at depth `d`.
        let mut frontier: Vec<NodeId> = Vec::with_capacity(depth_hint.saturating_add(1));
        frontier.push(source);
        let mut current = Path::with_capacity(depth_hint);
        let mut expanded = 0usize;

        while depth > 0 {
            let Some((row, _)) = levels[depth - 1].next() else {
                depth -= 1;
                frontier.pop();
                current.try_pop_tail();
                continue;
            };

            let from = frontier[depth - 1];
            let to = NodeId::from(row);
            let edge = Edge::new(from, to, self.relation);
            if !self.admits(&current, &frontier, &edge) {
                continue;
            }

            current.push(edge);
            if self.hops.contains(current.len()) {
                paths.push(current.clone());
            }

            if current.len() < max {
                let view = matrix.column_view(row).ok_or(GraphError::NodeNotFound(to))?;
                match levels.get_mut(depth) {
                    Some(level) => level.reuse(view),
                    None => levels.push(view.iter()),
                }
                depth += 1;
                frontier.push(to);
                expanded += 1;
            } else {
                current.try_pop_tail();
            }
        }

        let found = paths.len() - before;
        tracing::trace!(
            source = %source,
            relation = %self.relation,
            direction = ?self.direction,
            min_hops = self.hops.min(),
            max_hops = max,
            expanded,
            found,
            "path search complete"
        );
        Ok(found)
    }

    fn admits(&self, current: &Path, frontier: &[NodeId], edge: &Edge) -> bool {
        match self.mode {
            PathMode::Walk => true,
            PathMode::Trail => !current.contains_edge(edge),
            PathMode::Simple => !frontier.contains(&edge.dest),
        }
    }
}
