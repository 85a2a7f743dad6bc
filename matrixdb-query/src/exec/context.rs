//! Execution context for query execution.
//!
//! The execution context provides access to graph storage, cancellation,
//! statistics, and runtime configuration.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use matrixdb_graph::traversal::PathMode;
use serde::{Deserialize, Serialize};

use super::graph_accessor::{GraphAccessor, NullGraphAccessor};

/// Execution context for a query.
///
/// The context provides access to:
/// - Graph storage, shared read-only with other queries
/// - Cancellation support
/// - Execution statistics
/// - Runtime configuration
pub struct ExecutionContext {
    /// Cancellation flag, shareable with other threads.
    cancel: CancellationToken,
    /// Execution statistics.
    stats: ExecutionStats,
    /// Configuration options.
    config: ExecutionConfig,
    /// Graph accessor for traversal operators.
    graph: Arc<dyn GraphAccessor>,
}

impl ExecutionContext {
    /// Creates a new execution context without graph storage.
    ///
    /// Use [`with_graph`](Self::with_graph) to add graph storage access.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            stats: ExecutionStats::new(),
            config: ExecutionConfig::default(),
            graph: Arc::new(NullGraphAccessor),
        }
    }

    /// Sets the graph accessor for traversal operators.
    #[must_use]
    pub fn with_graph(mut self, graph: Arc<dyn GraphAccessor>) -> Self {
        self.graph = graph;
        self
    }

    /// Returns a reference to the graph accessor.
    #[inline]
    #[must_use]
    pub fn graph(&self) -> &dyn GraphAccessor {
        self.graph.as_ref()
    }

    /// Returns the graph accessor as an Arc.
    #[inline]
    #[must_use]
    pub fn graph_arc(&self) -> Arc<dyn GraphAccessor> {
        Arc::clone(&self.graph)
    }

    /// Sets the execution configuration.
    #[must_use]
    pub fn with_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Returns mutable configuration.
    pub fn config_mut(&mut self) -> &mut ExecutionConfig {
        &mut self.config
    }

    /// Cancels the query execution.
    #[inline]
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Checks if the query has been cancelled.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Returns a token that cancels this query from another thread.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns the execution statistics.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    /// Records that rows were produced.
    #[inline]
    pub fn record_rows_produced(&self, count: u64) {
        self.stats.rows_produced.fetch_add(count, Ordering::Relaxed);
    }

    /// Records that the plan was reset.
    #[inline]
    pub fn record_reset(&self) {
        self.stats.resets.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("cancel", &self.cancel)
            .field("stats", &self.stats)
            .field("config", &self.config)
            .field("graph", &"<GraphAccessor>")
            .finish()
    }
}

/// Execution statistics collected during query execution.
#[derive(Debug)]
pub struct ExecutionStats {
    /// When execution started.
    start_time: Instant,
    /// Number of rows produced by the query.
    rows_produced: AtomicU64,
    /// Number of times the plan was reset.
    resets: AtomicU64,
}

impl ExecutionStats {
    /// Creates new execution statistics.
    #[must_use]
    pub fn new() -> Self {
        Self { start_time: Instant::now(), rows_produced: AtomicU64::new(0), resets: AtomicU64::new(0) }
    }

    /// Returns the number of rows produced.
    #[inline]
    #[must_use]
    pub fn rows_produced(&self) -> u64 {
        self.rows_produced.load(Ordering::Relaxed)
    }

    /// Returns the number of plan resets.
    #[inline]
    #[must_use]
    pub fn resets(&self) -> u64 {
        self.resets.load(Ordering::Relaxed)
    }

    /// Returns the elapsed execution time.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

impl Default for ExecutionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Default initial capacity of a traversal operator's path batch.
pub const DEFAULT_PATH_BATCH_CAPACITY: usize = 32;

/// Configuration options for query execution.
///
/// Deserializes from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Initial capacity of each traversal operator's path batch. The batch
    /// grows past it when a search finds more paths.
    pub path_batch_capacity: usize,
    /// Revisit policy for variable-length traversal.
    pub path_mode: PathMode,
    /// Whether to log a statistics summary when a query completes.
    pub collect_stats: bool,
}

impl ExecutionConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            path_batch_capacity: DEFAULT_PATH_BATCH_CAPACITY,
            path_mode: PathMode::Trail,
            collect_stats: false,
        }
    }

    /// Sets the initial path batch capacity.
    #[must_use]
    pub const fn with_path_batch_capacity(mut self, capacity: usize) -> Self {
        self.path_batch_capacity = capacity;
        self
    }

    /// Sets the revisit policy for variable-length traversal.
    #[must_use]
    pub const fn with_path_mode(mut self, mode: PathMode) -> Self {
        self.path_mode = mode;
        self
    }

    /// Enables statistics collection.
    #[must_use]
    pub const fn with_stats(mut self) -> Self {
        self.collect_stats = true;
        self
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A handle for cancelling query execution.
///
/// Can be shared between threads to allow cancellation from outside
/// the query execution thread.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self { cancelled: Arc::new(AtomicBool::new(false)) }
    }

    /// Cancels the associated query.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Checks if cancellation was requested.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_cancellation() {
        let ctx = ExecutionContext::new();
        assert!(!ctx.is_cancelled());
        let token = ctx.cancellation_token();
        token.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn context_stats() {
        let ctx = ExecutionContext::new();
        ctx.record_rows_produced(3);
        ctx.record_rows_produced(2);
        ctx.record_reset();
        assert_eq!(ctx.stats().rows_produced(), 5);
        assert_eq!(ctx.stats().resets(), 1);
    }

    #[test]
    fn config_builder() {
        let config = ExecutionConfig::new()
            .with_path_batch_capacity(8)
            .with_path_mode(PathMode::Simple)
            .with_stats();
        assert_eq!(config.path_batch_capacity, 8);
        assert_eq!(config.path_mode, PathMode::Simple);
        assert!(config.collect_stats);
        assert_eq!(ExecutionConfig::default().path_batch_capacity, DEFAULT_PATH_BATCH_CAPACITY);
    }

    #[test]
    fn config_from_partial_json() {
        let config: ExecutionConfig =
            serde_json::from_str(r#"{"path_mode": "walk"}"#).expect("valid config");
        assert_eq!(config.path_mode, PathMode::Walk);
        assert_eq!(config.path_batch_capacity, DEFAULT_PATH_BATCH_CAPACITY);
        assert!(!config.collect_stats);
    }

    #[test]
    fn cancellation_token() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());

        let token2 = token.clone();
        token.cancel();

        assert!(token.is_cancelled());
        assert!(token2.is_cancelled());
    }
}
