//! Property tests for the traversal operator's fan-out.
//!
//! For random graphs, hop ranges and path modes, the rows the operator
//! yields per source row must match the paths the graph search finds from
//! that source.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;

use matrixdb_core::{Node, NodeId, RelationId};
use matrixdb_graph::{Direction, Graph, GraphBuilder, HopRange, PathMode};
use matrixdb_query::exec::operators::{CondVarLenTraverseOp, ValuesOp};
use matrixdb_query::{AlgebraicExpression, ExecutionConfig, ExecutionContext, Executor};

/// A graph with `n` nodes and the given `R` edges.
fn build_graph(n: usize, edges: &[(usize, usize)]) -> (Arc<Graph>, RelationId) {
    let mut builder = GraphBuilder::new();
    let ids: Vec<NodeId> = (0..n).map(|_| builder.add_node(Node::new)).collect();
    let r = builder.add_relation("R").expect("relation registers");
    for &(src, dest) in edges {
        builder.add_edge(ids[src], ids[dest], r).expect("endpoints exist");
    }
    (Arc::new(builder.build().expect("graph builds")), r)
}

/// Strategy for `(n, edges)` with every endpoint below `n`.
fn arb_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..6).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..12)))
}

/// Hop ranges with `min` in `0..3`; walks stay short so cycles stay cheap.
fn arb_hops_and_mode() -> impl Strategy<Value = (HopRange, PathMode)> {
    let mode = prop_oneof![Just(PathMode::Walk), Just(PathMode::Trail), Just(PathMode::Simple)];
    (0usize..3, 0usize..3, mode).prop_map(|(min, extra, mode)| {
        (HopRange::new(min, min + extra).expect("min <= max"), mode)
    })
}

/// Destination counts per source, as `(source, destination) -> rows`.
type FanOut = BTreeMap<(NodeId, NodeId), usize>;

fn operator_fan_out(
    graph: &Arc<Graph>,
    relation: RelationId,
    transpose: bool,
    hops: HopRange,
    mode: PathMode,
) -> FanOut {
    let sources = (0..graph.node_count()).map(|i| NodeId::new(i as u64));
    let child = ValuesOp::node_ids("a", sources);
    let expr = AlgebraicExpression::single("a", relation, transpose, "b");
    let config = ExecutionConfig::new().with_path_mode(mode).with_path_batch_capacity(1);
    let op = CondVarLenTraverseOp::new(&expr, hops, graph.clone(), Box::new(child))
        .unwrap()
        .with_config(&config);

    let mut executor = Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph.clone()));
    let result = executor.execute().unwrap();
    let mut fan_out = FanOut::new();
    for pair in result.node_ids("a").into_iter().zip(result.node_ids("b")) {
        *fan_out.entry(pair).or_default() += 1;
    }
    fan_out
}

fn search_fan_out(
    graph: &Graph,
    relation: RelationId,
    direction: Direction,
    hops: HopRange,
    mode: PathMode,
) -> FanOut {
    let mut fan_out = FanOut::new();
    for i in 0..graph.node_count() {
        let source = NodeId::new(i as u64);
        let paths = graph.all_paths_with_mode(source, relation, direction, hops, mode).unwrap();
        for path in paths {
            let dest = path.destination().expect("paths are never empty");
            *fan_out.entry((source, dest)).or_default() += 1;
        }
    }
    fan_out
}

proptest! {
    #[test]
    fn rows_per_source_match_search(
        (n, edges) in arb_edges(),
        (hops, mode) in arb_hops_and_mode(),
        transpose in any::<bool>(),
    ) {
        let (graph, r) = build_graph(n, &edges);
        let direction = Direction::from_transpose(transpose);

        let rows = operator_fan_out(&graph, r, transpose, hops, mode);
        let expected = search_fan_out(&graph, r, direction, hops, mode);

        prop_assert_eq!(rows.values().sum::<usize>(), expected.values().sum::<usize>());
        prop_assert_eq!(rows, expected);
    }

    #[test]
    fn batch_capacity_does_not_change_rows(
        (n, edges) in arb_edges(),
        (hops, mode) in arb_hops_and_mode(),
        capacity in 1usize..64,
    ) {
        let (graph, r) = build_graph(n, &edges);
        let expr = AlgebraicExpression::single("a", r, false, "b");
        let count_with = |config: &ExecutionConfig| {
            let sources = (0..n).map(|i| NodeId::new(i as u64));
            let op = CondVarLenTraverseOp::new(
                &expr,
                hops,
                graph.clone(),
                Box::new(ValuesOp::node_ids("a", sources)),
            )
            .unwrap()
            .with_config(config);
            Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph.clone()))
                .count()
                .unwrap()
        };

        let base = ExecutionConfig::new().with_path_mode(mode);
        prop_assert_eq!(
            count_with(&base.with_path_batch_capacity(capacity)),
            count_with(&base.with_path_batch_capacity(1))
        );
    }
}
