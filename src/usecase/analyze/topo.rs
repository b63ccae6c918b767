use crate::domain::graph::Graph;
use crate::domain::traits::Metrics;
use std::collections::VecDeque;

/// Kahn's algorithm. Zero in-degree nodes are queued in ascending id order,
/// so the result is reproducible for the same adjacency.
///
/// The input must be acyclic; on a cyclic graph the returned order is shorter
/// than `dag.node_count()`. Checking that is left to the caller.
pub fn kahn_order(dag: &Graph, metrics: &mut dyn Metrics) -> Vec<usize> {
    let mut indeg = dag.in_degrees();
    let mut queue: VecDeque<usize> = (0..dag.node_count()).filter(|&c| indeg[c] == 0).collect();
    let mut order = Vec::with_capacity(dag.node_count());

    metrics.start_timer();
    while let Some(u) = queue.pop_front() {
        order.push(u);
        metrics.increment("kahn_pops");
        for e in dag.out_edges(u) {
            indeg[e.v] -= 1;
            metrics.increment("kahn_edge_relax");
            if indeg[e.v] == 0 {
                queue.push_back(e.v);
                metrics.increment("kahn_pushes");
            }
        }
    }
    metrics.stop_timer();

    order
}
