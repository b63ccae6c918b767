use crate::domain::error::GraphError;
use crate::domain::graph::{Condensation, Edge, Graph, SccResult};
use crate::domain::traits::Metrics;
use std::collections::BTreeMap;

/// Collapses every component of `scc` into a single node.
///
/// Edges inside a component are absorbed. For each ordered pair of distinct
/// components only the minimum crossing weight survives; ties keep the first
/// edge seen. The result is acyclic because the components are maximal.
pub fn build_condensation(
    graph: &Graph,
    scc: &SccResult,
    metrics: &mut dyn Metrics,
) -> Result<Condensation, GraphError> {
    let n = graph.node_count();
    let mut component_of = vec![usize::MAX; n];
    for (cid, comp) in scc.components.iter().enumerate() {
        for &v in comp {
            component_of[v] = cid;
        }
    }
    if let Some(v) = component_of.iter().position(|&c| c == usize::MAX) {
        return Err(GraphError::UnassignedVertex(v));
    }

    metrics.start_timer();
    let mut min_weight: BTreeMap<(usize, usize), i64> = BTreeMap::new();
    let mut intra_edges_dropped = 0;
    let mut parallel_edges_merged = 0;

    for e in graph.edges() {
        metrics.increment("condense_edge_scanned");
        let cu = component_of[e.u];
        let cv = component_of[e.v];
        if cu == cv {
            intra_edges_dropped += 1;
            continue;
        }
        match min_weight.get_mut(&(cu, cv)) {
            Some(w) => {
                parallel_edges_merged += 1;
                if e.w < *w {
                    *w = e.w;
                }
            }
            None => {
                metrics.increment("condense_edge_kept");
                min_weight.insert((cu, cv), e.w);
            }
        }
    }
    metrics.stop_timer();

    let edges: Vec<Edge> = min_weight
        .into_iter()
        .map(|((cu, cv), w)| Edge::new(cu, cv, w))
        .collect();
    let dag = Graph::new(scc.components.len(), edges)?;

    Ok(Condensation {
        dag,
        component_of,
        components: scc.components.clone(),
        intra_edges_dropped,
        parallel_edges_merged,
    })
}
