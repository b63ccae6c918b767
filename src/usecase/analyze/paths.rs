use crate::domain::error::GraphError;
use crate::domain::graph::{Distance, Graph, Objective, PathResult};
use crate::domain::traits::Metrics;

/// Single-source shortest distances over a DAG.
///
/// `order` must be a topological order of `dag`. Components the source
/// cannot reach stay [`Distance::Unreached`].
pub fn shortest_from(
    dag: &Graph,
    order: &[usize],
    source: usize,
    metrics: &mut dyn Metrics,
) -> Result<PathResult, GraphError> {
    if source >= dag.node_count() {
        return Err(GraphError::SourceOutOfRange {
            vertex: i64::try_from(source).unwrap_or(i64::MAX),
            n: dag.node_count(),
        });
    }
    relax_in_order(dag, order, &[source], Objective::Shortest, metrics)
}

/// Longest (critical) path distances over a DAG, seeded at every
/// zero in-degree node.
pub fn longest_over(
    dag: &Graph,
    order: &[usize],
    metrics: &mut dyn Metrics,
) -> Result<PathResult, GraphError> {
    let seeds: Vec<usize> = dag
        .in_degrees()
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == 0)
        .map(|(c, _)| c)
        .collect();
    relax_in_order(dag, order, &seeds, Objective::Longest, metrics)
}

fn counter_names(objective: Objective) -> (&'static str, &'static str) {
    match objective {
        Objective::Shortest => ("dagsp_relax_attempt", "dagsp_relax_success"),
        Objective::Longest => ("daglong_relax_attempt", "daglong_relax_success"),
    }
}

fn relax_in_order(
    dag: &Graph,
    order: &[usize],
    seeds: &[usize],
    objective: Objective,
    metrics: &mut dyn Metrics,
) -> Result<PathResult, GraphError> {
    let n = dag.node_count();
    let mut dist = vec![Distance::Unreached; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    for &s in seeds {
        dist[s] = Distance::Reached(0);
    }

    let (attempt, success) = counter_names(objective);

    metrics.start_timer();
    for &u in order {
        let Distance::Reached(du) = dist[u] else {
            continue;
        };
        for e in dag.out_edges(u) {
            metrics.increment(attempt);
            let Some(candidate) = du.checked_add(e.w) else {
                metrics.stop_timer();
                return Err(GraphError::WeightOverflow { from: u, to: e.v });
            };
            if objective.improves(dist[e.v], candidate) {
                dist[e.v] = Distance::Reached(candidate);
                prev[e.v] = Some(u);
                metrics.increment(success);
            }
        }
    }
    metrics.stop_timer();

    Ok(PathResult {
        objective,
        dist,
        prev,
    })
}
