use crate::domain::error::GraphError;

/// Largest vertex count accepted from a dataset; vertex ids fit in 32 bits.
pub const MAX_VERTEX_COUNT: usize = u32::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub w: i64,
}

impl Edge {
    pub const fn new(u: usize, v: usize, w: i64) -> Self {
        Self { u, v, w }
    }
}

/// Directed, edge-weighted graph over vertices `0..n`.
///
/// The adjacency view keeps out-edges in input order and is derived once;
/// the graph is read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: Vec<Edge>,
    adj: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new(node_count: usize, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut adj: Vec<Vec<Edge>> = Vec::new();
        adj.try_reserve_exact(node_count)
            .map_err(|_| GraphError::AllocationFailed(node_count))?;
        adj.resize_with(node_count, Vec::new);

        for (index, e) in edges.iter().enumerate() {
            if e.u >= node_count || e.v >= node_count {
                return Err(GraphError::VertexOutOfRange {
                    index,
                    u: i64::try_from(e.u).unwrap_or(i64::MAX),
                    v: i64::try_from(e.v).unwrap_or(i64::MAX),
                    n: node_count,
                });
            }
            adj[e.u].push(*e);
        }

        Ok(Self { edges, adj })
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn out_edges(&self, v: usize) -> &[Edge] {
        &self.adj[v]
    }

    pub fn in_degrees(&self) -> Vec<usize> {
        let mut indeg = vec![0; self.node_count()];
        for e in self.edges.iter() {
            indeg[e.v] += 1;
        }
        indeg
    }
}

#[derive(Debug, Clone)]
pub struct SccResult {
    pub component_of: Vec<usize>,
    pub components: Vec<Vec<usize>>,
    pub cyclic_component: Vec<bool>,
}

impl SccResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn cyclic_count(&self) -> usize {
        self.cyclic_component.iter().filter(|&&b| b).count()
    }
}

/// Components collapsed into a DAG.
///
/// `dag` is a [`Graph`] whose vertices are component ids; it holds at most one
/// edge per ordered pair of distinct components, carrying the minimum weight
/// of the original edges crossing that pair.
#[derive(Debug, Clone)]
pub struct Condensation {
    pub dag: Graph,
    pub component_of: Vec<usize>,
    pub components: Vec<Vec<usize>>,
    pub intra_edges_dropped: usize,
    pub parallel_edges_merged: usize,
}

impl Condensation {
    pub fn component_count(&self) -> usize {
        self.dag.node_count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Reached(i64),
    Unreached,
}

impl Distance {
    pub fn value(self) -> Option<i64> {
        match self {
            Self::Reached(d) => Some(d),
            Self::Unreached => None,
        }
    }

    pub fn is_reached(self) -> bool {
        matches!(self, Self::Reached(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Shortest,
    Longest,
}

impl Objective {
    /// Whether `candidate` should replace `current` under this objective.
    pub fn improves(self, current: Distance, candidate: i64) -> bool {
        match (self, current) {
            (_, Distance::Unreached) => true,
            (Self::Shortest, Distance::Reached(d)) => candidate < d,
            (Self::Longest, Distance::Reached(d)) => candidate > d,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Shortest => "shortest",
            Self::Longest => "longest",
        }
    }
}

/// Per-component distances and predecessors for one objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub objective: Objective,
    pub dist: Vec<Distance>,
    pub prev: Vec<Option<usize>>,
}

impl PathResult {
    pub fn reached_count(&self) -> usize {
        self.dist.iter().filter(|d| d.is_reached()).count()
    }

    /// Components from a seed to `target`, following `prev` back to a
    /// component without predecessor.
    pub fn reconstruct(&self, target: usize) -> Result<Vec<usize>, GraphError> {
        if !self.dist.get(target).is_some_and(|d| d.is_reached()) {
            return Err(GraphError::TargetUnreached(target));
        }

        let mut seq = vec![target];
        let mut cur = target;
        while let Some(p) = self.prev[cur] {
            seq.push(p);
            cur = p;
        }
        seq.reverse();
        Ok(seq)
    }

    /// Reached component with the greatest distance; lowest id wins ties.
    pub fn farthest(&self) -> Option<(usize, i64)> {
        let mut best: Option<(usize, i64)> = None;
        for (c, d) in self.dist.iter().enumerate() {
            let Some(d) = d.value() else {
                continue;
            };
            if best.map_or(true, |(_, b)| d > b) {
                best = Some((c, d));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range_endpoint() {
        let err = Graph::new(2, vec![Edge::new(0, 1, 1), Edge::new(1, 2, 1)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                index: 1,
                u: 1,
                v: 2,
                n: 2
            }
        );
    }

    #[test]
    fn new_reports_unallocatable_vertex_count() {
        let err = Graph::new(usize::MAX, Vec::new()).unwrap_err();
        assert_eq!(err, GraphError::AllocationFailed(usize::MAX));
    }

    #[test]
    fn adjacency_keeps_input_order() {
        let g = Graph::new(
            3,
            vec![Edge::new(0, 2, 4), Edge::new(1, 0, 1), Edge::new(0, 1, -3)],
        )
        .expect("graph");

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.out_edges(0), &[Edge::new(0, 2, 4), Edge::new(0, 1, -3)]);
        assert!(g.out_edges(2).is_empty());
        assert_eq!(g.in_degrees(), vec![1, 1, 1]);
    }

    #[test]
    fn objective_improves_unreached_and_better_values_only() {
        assert!(Objective::Shortest.improves(Distance::Unreached, 100));
        assert!(Objective::Shortest.improves(Distance::Reached(5), 4));
        assert!(!Objective::Shortest.improves(Distance::Reached(5), 5));
        assert!(Objective::Longest.improves(Distance::Reached(5), 6));
        assert!(!Objective::Longest.improves(Distance::Reached(5), -1));
    }

    #[test]
    fn reconstruct_follows_prev_and_rejects_unreached() {
        let res = PathResult {
            objective: Objective::Shortest,
            dist: vec![
                Distance::Reached(0),
                Distance::Reached(3),
                Distance::Reached(5),
                Distance::Unreached,
            ],
            prev: vec![None, Some(0), Some(1), None],
        };

        assert_eq!(res.reconstruct(2), Ok(vec![0, 1, 2]));
        assert_eq!(res.reconstruct(0), Ok(vec![0]));
        assert_eq!(res.reconstruct(3), Err(GraphError::TargetUnreached(3)));
        assert_eq!(res.reconstruct(9), Err(GraphError::TargetUnreached(9)));
        assert_eq!(res.reached_count(), 3);
        assert_eq!(res.farthest(), Some((2, 5)));
    }
}
