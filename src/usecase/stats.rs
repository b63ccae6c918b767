use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyzeStats {
    pub vertices: usize,
    pub edges: usize,
    pub components: usize,
    pub cyclic_components: usize,
    pub condensation_edges: usize,
    pub intra_edges_dropped: usize,
    pub parallel_edges_merged: usize,
    pub shortest_reached: usize,
    pub longest_reached: usize,
    pub total_ops: u64,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchStats {
    pub datasets_seen: usize,
    pub datasets_processed: usize,
    pub datasets_failed: usize,
}
