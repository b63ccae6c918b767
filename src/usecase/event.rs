use crate::usecase::stats::{AnalyzeStats, BatchStats};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    SccComputed {
        vertices: usize,
        edges: usize,
        components: usize,
        cyclic_components: usize,
    },

    CondensationBuilt {
        components: usize,
        edges: usize,
        intra_edges_dropped: usize,
        parallel_edges_merged: usize,
    },

    TopoSorted {
        components: usize,
    },

    PathsComputed {
        objective: String,
        reached: usize,
        components: usize,
    },

    DatasetFailed {
        dataset: String,
        error: String,
    },

    Finished {
        stats: AnalyzeStats,
    },

    BatchFinished {
        stats: BatchStats,
    },
}
