pub mod condense;
pub mod paths;
pub mod topo;

use crate::domain::error::GraphError;
use crate::domain::graph::{Condensation, PathResult};
use crate::domain::traits::{Metrics, SccDetector};
use crate::usecase::event::AppEvent;
use crate::usecase::stats::AnalyzeStats;
use crate::usecase::validate::GraphInput;
use anyhow::Result;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Everything one pipeline run produces for the result consumer.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub dataset: String,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub source: usize,
    pub source_component: usize,
    pub condensation: Condensation,
    pub cyclic_component: Vec<bool>,
    pub topo_order: Vec<usize>,
    pub shortest: PathResult,
    pub longest: PathResult,
    /// Components along the heaviest path and its total weight.
    pub critical_path: Option<(Vec<usize>, i64)>,
    pub counters: BTreeMap<String, u64>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
    /// Time spent inside the timed algorithm stages, as seen by `metrics`.
    pub algorithm_time: Duration,
}

impl AnalysisReport {
    pub fn total_ops(&self) -> u64 {
        self.counters.values().sum()
    }
}

/// Runs SCC decomposition, condensation, topological sort and both DAG path
/// objectives over one dataset.
///
/// Progress is reported on `sink` when present. The computed results do not
/// depend on `sink` or on which `metrics` implementation is supplied.
pub async fn analyze_graph(
    dataset: &str,
    input: &GraphInput,
    scc: &dyn SccDetector,
    metrics: &mut dyn Metrics,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<(AnalysisReport, AnalyzeStats)> {
    let graph = &input.graph;
    let source_out_of_range = || GraphError::SourceOutOfRange {
        vertex: i64::try_from(input.source).unwrap_or(i64::MAX),
        n: graph.node_count(),
    };
    if input.source >= graph.node_count() {
        return Err(source_out_of_range().into());
    }
    let started = Instant::now();

    emit(&sink, AppEvent::PhaseStarted { name: "scc".into() }).await;
    let scc_res = scc.compute_scc(graph, metrics);
    emit(
        &sink,
        AppEvent::SccComputed {
            vertices: graph.node_count(),
            edges: graph.edge_count(),
            components: scc_res.component_count(),
            cyclic_components: scc_res.cyclic_count(),
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: "scc".into() }).await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "condensation".into(),
        },
    )
    .await;
    let condensation = condense::build_condensation(graph, &scc_res, metrics)?;
    emit(
        &sink,
        AppEvent::CondensationBuilt {
            components: condensation.component_count(),
            edges: condensation.dag.edge_count(),
            intra_edges_dropped: condensation.intra_edges_dropped,
            parallel_edges_merged: condensation.parallel_edges_merged,
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "condensation".into(),
        },
    )
    .await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "topo_sort".into(),
        },
    )
    .await;
    let topo_order = topo::kahn_order(&condensation.dag, metrics);
    if topo_order.len() != condensation.component_count() {
        return Err(GraphError::CyclicCondensation {
            ordered: topo_order.len(),
            components: condensation.component_count(),
        }
        .into());
    }
    emit(
        &sink,
        AppEvent::TopoSorted {
            components: topo_order.len(),
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "topo_sort".into(),
        },
    )
    .await;

    let source_component = *condensation
        .component_of
        .get(input.source)
        .ok_or_else(source_out_of_range)?;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "dag_paths".into(),
        },
    )
    .await;
    let shortest = paths::shortest_from(&condensation.dag, &topo_order, source_component, metrics)?;
    let longest = paths::longest_over(&condensation.dag, &topo_order, metrics)?;
    for res in [&shortest, &longest] {
        emit(
            &sink,
            AppEvent::PathsComputed {
                objective: res.objective.label().to_string(),
                reached: res.reached_count(),
                components: condensation.component_count(),
            },
        )
        .await;
    }
    let critical_path = match longest.farthest() {
        Some((target, length)) => Some((longest.reconstruct(target)?, length)),
        None => None,
    };
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "dag_paths".into(),
        },
    )
    .await;

    let elapsed = started.elapsed();
    let report = AnalysisReport {
        dataset: dataset.to_string(),
        vertex_count: graph.node_count(),
        edge_count: graph.edge_count(),
        source: input.source,
        source_component,
        cyclic_component: scc_res.cyclic_component,
        condensation,
        topo_order,
        shortest,
        longest,
        critical_path,
        counters: metrics.all_counts(),
        elapsed,
        algorithm_time: metrics.elapsed(),
    };

    let stats = AnalyzeStats {
        vertices: report.vertex_count,
        edges: report.edge_count,
        components: report.condensation.component_count(),
        cyclic_components: report.cyclic_component.iter().filter(|&&b| b).count(),
        condensation_edges: report.condensation.dag.edge_count(),
        intra_edges_dropped: report.condensation.intra_edges_dropped,
        parallel_edges_merged: report.condensation.parallel_edges_merged,
        shortest_reached: report.shortest.reached_count(),
        longest_reached: report.longest.reached_count(),
        total_ops: report.total_ops(),
        elapsed_ms: elapsed.as_secs_f64() * 1e3,
    };

    emit(
        &sink,
        AppEvent::Finished {
            stats: stats.clone(),
        },
    )
    .await;
    Ok((report, stats))
}

pub(crate) async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}
