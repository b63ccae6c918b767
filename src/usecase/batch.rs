use crate::domain::traits::SccDetector;
use crate::infrastructure::metrics::SimpleMetrics;
use crate::infrastructure::report_writer::{render_text_report, to_report_dto};
use crate::infrastructure::serde_json_adapter::{read_graph_file, write_report_json, write_text_file};
use crate::usecase::analyze::{analyze_graph, emit};
use crate::usecase::event::AppEvent;
use crate::usecase::stats::{AnalyzeStats, BatchStats};
use crate::usecase::validate::validate_graph;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub data_dir: PathBuf,
    pub results_dir: PathBuf,
    pub write_json: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            results_dir: PathBuf::from("results"),
            write_json: false,
        }
    }
}

/// Analyzes every `*.json` dataset under `data_dir` in file name order.
///
/// Each dataset gets its own metrics and is isolated: a failure is reported
/// and counted, and the remaining datasets still run.
pub async fn run_batch(
    opts: &BatchOptions,
    scc: &dyn SccDetector,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<BatchStats> {
    fs::create_dir_all(&opts.results_dir)
        .await
        .with_context(|| format!("creating results dir: {}", opts.results_dir.display()))?;

    let datasets = list_datasets(&opts.data_dir)
        .await
        .with_context(|| format!("listing data dir: {}", opts.data_dir.display()))?;

    let mut stats = BatchStats {
        datasets_seen: datasets.len(),
        ..BatchStats::default()
    };

    for path in datasets {
        match process_dataset(&path, opts, scc, sink.clone()).await {
            Ok(s) => {
                stats.datasets_processed += 1;
                eprintln!(
                    "{} processed: {} SCCs, {:.2} ms",
                    dataset_name(&path),
                    s.components,
                    s.elapsed_ms
                );
            }
            Err(err) => {
                stats.datasets_failed += 1;
                eprintln!("error processing {}: {err:#}", path.display());
                emit(
                    &sink,
                    AppEvent::DatasetFailed {
                        dataset: dataset_name(&path),
                        error: format!("{err:#}"),
                    },
                )
                .await;
            }
        }
    }

    emit(
        &sink,
        AppEvent::BatchFinished {
            stats: stats.clone(),
        },
    )
    .await;
    Ok(stats)
}

async fn process_dataset(
    path: &Path,
    opts: &BatchOptions,
    scc: &dyn SccDetector,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<AnalyzeStats> {
    let dto = read_graph_file(path)
        .await
        .with_context(|| format!("reading graph JSON: {}", path.display()))?;
    let input = validate_graph(&dto).with_context(|| format!("validating graph: {}", path.display()))?;

    let name = dataset_name(path);
    let mut metrics = SimpleMetrics::new();
    let (report, stats) = analyze_graph(&name, &input, scc, &mut metrics, sink).await?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.clone());

    let text_path = opts.results_dir.join(format!("result_{stem}.txt"));
    write_text_file(&text_path, &render_text_report(&report))
        .await
        .with_context(|| format!("writing report: {}", text_path.display()))?;

    if opts.write_json {
        let json_path = opts.results_dir.join(format!("result_{stem}.json"));
        write_report_json(&json_path, &to_report_dto(&report))
            .await
            .with_context(|| format!("writing report: {}", json_path.display()))?;
    }

    Ok(stats)
}

async fn list_datasets(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") && path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
