use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::metrics::SimpleMetrics;
use crate::infrastructure::report_writer::{render_text_report, to_report_dto};
use crate::infrastructure::scc_tarjan::TarjanSccDetector;
use crate::infrastructure::serde_json_adapter::{read_graph_file, write_report_json, write_text_file};
use crate::usecase::analyze::analyze_graph;
use crate::usecase::batch::{run_batch, BatchOptions};
use crate::usecase::event::AppEvent;
use crate::usecase::validate::validate_graph;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cmd = Cli::parse(args)?;

    match cmd {
        Cli::GraphAnalyze {
            input,
            output,
            json,
            emit_events,
        } => {
            let dto = read_graph_file(&input)
                .await
                .with_context(|| format!("reading graph JSON: {input}"))?;
            let graph_input =
                validate_graph(&dto).with_context(|| format!("validating graph: {input}"))?;

            let (tx, printer) = event_channel(emit_events);
            let scc = TarjanSccDetector;
            let mut metrics = SimpleMetrics::new();
            let analyzed = analyze_graph(
                &file_name(&input),
                &graph_input,
                &scc,
                &mut metrics,
                Some(tx),
            )
            .await
            .with_context(|| format!("analyzing graph: {input}"));

            // Flush events queued before a failure too.
            if let Some(handle) = printer {
                handle.await.ok();
            }
            let (report, stats) = analyzed?;

            let text = render_text_report(&report);
            match output.as_deref() {
                Some(path) => write_text_file(path, &text)
                    .await
                    .with_context(|| format!("writing report: {path}"))?,
                None => print!("{text}"),
            }
            if let Some(path) = json.as_deref() {
                write_report_json(path, &to_report_dto(&report))
                    .await
                    .with_context(|| format!("writing JSON report: {path}"))?;
            }

            eprintln!(
                "summary: vertices={} edges={} components={} cyclic_components={} condensation_edges={} shortest_reached={} longest_reached={} total_ops={} elapsed_ms={:.3}",
                stats.vertices,
                stats.edges,
                stats.components,
                stats.cyclic_components,
                stats.condensation_edges,
                stats.shortest_reached,
                stats.longest_reached,
                stats.total_ops,
                stats.elapsed_ms
            );

            Ok(())
        }

        Cli::GraphBatch {
            data,
            results,
            json,
            emit_events,
        } => {
            let (tx, printer) = event_channel(emit_events);

            let opts = BatchOptions {
                data_dir: PathBuf::from(&data),
                results_dir: PathBuf::from(&results),
                write_json: json,
            };
            let scc = TarjanSccDetector;
            let batched = run_batch(&opts, &scc, Some(tx)).await;

            if let Some(handle) = printer {
                handle.await.ok();
            }
            let stats = batched?;

            eprintln!(
                "summary: datasets_seen={} datasets_processed={} datasets_failed={} results={results}",
                stats.datasets_seen, stats.datasets_processed, stats.datasets_failed
            );

            if stats.datasets_failed > 0 {
                return Err(anyhow!(
                    "{} of {} datasets failed",
                    stats.datasets_failed,
                    stats.datasets_seen
                ));
            }
            Ok(())
        }

        Cli::GraphValidate { input } => {
            let dto = read_graph_file(&input)
                .await
                .with_context(|| format!("reading graph JSON: {input}"))?;

            let graph_input =
                validate_graph(&dto).with_context(|| format!("validating graph: {input}"))?;

            eprintln!("schema validation passed");
            eprintln!(
                "ok: {} vertices, {} edges, source {}",
                graph_input.graph.node_count(),
                graph_input.graph.edge_count(),
                graph_input.source
            );
            Ok(())
        }
    }
}

/// The sender is always handed to the usecase; without `--emit-events` the
/// receiver is dropped and sends are discarded.
fn event_channel(emit_events: bool) -> (mpsc::Sender<AppEvent>, Option<JoinHandle<()>>) {
    let (tx, rx) = mpsc::channel::<AppEvent>(1024);
    let printer = if emit_events {
        Some(spawn_ndjson_printer(rx))
    } else {
        drop(rx);
        None
    };
    (tx, printer)
}

#[derive(Debug)]
enum Cli {
    GraphAnalyze {
        input: String,
        output: Option<String>,
        json: Option<String>,
        emit_events: bool,
    },
    GraphBatch {
        data: String,
        results: String,
        json: bool,
        emit_events: bool,
    },
    GraphValidate {
        input: String,
    },
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> graph analyze --in/--input <graph.json> [--out <report.txt>] [--json <report.json>] [--emit-events]
        // <bin> graph batch [--data <dir>] [--results <dir>] [--json] [--emit-events]
        // <bin> graph validate --in/--input <graph.json>
        if args.len() < 3 {
            return Err(anyhow!(usage()));
        }

        if args[1] != "graph" {
            return Err(anyhow!(usage()));
        }

        match args[2].as_str() {
            "analyze" => Self::parse_analyze(args),
            "batch" => Self::parse_batch(args),
            "validate" => Self::parse_validate(args),
            _ => Err(anyhow!(usage())),
        }
    }

    fn parse_analyze(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut output: Option<String> = None;
        let mut json: Option<String> = None;
        let mut emit_events = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--out" | "--output" => {
                    i += 1;
                    output = Some(required_value(args, i, "--out")?);
                }
                "--json" => {
                    i += 1;
                    json = Some(required_value(args, i, "--json")?);
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;

        Ok(Cli::GraphAnalyze {
            input,
            output,
            json,
            emit_events,
        })
    }

    fn parse_batch(args: &[String]) -> Result<Self> {
        let defaults = BatchOptions::default();
        let mut data = defaults.data_dir.to_string_lossy().into_owned();
        let mut results = defaults.results_dir.to_string_lossy().into_owned();
        let mut json = false;
        let mut emit_events = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--data" => {
                    i += 1;
                    data = required_value(args, i, "--data")?;
                }
                "--results" => {
                    i += 1;
                    results = required_value(args, i, "--results")?;
                }
                "--json" => {
                    json = true;
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        Ok(Cli::GraphBatch {
            data,
            results,
            json,
            emit_events,
        })
    }

    fn parse_validate(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;

        Ok(Cli::GraphValidate { input })
    }
}

fn required_value(args: &[String], i: usize, flag: &str) -> Result<String> {
    args.get(i)
        .cloned()
        .ok_or_else(|| anyhow!(format!("missing value for {flag}\n\n{}", usage())))
}

fn usage() -> &'static str {
    "Usage:\n  graph analyze --in/--input <graph.json> [--out <report.txt>] [--json <report.json>] [--emit-events]\n  graph batch [--data <dir>] [--results <dir>] [--json] [--emit-events]\n  graph validate --in/--input <graph.json>\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout; summary goes to stderr.\n\nBatch:\n  Every *.json file in --data (default: data) is analyzed; reports are written to --results (default: results) as result_<name>.txt."
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::serde_json_adapter::{EdgeDto, GraphFileDto};
    use tempfile::tempdir;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn chain_dto() -> GraphFileDto {
        GraphFileDto {
            directed: Some(true),
            n: 5,
            source: Some(0),
            edges: vec![
                EdgeDto { u: 0, v: 1, w: 1 },
                EdgeDto { u: 1, v: 2, w: 1 },
                EdgeDto { u: 2, v: 0, w: 1 },
                EdgeDto { u: 2, v: 3, w: 5 },
                EdgeDto { u: 3, v: 4, w: 2 },
            ],
            ..GraphFileDto::default()
        }
    }

    fn write_dto(path: &Path, dto: &GraphFileDto) {
        std::fs::write(path, serde_json::to_string_pretty(dto).expect("serialize"))
            .expect("write input");
    }

    #[test]
    fn parse_rejects_unknown_arg() {
        let err = Cli::parse(&args(&["bin", "graph", "analyze", "--wat"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown arg"));
        assert!(err.contains("Usage"));
    }

    #[test]
    fn parse_requires_input() {
        let err = Cli::parse(&args(&["bin", "graph", "analyze", "--out", "r.txt"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing --in/--input"));

        let err = Cli::parse(&args(&["bin", "graph", "validate"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing --in/--input"));
    }

    #[test]
    fn parse_analyze_success_and_flags() {
        let cmd = Cli::parse(&args(&[
            "bin",
            "graph",
            "analyze",
            "--in",
            "g.json",
            "--out",
            "r.txt",
            "--json",
            "r.json",
            "--emit-events",
        ]))
        .expect("parse");

        match cmd {
            Cli::GraphAnalyze {
                input,
                output,
                json,
                emit_events,
            } => {
                assert_eq!(input, "g.json");
                assert_eq!(output.as_deref(), Some("r.txt"));
                assert_eq!(json.as_deref(), Some("r.json"));
                assert!(emit_events);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn parse_batch_defaults_and_overrides() {
        match Cli::parse(&args(&["bin", "graph", "batch"])).expect("parse") {
            Cli::GraphBatch {
                data,
                results,
                json,
                emit_events,
            } => {
                assert_eq!(data, "data");
                assert_eq!(results, "results");
                assert!(!json);
                assert!(!emit_events);
            }
            _ => panic!("expected batch"),
        }

        match Cli::parse(&args(&[
            "bin", "graph", "batch", "--data", "in", "--results", "out", "--json",
        ]))
        .expect("parse")
        {
            Cli::GraphBatch {
                data, results, json, ..
            } => {
                assert_eq!(data, "in");
                assert_eq!(results, "out");
                assert!(json);
            }
            _ => panic!("expected batch"),
        }
    }

    #[test]
    fn parse_flag_without_value_is_rejected() {
        let err = Cli::parse(&args(&["bin", "graph", "batch", "--data"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing value for --data"));
    }

    #[test]
    fn parse_help_returns_error_with_usage() {
        let err = Cli::parse(&args(&["bin", "graph", "analyze", "--help"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Usage"));

        let err = Cli::parse(&args(&["bin", "tree", "analyze"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Usage"));
    }

    #[tokio::test]
    async fn run_with_args_analyze_writes_reports() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("chain.json");
        let out_path = dir.path().join("chain.txt");
        let json_path = dir.path().join("chain.report.json");
        write_dto(&input_path, &chain_dto());

        run_with_args(&args(&[
            "bin",
            "graph",
            "analyze",
            "--in",
            input_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
            "--json",
            json_path.to_str().unwrap(),
            "--emit-events",
        ]))
        .await
        .expect("run");

        let text = std::fs::read_to_string(&out_path).expect("read report");
        assert!(text.starts_with("Dataset: chain.json"));
        assert!(text.contains("SCC count: 3"));

        let raw = std::fs::read_to_string(&json_path).expect("read json");
        let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(parsed["components"].as_array().map(|a| a.len()), Some(3));
    }

    #[tokio::test]
    async fn run_with_args_analyze_rejects_contract_violation() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("bad.json");
        let mut dto = chain_dto();
        dto.source = Some(9);
        write_dto(&input_path, &dto);

        let err = run_with_args(&args(&[
            "bin",
            "graph",
            "analyze",
            "--in",
            input_path.to_str().unwrap(),
        ]))
        .await
        .unwrap_err();
        assert!(format!("{err:#}").contains("source vertex 9 is out of range"));
    }

    #[tokio::test]
    async fn run_with_args_analyze_reports_overflow_with_events() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("overflow.json");
        let out_path = dir.path().join("overflow.txt");
        let dto = GraphFileDto {
            directed: Some(true),
            n: 3,
            source: Some(0),
            edges: vec![
                EdgeDto { u: 0, v: 1, w: i64::MAX },
                EdgeDto { u: 1, v: 2, w: 1 },
            ],
            ..GraphFileDto::default()
        };
        write_dto(&input_path, &dto);

        let err = run_with_args(&args(&[
            "bin",
            "graph",
            "analyze",
            "--in",
            input_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
            "--emit-events",
        ]))
        .await
        .unwrap_err();

        assert!(format!("{err:#}").contains("path weight overflow"));
        assert!(!out_path.exists());
    }

    #[tokio::test]
    async fn run_with_args_validate_smoke_ok() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("chain.json");
        write_dto(&input_path, &chain_dto());

        run_with_args(&args(&[
            "bin",
            "graph",
            "validate",
            "--in",
            input_path.to_str().unwrap(),
        ]))
        .await
        .expect("validate");
    }

    #[tokio::test]
    async fn run_with_args_batch_reports_failures() {
        let dir = tempdir().expect("tempdir");
        let data = dir.path().join("data");
        let results = dir.path().join("results");
        std::fs::create_dir(&data).expect("mkdir");
        write_dto(&data.join("chain.json"), &chain_dto());
        std::fs::write(data.join("broken.json"), "{ not json").expect("write");

        let err = run_with_args(&args(&[
            "bin",
            "graph",
            "batch",
            "--data",
            data.to_str().unwrap(),
            "--results",
            results.to_str().unwrap(),
        ]))
        .await
        .unwrap_err();

        assert!(err.to_string().contains("1 of 2 datasets failed"));
        assert!(results.join("result_chain.txt").exists());
    }

    #[tokio::test]
    async fn run_uses_env_args_and_returns_usage_error_under_test_harness() {
        let err = run().await.unwrap_err().to_string();
        assert!(err.contains("Usage"));
    }
}
