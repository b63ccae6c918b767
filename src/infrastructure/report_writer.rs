use crate::domain::graph::{Distance, PathResult};
use crate::infrastructure::serde_json_adapter::{ComponentEdgeDto, DistancesDto, ReportDto};
use crate::usecase::analyze::AnalysisReport;
use std::fmt::Write as _;

pub fn render_text_report(r: &AnalysisReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, r);
    out
}

fn write_report(out: &mut String, r: &AnalysisReport) -> std::fmt::Result {
    let c = &r.condensation;

    writeln!(out, "Dataset: {}", r.dataset)?;
    writeln!(out, "Vertices: {}, Edges: {}", r.vertex_count, r.edge_count)?;
    writeln!(out, "SCC count: {}", c.component_count())?;
    writeln!(out)?;

    writeln!(out, "=== Components ===")?;
    for (cid, members) in c.components.iter().enumerate() {
        let cyclic = if r.cyclic_component.get(cid).copied().unwrap_or(false) {
            " (cyclic)"
        } else {
            ""
        };
        writeln!(out, "  Comp{cid}: {members:?}{cyclic}")?;
    }
    writeln!(out)?;

    writeln!(out, "=== Condensation DAG edges ===")?;
    for e in c.dag.edges() {
        writeln!(out, "  Comp{} -> Comp{} (w={})", e.u, e.v, e.w)?;
    }
    writeln!(out)?;

    writeln!(out, "=== Topological Order ===")?;
    writeln!(out, "{:?}", r.topo_order)?;
    writeln!(out)?;

    writeln!(
        out,
        "Source vertex: {} (component {})",
        r.source, r.source_component
    )?;
    writeln!(out)?;

    writeln!(out, "=== Shortest Path Distances from Source Component ===")?;
    write_distances(out, &r.shortest, "unreachable")?;
    writeln!(out)?;

    writeln!(out, "=== Longest Path (Critical Path) Distances ===")?;
    write_distances(out, &r.longest, "N/A")?;
    writeln!(out)?;

    match &r.critical_path {
        Some((path, length)) => {
            let hops: Vec<String> = path.iter().map(|c| format!("Comp{c}")).collect();
            writeln!(out, "Critical path: {} (length {length})", hops.join(" -> "))?;
        }
        None => writeln!(out, "Critical path: N/A")?,
    }
    writeln!(out)?;

    writeln!(out, "Total time: {:.3} ms", r.elapsed.as_secs_f64() * 1e3)?;
    writeln!(
        out,
        "Algorithm time: {:.3} ms",
        r.algorithm_time.as_secs_f64() * 1e3
    )?;
    writeln!(out, "Operation count: {}", r.total_ops())?;
    for (name, count) in r.counters.iter() {
        writeln!(out, "  {name}: {count}")?;
    }
    Ok(())
}

fn write_distances(out: &mut String, res: &PathResult, unreached: &str) -> std::fmt::Result {
    for (cid, d) in res.dist.iter().enumerate() {
        match d {
            Distance::Reached(v) => writeln!(out, "  To Comp{cid} : {v}")?,
            Distance::Unreached => writeln!(out, "  To Comp{cid} : {unreached}")?,
        }
    }
    Ok(())
}

pub fn to_report_dto(r: &AnalysisReport) -> ReportDto {
    ReportDto {
        dataset: r.dataset.clone(),
        vertices: r.vertex_count,
        edges: r.edge_count,
        source: r.source,
        source_component: r.source_component,
        components: r.condensation.components.clone(),
        condensation_edges: r
            .condensation
            .dag
            .edges()
            .iter()
            .map(|e| ComponentEdgeDto {
                u: e.u,
                v: e.v,
                w: e.w,
            })
            .collect(),
        topo_order: r.topo_order.clone(),
        shortest: distances_dto(&r.shortest),
        longest: distances_dto(&r.longest),
        critical_path: r
            .critical_path
            .as_ref()
            .map(|(path, _)| path.clone())
            .unwrap_or_default(),
        counters: r.counters.clone(),
        total_ops: r.total_ops(),
        elapsed_ms: r.elapsed.as_secs_f64() * 1e3,
        algorithm_ms: r.algorithm_time.as_secs_f64() * 1e3,
    }
}

fn distances_dto(res: &PathResult) -> DistancesDto {
    DistancesDto {
        dist: res.dist.iter().map(|d| d.value()).collect(),
        prev: res.prev.clone(),
    }
}
