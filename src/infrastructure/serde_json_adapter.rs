use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphFileDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directed: Option<bool>,

    pub n: i64,

    #[serde(default)]
    pub edges: Vec<EdgeDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_model: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EdgeDto {
    pub u: i64,
    pub v: i64,
    pub w: i64,
}

/// Condensation edge between component ids.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ComponentEdgeDto {
    pub u: usize,
    pub v: usize,
    pub w: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReportDto {
    pub dataset: String,
    pub vertices: usize,
    pub edges: usize,
    pub source: usize,
    pub source_component: usize,
    pub components: Vec<Vec<usize>>,
    pub condensation_edges: Vec<ComponentEdgeDto>,
    pub topo_order: Vec<usize>,
    pub shortest: DistancesDto,
    pub longest: DistancesDto,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub critical_path: Vec<usize>,
    pub counters: BTreeMap<String, u64>,
    pub total_ops: u64,
    pub elapsed_ms: f64,
    pub algorithm_ms: f64,
}

/// `None` marks an unreached component.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DistancesDto {
    pub dist: Vec<Option<i64>>,
    pub prev: Vec<Option<usize>>,
}

pub async fn read_graph_file(path: impl AsRef<Path>) -> Result<GraphFileDto> {
    let raw = fs::read_to_string(path).await?;
    let dto: GraphFileDto = serde_json::from_str(&raw)?;
    Ok(dto)
}

pub async fn write_report_json(path: impl AsRef<Path>, report: &ReportDto) -> Result<()> {
    let pretty = serde_json::to_string_pretty(report)?;
    fs::write(path, pretty).await?;
    Ok(())
}

pub async fn write_text_file(path: impl AsRef<Path>, text: &str) -> Result<()> {
    fs::write(path, text).await?;
    Ok(())
}
