use crate::domain::error::GraphError;
use crate::domain::graph::{Edge, Graph, MAX_VERTEX_COUNT};
use crate::infrastructure::schema_validator::validate_graph_document;
use crate::infrastructure::serde_json_adapter::GraphFileDto;
use anyhow::Result;

/// A dataset that passed every input check.
#[derive(Debug, Clone)]
pub struct GraphInput {
    pub graph: Graph,
    pub source: usize,
}

/// Schema check followed by the input contract check.
pub fn validate_graph(dto: &GraphFileDto) -> Result<GraphInput> {
    let document = serde_json::to_value(dto)?;
    validate_graph_document(&document)?;
    Ok(graph_from_dto(dto)?)
}

/// Converts a dataset into a [`Graph`] plus source vertex.
///
/// Rejects the whole document on the first contract violation; no partially
/// populated graph is ever returned.
pub fn graph_from_dto(dto: &GraphFileDto) -> Result<GraphInput, GraphError> {
    if dto.directed == Some(false) {
        return Err(GraphError::UndirectedInput);
    }
    if dto.n < 0 {
        return Err(GraphError::NegativeVertexCount(dto.n));
    }
    let too_large = GraphError::VertexCountTooLarge {
        n: dto.n,
        max: MAX_VERTEX_COUNT,
    };
    let n = usize::try_from(dto.n).map_err(|_| too_large.clone())?;
    if n == 0 {
        return Err(GraphError::EmptyGraph);
    }
    if n > MAX_VERTEX_COUNT {
        return Err(too_large);
    }

    let raw_source = dto.source.ok_or(GraphError::MissingSource)?;
    let source = vertex_index(raw_source, n).ok_or(GraphError::SourceOutOfRange {
        vertex: raw_source,
        n,
    })?;

    let mut edges = Vec::with_capacity(dto.edges.len());
    for (index, e) in dto.edges.iter().enumerate() {
        let (Some(u), Some(v)) = (vertex_index(e.u, n), vertex_index(e.v, n)) else {
            return Err(GraphError::VertexOutOfRange {
                index,
                u: e.u,
                v: e.v,
                n,
            });
        };
        edges.push(Edge::new(u, v, e.w));
    }

    Ok(GraphInput {
        graph: Graph::new(n, edges)?,
        source,
    })
}

fn vertex_index(raw: i64, n: usize) -> Option<usize> {
    usize::try_from(raw).ok().filter(|&v| v < n)
}
