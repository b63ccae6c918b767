use thiserror::Error;

/// Failures of the graph pipeline.
///
/// Input contract violations reject the whole run for a graph. Invariant
/// violations (`CyclicCondensation`, `UnassignedVertex`) indicate a bug in an
/// earlier stage and are never recovered from. Unreachability is not an error;
/// it is reported through [`crate::domain::graph::Distance::Unreached`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex count must not be negative (got {0})")]
    NegativeVertexCount(i64),

    #[error("graph must have at least one vertex")]
    EmptyGraph,

    #[error("vertex count {n} exceeds the supported maximum of {max}")]
    VertexCountTooLarge { n: i64, max: usize },

    #[error("cannot allocate adjacency for {0} vertices")]
    AllocationFailed(usize),

    #[error("missing source vertex")]
    MissingSource,

    #[error("source vertex {vertex} is out of range for {n} vertices")]
    SourceOutOfRange { vertex: i64, n: usize },

    #[error("edge #{index} ({u} -> {v}) references a vertex outside [0, {n})")]
    VertexOutOfRange { index: usize, u: i64, v: i64, n: usize },

    #[error("undirected input is not supported")]
    UndirectedInput,

    #[error("path weight overflow relaxing edge {from} -> {to}")]
    WeightOverflow { from: usize, to: usize },

    #[error("condensation is not acyclic: topological order covers {ordered} of {components} components")]
    CyclicCondensation { ordered: usize, components: usize },

    #[error("vertex {0} was not assigned to any component")]
    UnassignedVertex(usize),

    #[error("component {0} is not reached; no path to reconstruct")]
    TargetUnreached(usize),
}
