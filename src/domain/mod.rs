// Domain layer: graph model, errors and ports
pub mod error;
pub mod graph;
pub mod traits;
