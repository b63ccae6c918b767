//! Weighted directed graph analysis: SCC decomposition, condensation,
//! topological ordering and DAG shortest/critical paths.
//!
//! Layers:
//! - domain: pure, synchronous types and ports
//! - usecase: pipeline orchestration + progress events
//! - infrastructure: serde + async IO + implementations of ports
//! - interface: CLI wiring

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;
