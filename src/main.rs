//! Binary entrypoint.
//!
//! This crate is split into Clean Architecture layers:
//! - domain: graph model, errors, ports
//! - usecase: pipeline orchestration + progress events
//! - infrastructure: serde + async IO + implementations of ports
//! - interface: CLI wiring

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    scc_dag_paths::interface::cli::run().await
}
