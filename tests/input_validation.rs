use anyhow::Result;
use serde_json::json;

use scc_dag_paths::domain::error::GraphError;
use scc_dag_paths::infrastructure::schema_validator::validate_graph_document;
use scc_dag_paths::infrastructure::serde_json_adapter::read_graph_file;
use scc_dag_paths::usecase::validate::{graph_from_dto, validate_graph};

#[test]
fn schema_accepts_full_dataset_document() -> Result<()> {
    let doc = json!({
        "directed": true,
        "n": 4,
        "source": 1,
        "weight_model": "edge",
        "edges": [
            {"u": 0, "v": 1, "w": 3},
            {"u": 1, "v": 2, "w": -2},
            {"u": 2, "v": 3, "w": 0}
        ]
    });

    validate_graph_document(&doc)?;
    Ok(())
}

#[test]
fn schema_rejects_malformed_documents() {
    let missing_edges = json!({"n": 2, "source": 0});
    assert!(validate_graph_document(&missing_edges).is_err());

    let edge_without_weight = json!({"n": 2, "edges": [{"u": 0, "v": 1}]});
    assert!(validate_graph_document(&edge_without_weight).is_err());

    let fractional_weight = json!({"n": 2, "edges": [{"u": 0, "v": 1, "w": 1.5}]});
    assert!(validate_graph_document(&fractional_weight).is_err());

    let string_directed = json!({"directed": "yes", "n": 2, "edges": []});
    let err = validate_graph_document(&string_directed).unwrap_err();
    assert!(err.to_string().contains("Graph document validation failed"));
}

#[tokio::test]
async fn read_then_validate_surfaces_typed_contract_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("neg.json");
    std::fs::write(&path, r#"{"n": -4, "source": 0, "edges": []}"#)?;

    let dto = read_graph_file(&path).await?;
    assert_eq!(
        graph_from_dto(&dto).unwrap_err(),
        GraphError::NegativeVertexCount(-4)
    );

    let err = validate_graph(&dto).unwrap_err();
    assert!(err.to_string().contains("must not be negative"));
    Ok(())
}

#[tokio::test]
async fn unknown_fields_are_preserved_and_ignored() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("extra.json");
    std::fs::write(
        &path,
        r#"{"n": 2, "source": 0, "edges": [{"u": 0, "v": 1, "w": 1}], "author": "ops"}"#,
    )?;

    let dto = read_graph_file(&path).await?;
    assert_eq!(dto.extra.get("author"), Some(&json!("ops")));

    let input = validate_graph(&dto)?;
    assert_eq!(input.graph.edge_count(), 1);
    assert_eq!(input.source, 0);
    Ok(())
}

#[tokio::test]
async fn unreadable_json_is_rejected_before_validation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"n\": 3, ").expect("write");

    assert!(read_graph_file(&path).await.is_err());
}
