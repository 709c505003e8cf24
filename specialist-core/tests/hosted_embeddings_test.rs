mod common;

use common::{MockServer, json_response};
use serde_json::json;
use specialist_core::config::{AgentConfig, EmbeddingBackend, SelectionConfig};
use specialist_core::embeddings::{Embedder, EmbeddingError, OpenAIEmbedder, create_embedder};
use specialist_core::{AgentSelector, PersonaCatalog};

fn one_hot(dimension: usize, index: usize) -> Vec<f32> {
    let mut vector = vec![0.0; dimension];
    vector[index] = 1.0;
    vector
}

fn embeddings_body(vectors: Vec<Vec<f32>>) -> String {
    let data: Vec<_> = vectors
        .into_iter()
        .enumerate()
        .rev()
        .map(|(index, embedding)| json!({"object": "embedding", "index": index, "embedding": embedding}))
        .collect();
    json!({"object": "list", "data": data, "model": "text-embedding-3-small"}).to_string()
}

#[tokio::test]
async fn batch_results_follow_input_order() -> anyhow::Result<()> {
    let server = MockServer::start(vec![json_response(
        200,
        &embeddings_body(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
    )])
    .await?;

    let embedder = OpenAIEmbedder::from_config(
        "sk-test".to_string(),
        None,
        Some(server.base_url.clone()),
        None,
    );
    let vectors = embedder
        .embed_batch(&["first".to_string(), "second".to_string()])
        .await?;
    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);

    let requests = server.finish().await?;
    assert!(requests[0].request_line.starts_with("POST /v1/embeddings"));
    let body = requests[0].json();
    assert_eq!(body["model"], "text-embedding-3-small");
    assert_eq!(body["input"], json!(["first", "second"]));
    Ok(())
}

#[tokio::test]
async fn rejected_key_is_an_authentication_error() -> anyhow::Result<()> {
    let server = MockServer::start(vec![json_response(401, r#"{"error": "bad key"}"#)]).await?;
    let embedder = OpenAIEmbedder::from_config(
        "sk-wrong".to_string(),
        None,
        Some(server.base_url.clone()),
        None,
    );

    let result = embedder.embed("anything").await;
    assert!(matches!(result, Err(EmbeddingError::Authentication(_))));
    server.finish().await?;
    Ok(())
}

#[tokio::test]
async fn selector_ranks_with_hosted_vectors() -> anyhow::Result<()> {
    let catalog = PersonaCatalog::builtin();
    let dimension = catalog.len();
    let persona_vectors: Vec<Vec<f32>> = (0..dimension).map(|i| one_hot(dimension, i)).collect();

    let dba = catalog
        .iter()
        .position(|persona| persona.name == "Database Administrator")
        .ok_or_else(|| anyhow::anyhow!("catalog lacks the database persona"))?;
    let mut query = one_hot(dimension, dba);
    query[0] = 0.5;

    let server = MockServer::start(vec![
        json_response(200, &embeddings_body(persona_vectors)),
        json_response(200, &embeddings_body(vec![query])),
    ])
    .await?;

    let selection = SelectionConfig {
        backend: EmbeddingBackend::Openai,
        ..SelectionConfig::default()
    };
    let agent = AgentConfig {
        base_url: server.base_url.clone(),
        ..AgentConfig::default()
    };
    let embedder = create_embedder(&selection, &agent, Some("sk-test".to_string()))?;
    let selector = AgentSelector::new(catalog, embedder).await?;
    assert_eq!(selector.backend(), "openai");

    let best = selector.best_agents("slow joins on big tables", 2).await?;
    let names: Vec<&str> = best.iter().map(|candidate| candidate.name).collect();
    assert_eq!(names, vec!["Database Administrator", "Doctor"]);

    let requests = server.finish().await?;
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].json()["input"].as_array().map(Vec::len),
        Some(dimension)
    );
    assert_eq!(requests[1].json()["input"], json!(["slow join big table"]));
    Ok(())
}
