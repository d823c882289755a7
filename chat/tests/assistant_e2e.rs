//! End-to-end test: knowledge files to a completed answer.
//!
//! Uses the deterministic hash embedder for retrieval and a mock server
//! standing in for the Gemini completion API.

use std::sync::Arc;

use nexus_chat::{Assistant, GeminiCompleter};
use nexus_embeddings::HashEmbedder;
use nexus_retrieval::KnowledgeBase;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[tokio::test]
async fn test_question_flows_from_files_to_answer() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("lol_champions.txt"),
        "Garen deals 50 damage",
    )
    .unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "How much damage does Garen deal?" }] }
            ]
        })))
        .respond_with(|request: &Request| {
            // The retrieved chunk must have reached the system instruction.
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            let system = body["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap();
            assert!(system.contains("Garen deals 50 damage"));
            assert!(system.contains("--- [source: lol_champions.txt] ---"));

            ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    { "content": { "role": "model", "parts": [{ "text": "50, Summoner." }] } }
                ]
            }))
        })
        .expect(1)
        .mount(&server)
        .await;

    let base = Arc::new(
        KnowledgeBase::builder()
            .with_data_dir(temp_dir.path())
            .with_embedder(Arc::new(HashEmbedder::new().with_dimension(64)))
            .build()
            .unwrap(),
    );
    let completer = Arc::new(
        GeminiCompleter::new()
            .with_api_key("test-key")
            .with_base_url(server.uri()),
    );
    let assistant = Assistant::new(base, completer);

    let reply = assistant
        .answer("lol", "How much damage does Garen deal?", &[])
        .await
        .unwrap();

    assert_eq!(reply, "50, Summoner.");
}
