#![allow(dead_code)]

use axum::Router;
use serde_json::{Value, json};
use tabula_provider_vertexai::contracts::ServiceAccount;

pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_key.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../fixtures/test_key.pub.pem");
pub const TEST_EMAIL: &str = "extractor@tabula-test.iam.gserviceaccount.com";

pub fn test_account() -> ServiceAccount {
    ServiceAccount {
        private_key: TEST_PRIVATE_KEY.to_string(),
        client_email: TEST_EMAIL.to_string(),
    }
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{addr}")
}

pub fn generate_body(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": { "role": "model", "parts": [ { "text": text } ] },
                "finishReason": "STOP"
            }
        ],
        "usageMetadata": {
            "promptTokenCount": 120,
            "candidatesTokenCount": 30,
            "totalTokenCount": 150
        }
    })
}
