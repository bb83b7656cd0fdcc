use tabula_client::{TabulaClientConfig, TabulaService};
use tabula_core::TabulaClient;
use tabula_core::contracts::{
    TabulaChatRequest, TabulaChatTurn, TabulaExtractRequest, TabulaGenerationReply,
};
use tabula_core::errors::TabulaError;
use tabula_core::logging::ITabulaLogger;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use serde_json::Value;
#[derive(Debug, Default)]
struct TestLogger {
    logs: Arc<Mutex<Vec<String>>>,
}
impl ITabulaLogger for TestLogger {
    fn log_request(&self, cid: Option<&str>, req_type: &str, model: &str, _json: Value) {
        let mut logs = self.logs.lock().unwrap();
        logs.push(format!("REQ: cid={:?}, type={}, model={}", cid, req_type, model));
    }
    fn log_response(&self, cid: Option<&str>, req_type: &str, model: &str, json: Value, _usage: Option<Value>) {
        let mut logs = self.logs.lock().unwrap();
        logs.push(format!("RES: cid={:?}, type={}, model={}, body={}", cid, req_type, model, json));
    }
    fn log_error(&self, cid: Option<&str>, req_type: &str, model: &str, kind: &str, _message: &str) {
        let mut logs = self.logs.lock().unwrap();
        logs.push(format!("ERR: cid={:?}, type={}, model={}, kind={}", cid, req_type, model, kind));
    }
}
struct MockClient;
#[async_trait]
impl TabulaClient for MockClient {
    async fn generate_extraction(&self, req: &TabulaExtractRequest) -> Result<TabulaGenerationReply, TabulaError> {
        Ok(TabulaGenerationReply {
            text: req.instruction.clone(),
            ..Default::default()
        })
    }
    async fn generate_chat(&self, _req: &TabulaChatRequest) -> Result<TabulaGenerationReply, TabulaError> {
        Err(TabulaError::provider_request(503, "overloaded"))
    }
}
#[tokio::test]
async fn test_logger_integration() {
    let logs = Arc::new(Mutex::new(Vec::new()));
    let logger = Arc::new(TestLogger { logs: logs.clone() });

    let config = TabulaClientConfig {
        logger: Some(logger),
        ..Default::default()
    };
    let service = TabulaService::with_client(Arc::new(MockClient), config);
    // Successful extraction
    let req = TabulaExtractRequest {
        model: "gemini-test".to_string(),
        correlation_id: Some("cid1".to_string()),
        instruction: "[{\"a\":\"1\"},{\"a\":\"2\"}]".to_string(),
        ..Default::default()
    };
    service.extract(req).await.unwrap();
    {
        let l = logs.lock().unwrap();
        assert!(l.contains(&"REQ: cid=Some(\"cid1\"), type=extract, model=gemini-test".to_string()));
        assert!(l.contains(&"RES: cid=Some(\"cid1\"), type=extract, model=gemini-test, body={\"rows\":2,\"strategy\":\"json_extraction\"}".to_string()));
    }
    // Unparsable extraction
    let req = TabulaExtractRequest {
        model: "gemini-test".to_string(),
        correlation_id: Some("cid2".to_string()),
        instruction: "nothing tabular here".to_string(),
        ..Default::default()
    };
    assert!(service.extract(req).await.is_err());
    {
        let l = logs.lock().unwrap();
        assert!(l.contains(&"ERR: cid=Some(\"cid2\"), type=extract, model=gemini-test, kind=unparsable_response".to_string()));
    }
    // Failed chat
    let chat = TabulaChatRequest {
        model: "gemini-test".to_string(),
        correlation_id: Some("cid3".to_string()),
        history: vec![TabulaChatTurn::user("hi")],
        ..Default::default()
    };
    assert!(service.chat(chat).await.is_err());
    {
        let l = logs.lock().unwrap();
        assert!(l.contains(&"REQ: cid=Some(\"cid3\"), type=chat, model=gemini-test".to_string()));
        assert!(l.contains(&"ERR: cid=Some(\"cid3\"), type=chat, model=gemini-test, kind=provider_request".to_string()));
    }
}
