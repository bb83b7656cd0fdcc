use serde_json::Value;
use std::fmt::Debug;
pub trait ITabulaLogger: Send + Sync + Debug {
    fn log_request(
        &self,
        correlation_id: Option<&str>,
        request_type: &str,
        model: &str,
        request_json: Value,
    );
    fn log_response(
        &self,
        correlation_id: Option<&str>,
        request_type: &str,
        model: &str,
        response_json: Value,
        usage: Option<Value>,
    );
    fn log_error(
        &self,
        correlation_id: Option<&str>,
        request_type: &str,
        model: &str,
        kind: &str,
        message: &str,
    );
}
#[derive(Debug, Default)]
pub struct ConsoleTabulaLogger;
impl ITabulaLogger for ConsoleTabulaLogger {
    fn log_request(
        &self,
        correlation_id: Option<&str>,
        request_type: &str,
        model: &str,
        request_json: Value,
    ) {
        let cid = correlation_id.unwrap_or("none");
        tracing::info!(
            cid,
            request_type,
            model,
            request = %request_json,
            "tabula request"
        );
    }
    fn log_response(
        &self,
        correlation_id: Option<&str>,
        request_type: &str,
        model: &str,
        response_json: Value,
        usage: Option<Value>,
    ) {
        let cid = correlation_id.unwrap_or("none");
        let usage_str = usage.map(|u| u.to_string()).unwrap_or_else(|| "none".to_string());
        tracing::info!(
            cid,
            request_type,
            model,
            response = %response_json,
            usage = %usage_str,
            "tabula response"
        );
    }
    fn log_error(
        &self,
        correlation_id: Option<&str>,
        request_type: &str,
        model: &str,
        kind: &str,
        message: &str,
    ) {
        let cid = correlation_id.unwrap_or("none");
        tracing::warn!(cid, request_type, model, kind, message, "tabula failure");
    }
}
