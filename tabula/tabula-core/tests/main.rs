#[cfg(test)]
mod tests {

    use tabula_core::contracts::{TabulaAttachment, TabulaChatRequest, TabulaExtractRequest};
    use serde_json::{from_value, json};

    #[test]
    fn test_chat_request_from_json() {

        let jdata = json!({
            "model": "gemini-2.5-flash",
            "context": "Quarterly report",
            "history": [
                {"role": "user", "content": "List the totals"},
                {"role": "assistant", "content": "Q1 | 10"},
                {"role": "user", "content": "And Q2?"}
            ]
        });

        let dx: TabulaChatRequest = from_value(jdata).unwrap();

        assert_eq!(dx.history.len(), 3);
        assert!(dx.history[2].is_user());
        assert!(dx.attachments.is_empty());
        assert_eq!(dx.context.as_deref(), Some("Quarterly report"));
    }

    #[test]
    fn test_extract_request_defaults() {
        let dx: TabulaExtractRequest = from_value(json!({"instruction": "Extract all questions"})).unwrap();

        assert!(dx.model.is_empty());
        assert!(dx.document.is_none());
        assert!(dx.generation_config.is_none());
    }

    #[test]
    fn test_attachment_mime_type() {
        let pdf = TabulaAttachment::new(vec![1, 2], Some("Paper.PDF".to_string()));
        assert_eq!(pdf.resolved_mime_type(), "application/pdf");

        let unknown = TabulaAttachment::new(vec![], None);
        assert_eq!(unknown.resolved_mime_type(), "application/octet-stream");

        let explicit = TabulaAttachment {
            mime_type: Some("image/webp".to_string()),
            ..TabulaAttachment::new(vec![], Some("scan.png".to_string()))
        };
        assert_eq!(explicit.resolved_mime_type(), "image/webp");
    }

}
