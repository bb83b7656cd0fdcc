use serde::{Deserialize, Serialize};

/// A binary payload sent to the model as inline data, e.g. the document to extract from.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TabulaAttachment {
    #[serde(with = "serde_bytes")]
    pub data: Vec<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TabulaAttachment {
    pub fn new(data: Vec<u8>, name: Option<String>) -> Self {
        Self {
            data,
            mime_type: None,
            name,
        }
    }

    /// The explicit MIME type, or one guessed from the file name.
    pub fn resolved_mime_type(&self) -> String {
        if let Some(mime) = self.mime_type.as_deref().filter(|m| !m.trim().is_empty()) {
            return mime.to_string();
        }
        let name = self.name.as_deref().unwrap_or_default().to_ascii_lowercase();
        let mime = match name.rsplit_once('.').map(|(_, ext)| ext) {
            Some("pdf") => "application/pdf",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("txt") => "text/plain",
            Some("csv") => "text/csv",
            _ => "application/octet-stream",
        };
        mime.to_string()
    }
}
