use serde::{Deserialize, Serialize};

use super::TabulaAttachment;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabulaChatTurn {
    pub role: String,

    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<TabulaAttachment>,
}

impl TabulaChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            attachments: vec![],
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            attachments: vec![],
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

impl Default for TabulaChatTurn {
    fn default() -> Self {
        Self::user(String::new())
    }
}
