use std::path::Path;

use serde::{Deserialize, Serialize};
use tabula_core::errors::TabulaError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceAccount {
    pub private_key: String,
    pub client_email: String,
}

#[derive(Deserialize)]
struct RawServiceAccount {
    private_key: Option<String>,
    client_email: Option<String>,
}

impl ServiceAccount {
    /// Parses a service-account key file body. Unknown fields are ignored.
    pub fn from_json(secret: &str) -> Result<ServiceAccount, TabulaError> {
        Self::from_secret(Some(secret))
    }

    /// Like [`ServiceAccount::from_json`], but also rejects a missing secret.
    pub fn from_secret(secret: Option<&str>) -> Result<ServiceAccount, TabulaError> {
        let secret = secret
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| TabulaError::CredentialFormat("service account secret is not set".to_string()))?;

        let raw: RawServiceAccount = serde_json::from_str(secret).map_err(|e| {
            TabulaError::CredentialFormat(format!("service account secret is not valid JSON: {e}"))
        })?;

        let client_email = raw
            .client_email
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| TabulaError::CredentialFormat("service account is missing client_email".to_string()))?;
        let private_key = raw
            .private_key
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| TabulaError::CredentialFormat("service account is missing private_key".to_string()))?;

        Ok(ServiceAccount {
            private_key,
            client_email,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<ServiceAccount, TabulaError> {
        let path = path.as_ref();
        let secret = std::fs::read_to_string(path).map_err(|e| {
            TabulaError::CredentialFormat(format!("failed to read service account file {}: {e}", path.display()))
        })?;
        Self::from_json(&secret)
    }
}
