use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tabula_core::errors::TabulaError;

use crate::contracts::{GoogleClaims, ServiceAccount};
use crate::token::GOOGLE_TOKEN_URL;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Assertions are valid for one hour, the maximum the token endpoint accepts.
pub const ASSERTION_LIFETIME_SECS: i64 = 60 * 60;

/// Signs RS256 JWT assertions on behalf of a service account.
pub struct CredentialSigner {
    issuer: String,
    key: EncodingKey,
}

impl CredentialSigner {
    pub fn new(account: &ServiceAccount) -> Result<Self, TabulaError> {
        let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes()).map_err(|e| {
            TabulaError::CredentialFormat(format!("private_key is not a valid RSA PEM key: {e}"))
        })?;
        Ok(Self {
            issuer: account.client_email.clone(),
            key,
        })
    }

    pub fn sign(&self) -> Result<String, TabulaError> {
        self.sign_at(Utc::now())
    }

    pub fn sign_at(&self, now: DateTime<Utc>) -> Result<String, TabulaError> {
        let claims = self.claims_at(now);
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| TabulaError::CredentialFormat(format!("failed to sign assertion: {e}")))
    }

    pub fn claims_at(&self, now: DateTime<Utc>) -> GoogleClaims {
        GoogleClaims {
            iss: self.issuer.clone(),
            sub: self.issuer.clone(),
            aud: GOOGLE_TOKEN_URL.to_owned(),
            scope: CLOUD_PLATFORM_SCOPE.to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        }
    }
}
