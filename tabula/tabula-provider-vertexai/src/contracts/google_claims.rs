use serde::{Deserialize, Serialize};

/// Claims of the self-signed assertion traded for an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GoogleClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub scope: String,
    pub iat: i64,
    pub exp: i64,
}
