pub mod service_account;
pub use service_account::ServiceAccount;

pub mod google_claims;
pub use google_claims::GoogleClaims;

pub mod models;
pub use models::{
    GoogleGenerateRequest,
    GoogleContent,
    GooglePart,
    GoogleInlineData,
    GoogleParameters,
    GoogleGenerateResponse,
    GoogleCandidate,
    GoogleUsageMetadata,
    GoogleTokenResponse
};
