pub mod contracts;
pub mod credentials;
pub mod token;
pub mod vertexai_client;
