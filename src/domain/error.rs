use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiTestError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Expected status {expected} but got {actual}, body: {body}")]
    StatusMismatch {
        expected: u16,
        actual: u16,
        body: String,
    },
    #[error("Field `{path}` expected {expected} but got {actual}")]
    FieldMismatch {
        path: String,
        expected: serde_json::Value,
        actual: serde_json::Value,
    },
    #[error("Field `{0}` missing from response body")]
    MissingField(String),
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiTestError>;
