use serde_json::Value;
use thiserror::Error;

/// Parser errors
///
/// Surfaced unchanged by [`ParserRegistry::parse`](super::ParserRegistry::parse)
/// when the last candidate fails.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed toml: {0}")]
    Toml(#[from] ::toml::de::Error),
    #[error("input rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Decodes raw bytes of one content type into structured data
///
/// Implementations are shared between bindings and threads, so they must be
/// stateless or synchronize their own state.
pub trait MediaTypeParser: Send + Sync {
    fn parse(&self, data: &[u8]) -> Result<Value, ParseError>;
}
