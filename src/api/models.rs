//! Request and response bodies of the HTTP host
//!
//! - `POST /parse` answers with [`Parsed`](crate::parsers::Parsed)
//! - `GET /parsers` answers with [`ParsersResponse`]
//! - `PUT /parsers/priority` takes a [`PriorityRequest`]

use serde::{Deserialize, Serialize};

use crate::media::MediaType;

/// Query of `GET /parsers`
#[derive(Debug, Default, Deserialize)]
pub struct ParsersQuery {
    /// Only list bindings matching this media type
    pub media_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParsersResponse {
    /// Media types in priority order
    pub media_types: Vec<MediaType>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriorityRequest {
    /// Highest priority first
    pub media_types: Vec<MediaType>,
    /// Reject the whole request, unchanged, if any media type is missing
    #[serde(default)]
    pub atomic: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub parsers: usize,
    pub version: String,
}
