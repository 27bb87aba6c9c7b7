//! API utility functions
//!
//! Pure, stateless helpers for HTTP request processing.

use axum::http::{HeaderMap, header};
use http_body_util::{BodyExt, LengthLimitError, Limited};

use crate::api::error::ApiError;
use crate::media::MediaType;

/// Reads the Content-Type header as a [`MediaType`]
///
/// Parameters such as `charset` are kept; registry matching ignores them.
pub fn content_type(headers: &HeaderMap) -> Result<MediaType, ApiError> {
    let value = headers
        .get(header::CONTENT_TYPE)
        .ok_or_else(|| ApiError::InvalidContentType("missing Content-Type header".into()))?
        .to_str()
        .map_err(|_| ApiError::InvalidContentType("Content-Type is not ASCII".into()))?;

    parse_content_type(value)
}

pub fn parse_content_type(content_type: &str) -> Result<MediaType, ApiError> {
    content_type
        .parse()
        .map_err(|_| ApiError::InvalidContentType(content_type.to_string()))
}

/// Collects the request body, failing once it grows past `max_size`
///
/// Decompression already happened in `RequestDecompressionLayer`, so the
/// limit applies to decoded bytes.
pub async fn read_body(body: axum::body::Body, max_size: usize) -> Result<bytes::Bytes, ApiError> {
    let collected = Limited::new(body, max_size).collect().await.map_err(|err| {
        if err.downcast_ref::<LengthLimitError>().is_some() {
            ApiError::PayloadTooLarge(max_size)
        } else {
            ApiError::Internal(err.to_string())
        }
    })?;

    Ok(collected.to_bytes())
}
