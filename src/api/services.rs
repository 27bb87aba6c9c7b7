use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use bytes::Bytes;
use tracing::{debug, info};

use super::{
    models::{HealthResponse, ParsersQuery, ParsersResponse, PriorityRequest},
    state::AppState,
    utils,
};
use crate::api::error::ApiError;
use crate::media::MediaType;
use crate::parsers::RegistryError;

/// Decode the request body with the registry (POST /parse)
///
/// The Content-Type header selects candidate parsers; the response carries
/// the media type of the binding that accepted the body.
pub async fn parse_body(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    let media_type = utils::content_type(&headers)?;
    let max_size = state.config.server.max_body_bytes.as_usize();
    let data = utils::read_body(body, max_size).await?;

    // Parsing is CPU-bound, keep it off the async workers
    let registry = state.registry.clone();
    let query = media_type.clone();
    let body_bytes = data.clone();
    let result =
        tokio::task::spawn_blocking(move || registry.blocking_read().parse(&body_bytes, &query))
            .await
            .map_err(|err| ApiError::Internal(format!("parse task failed: {err}")))?;

    match result {
        Ok(parsed) => {
            state.metrics.parsed();
            debug!(
                query = %media_type,
                matched = %parsed.media_type,
                bytes = data.len(),
                "Body parsed"
            );
            Ok((StatusCode::OK, Json(parsed)))
        }
        Err(err) => {
            match err {
                RegistryError::NoSuitableParser(_) => state.metrics.unsupported(),
                _ => state.metrics.parse_failed(),
            }
            info!(query = %media_type, error = %err, "Body rejected");
            Err(err.into())
        }
    }
}

/// Registered media types in priority order (GET /parsers)
///
/// With `?media_type=...` only the candidates for that media type are listed.
pub async fn list_parsers(
    State(state): State<AppState>,
    Query(query): Query<ParsersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let registry = state.registry.read().await;

    let media_types = match query.media_type {
        Some(ref raw) => {
            let media_type = raw
                .parse::<MediaType>()
                .map_err(|err| ApiError::InvalidQuery(format!("media_type: {err}")))?;
            registry
                .parsers_for(&media_type)
                .into_iter()
                .map(|binding| binding.media_type().clone())
                .collect()
        }
        None => registry
            .bindings()
            .iter()
            .map(|binding| binding.media_type().clone())
            .collect(),
    };

    Ok(Json(ParsersResponse { media_types }))
}

/// Reorder the registry (PUT /parsers/priority)
///
/// Without `atomic`, moves made before a missing media type is hit stay
/// applied even though the request fails.
pub async fn set_priority(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: PriorityRequest = serde_json::from_slice(&body)?;

    let mut registry = state.registry.write().await;
    if request.atomic {
        registry.set_priority_atomic(&request.media_types)?;
    } else {
        registry.set_priority(&request.media_types)?;
    }
    state.metrics.reprioritized();

    let media_types: Vec<_> = registry.media_types().into_iter().cloned().collect();
    info!(
        order = ?media_types.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "Parser priority updated"
    );

    Ok(Json(ParsersResponse { media_types }))
}

/// Parse counters (GET /operators/metrics)
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

/// Health check endpoint (GET /health)
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let parsers = state.registry.read().await.len();

    let response = HealthResponse {
        status: "healthy".to_string(),
        parsers,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
