use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt; // for `oneshot`

use parsebox::api::models::{ErrorResponse, HealthResponse, ParsersResponse};
use parsebox::api::state::AppState;
use parsebox::config::{ByteSize, Config};
use parsebox::observability::MetricsSnapshot;

/// Builds a test app with lenient JSON and a `*/*` text fallback
fn build_test_app() -> Router {
    let config_toml = r#"
[server]
max_body_bytes = 1024

[registry]
lenient_json = true
text_fallback = true
    "#;

    let config: Config = toml::from_str(config_toml).expect("Failed to parse test config");
    let registry = config.build_registry().expect("Failed to build registry");

    parsebox::api::router(AppState::new(config, registry))
}

fn post_parse(content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .uri("/parse")
        .method("POST")
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn order(response: &ParsersResponse) -> Vec<String> {
    response.media_types.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn test_parse_json() {
    let app = build_test_app();

    let response = app
        .oneshot(post_parse("application/json; charset=utf-8", r#"{"id": 7}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["media_type"], "application/json");
    assert_eq!(body["value"], json!({"id": 7}));
}

#[tokio::test]
async fn test_parse_falls_back_to_wildcard() {
    let app = build_test_app();

    // Not TOML, so the TOML parser fails and the `*/*` text parser takes it
    let response = app
        .oneshot(post_parse("application/toml", "= broken"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["media_type"], "*/*");
    assert_eq!(body["value"], "= broken");
}

#[tokio::test]
async fn test_parse_malformed_body() {
    let app = build_test_app();

    // Invalid UTF-8 defeats every candidate, including the text fallback
    let response = app
        .oneshot(post_parse("application/json", vec![b'{', 0xff]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.code, "MALFORMED_BODY");
}

#[tokio::test]
async fn test_parse_missing_content_type() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/parse")
        .method("POST")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.code, "INVALID_CONTENT_TYPE");
}

#[tokio::test]
async fn test_parse_body_too_large() {
    let app = build_test_app();

    let response = app
        .oneshot(post_parse("text/plain", vec![b'a'; 2048]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_parse_unsupported_media_type() {
    let config = Config::default();
    let registry = config.build_registry().unwrap();
    let app = parsebox::api::router(AppState::new(config, registry));

    let response = app
        .oneshot(post_parse("image/png", vec![0x89, b'P', b'N', b'G']))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.code, "UNSUPPORTED_MEDIA_TYPE");
}

#[tokio::test]
async fn test_list_parsers() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/parsers")
        .body(Body::empty())
        .unwrap();
    let response = ServiceExt::<Request<Body>>::oneshot(app.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let all: ParsersResponse = body_json(response).await;
    assert_eq!(
        order(&all),
        vec![
            "application/json",
            "application/toml",
            "text/plain",
            "application/json",
            "*/*"
        ]
    );

    let request = Request::builder()
        .uri("/parsers?media_type=text/plain")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let candidates: ParsersResponse = body_json(response).await;
    assert_eq!(order(&candidates), vec!["text/plain", "*/*"]);
}

#[tokio::test]
async fn test_set_priority_and_parse() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/parsers/priority")
        .method("PUT")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"media_types": ["*/*", "text/plain"]}).to_string(),
        ))
        .unwrap();
    let response = ServiceExt::<Request<Body>>::oneshot(app.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ParsersResponse = body_json(response).await;
    assert_eq!(order(&updated)[..2], ["*/*", "text/plain"]);

    // The text fallback now wins even for JSON
    let response = ServiceExt::<Request<Body>>::oneshot(
        app.clone(),
        post_parse("application/json", "[1]"),
    )
    .await
    .unwrap();
    let body: Value = body_json(response).await;
    assert_eq!(body["media_type"], "*/*");
    assert_eq!(body["value"], "[1]");

    let request = Request::builder()
        .uri("/operators/metrics")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let snapshot: MetricsSnapshot = body_json(response).await;
    assert_eq!(snapshot.reprioritized, 1);
    assert_eq!(snapshot.parsed, 1);
}

#[tokio::test]
async fn test_set_priority_not_found_keeps_partial_order() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/parsers/priority")
        .method("PUT")
        .body(Body::from(
            json!({"media_types": ["image/png", "text/plain"]}).to_string(),
        ))
        .unwrap();
    let response = ServiceExt::<Request<Body>>::oneshot(app.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .uri("/parsers")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let current: ParsersResponse = body_json(response).await;
    assert_eq!(order(&current)[0], "text/plain");
}

#[tokio::test]
async fn test_set_priority_atomic_not_found_keeps_order() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/parsers/priority")
        .method("PUT")
        .body(Body::from(
            json!({"media_types": ["image/png", "text/plain"], "atomic": true}).to_string(),
        ))
        .unwrap();
    let response = ServiceExt::<Request<Body>>::oneshot(app.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .uri("/parsers")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let current: ParsersResponse = body_json(response).await;
    assert_eq!(order(&current)[0], "application/json");
}

#[tokio::test]
async fn test_set_priority_invalid_payload() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/parsers/priority")
        .method("PUT")
        .body(Body::from(r#"{"media_types": ["bogus"]}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.code, "INVALID_PAYLOAD");
}

#[tokio::test]
async fn test_health() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = body_json(response).await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.parsers, 5);
}

#[test]
fn test_config_body_limit() {
    let config: Config = toml::from_str("[server]\nmax_body_bytes = \"2KB\"").unwrap();
    assert_eq!(config.server.max_body_bytes, ByteSize(2048));
}

#[tokio::test]
async fn test_parse_gzip_body() {
    use flate2::{Compression, write::GzEncoder};
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(br#"{"packed": true}"#).unwrap();
    let compressed = encoder.finish().unwrap();

    let request = Request::builder()
        .uri("/parse")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_ENCODING, "gzip")
        .body(Body::from(compressed))
        .unwrap();
    let response = build_test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["media_type"], "application/json");
    assert_eq!(body["value"], json!({"packed": true}));
}

#[tokio::test]
async fn test_list_parsers_invalid_query() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/parsers?media_type=bogus")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = body_json(response).await;
    assert_eq!(error.code, "INVALID_QUERY");
    assert!(error.message.contains("media_type"));
}

#[tokio::test]
async fn test_metrics_count_outcomes() {
    let app = build_test_app();

    // Invalid UTF-8 defeats every JSON candidate and the text fallback
    for (content_type, body, status) in [
        ("application/json", b"[]".to_vec(), StatusCode::OK),
        ("application/json", vec![0xff], StatusCode::UNPROCESSABLE_ENTITY),
        ("text/plain", b"ok".to_vec(), StatusCode::OK),
    ] {
        let response =
            ServiceExt::<Request<Body>>::oneshot(app.clone(), post_parse(content_type, body))
                .await
                .unwrap();
        assert_eq!(response.status(), status);
    }

    let request = Request::builder()
        .uri("/operators/metrics")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let snapshot: MetricsSnapshot = body_json(response).await;
    assert_eq!(
        snapshot,
        MetricsSnapshot {
            parsed: 2,
            parse_failed: 1,
            unsupported: 0,
            reprioritized: 0,
        }
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_parses() {
    let app = build_test_app();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let response = app
                    .oneshot(post_parse("application/json", format!("[{i}]")))
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::OK);
                let body: Value = body_json(response).await;
                assert_eq!(body["value"], json!([i]));
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
}
