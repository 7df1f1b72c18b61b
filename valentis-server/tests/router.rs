use axum::body::{to_bytes, Body};
use axum::extract::Path;
use axum::http::{header, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceExt;
use valentis_server::{app_router, ServerConfig};

fn config_with(dist: &std::path::Path, upstream: Option<String>) -> ServerConfig {
    ServerConfig {
        dist: dist.to_path_buf(),
        upstream,
        ..ServerConfig::default()
    }
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Minimal stand-in for the analytics backend, on an ephemeral port.
async fn spawn_backend() -> String {
    let backend = Router::new()
        .route(
            "/api/risk/scores/:id",
            get(|Path(id): Path<String>| async move {
                Json(serde_json::json!({ "account_id": id, "risk_score": 71.5 }))
            }),
        )
        .route(
            "/api/upload/files/:name",
            get(|Path(name): Path<String>| async move {
                (
                    [
                        (header::CONTENT_TYPE, "text/csv".to_string()),
                        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{name}\"")),
                        (header::CACHE_CONTROL, "no-store".to_string()),
                    ],
                    "account_id,patient_balance\n1001,250.0\n",
                )
            }),
        )
        .route(
            "/api/upload",
            post(|body: axum::body::Bytes| async move {
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "detail": format!("missing accounts.csv ({} bytes)", body.len()) })),
                )
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend).await.unwrap();
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn publishes_client_config() {
    let dist = tempfile::tempdir().unwrap();
    let response = app_router(config_with(dist.path(), None))
        .oneshot(get_req("/config.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, serde_json::json!({ "api_base": "/api" }));
}

#[tokio::test]
async fn client_routes_fall_back_to_index() {
    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("index.html"), "<html>valentis</html>").unwrap();
    std::fs::write(dist.path().join("valentis-ui.js"), "export default 1;").unwrap();
    let app = app_router(config_with(dist.path(), None));

    let page = app.clone().oneshot(get_req("/audit/user/u-17")).await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    assert!(body_text(page).await.contains("valentis"));

    let asset = app.oneshot(get_req("/valentis-ui.js")).await.unwrap();
    assert_eq!(asset.status(), StatusCode::OK);
    assert_eq!(body_text(asset).await, "export default 1;");
}

#[tokio::test]
async fn proxy_without_upstream_is_bad_gateway() {
    let dist = tempfile::tempdir().unwrap();
    let response = app_router(config_with(dist.path(), None))
        .oneshot(get_req("/api/risk/scores"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["detail"], "API upstream not configured");
}

#[tokio::test]
async fn proxy_forwards_path_and_relays_status() {
    let upstream = spawn_backend().await;
    let dist = tempfile::tempdir().unwrap();
    let app = app_router(config_with(dist.path(), Some(upstream)));

    let found = app.clone().oneshot(get_req("/api/risk/scores/A%2017")).await.unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(
        found.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body: serde_json::Value = serde_json::from_str(&body_text(found).await).unwrap();
    assert_eq!(body["account_id"], "A 17");

    let rejected = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upload")
                .body(Body::from("abc"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_text(rejected).await).unwrap();
    assert_eq!(body["detail"], "missing accounts.csv (3 bytes)");
}

#[tokio::test]
async fn oversized_uploads_are_refused() {
    let upstream = spawn_backend().await;
    let dist = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        max_upload_bytes: 8,
        ..config_with(dist.path(), Some(upstream))
    };
    let response = app_router(config)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upload")
                .body(Body::from(vec![b'x'; 64]))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn proxy_relays_upstream_response_headers() {
    let upstream = spawn_backend().await;
    let dist = tempfile::tempdir().unwrap();
    let response = app_router(config_with(dist.path(), Some(upstream)))
        .oneshot(get_req("/api/upload/files/accounts.csv"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/csv");
    assert_eq!(
        headers.get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"accounts.csv\""
    );
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    assert!(headers.get(header::CONNECTION).is_none());
    assert_eq!(body_text(response).await, "account_id,patient_balance\n1001,250.0\n");
}
