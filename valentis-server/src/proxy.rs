use crate::config::ServerConfig;
use crate::error::ServerError;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderMap, HeaderName, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use valentis_core::ClientConfig;

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    client: reqwest::Client,
}

/// Static bundle with client-route fallback, `/config.json`, and the API
/// proxy under the configured base.
pub fn app_router(config: ServerConfig) -> Router {
    let bundle = ServeDir::new(&config.dist).fallback(ServeFile::new(config.dist.join("index.html")));
    let proxy_route = config
        .proxy_mount()
        .map(|mount| format!("{mount}/*rest"));
    let body_limit = config.max_upload_bytes;

    let state = AppState {
        config: Arc::new(config),
        client: reqwest::Client::new(),
    };

    let mut router = Router::new().route("/config.json", get(client_config));
    if let Some(path) = proxy_route {
        router = router.route(&path, any(proxy).layer(DefaultBodyLimit::max(body_limit)));
    }
    router
        .fallback_service(bundle)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig::with_api_base(&state.config.api_base))
}

async fn proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServerError> {
    let upstream = state
        .config
        .upstream
        .as_deref()
        .ok_or(ServerError::UpstreamNotConfigured)?;
    let url = upstream_url(upstream, &state.config.api_base, &uri);
    tracing::debug!(%method, %url, "proxying");

    let response = state
        .client
        .request(method, &url)
        .headers(forwarded(&headers))
        .body(body)
        .send()
        .await?;

    let status = response.status();
    let headers = end_to_end(response.headers());
    let bytes = response.bytes().await?;
    Ok((status, headers, bytes).into_response())
}

/// Keeps the path exactly as the browser encoded it.
fn upstream_url(upstream: &str, mount: &str, uri: &Uri) -> String {
    let path = uri.path();
    let rest = path.strip_prefix(mount).unwrap_or(path);
    match uri.query() {
        Some(query) => format!("{upstream}{rest}?{query}"),
        None => format!("{upstream}{rest}"),
    }
}

const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Copies `headers` minus connection-scoped ones. Content length is
/// recomputed for whichever body ends up being sent.
fn end_to_end(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for hop in HOP_BY_HOP.iter().chain([&header::CONTENT_LENGTH]) {
        out.remove(hop);
    }
    out
}

fn forwarded(headers: &HeaderMap) -> HeaderMap {
    let mut out = end_to_end(headers);
    out.remove(header::HOST);
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_url_keeps_encoding_and_query() {
        let uri: Uri = "/api/anomaly/department?name=ICU%20North".parse().unwrap();
        assert_eq!(
            upstream_url("http://backend:8000/api", "/api", &uri),
            "http://backend:8000/api/anomaly/department?name=ICU%20North"
        );

        let uri: Uri = "/api/upload/files/accounts%2Bold.csv".parse().unwrap();
        assert_eq!(
            upstream_url("http://backend:8000", "/api", &uri),
            "http://backend:8000/upload/files/accounts%2Bold.csv"
        );
    }

    #[test]
    fn hop_headers_are_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "localhost:8080".parse().unwrap());
        headers.insert(header::CONTENT_LENGTH, "12".parse().unwrap());
        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        let out = forwarded(&headers);
        assert!(out.get(header::HOST).is_none());
        assert!(out.get(header::CONTENT_LENGTH).is_none());
        assert_eq!(out.get(header::CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn upstream_headers_are_relayed_without_hop_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "text/csv".parse().unwrap());
        headers.insert(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"plans.csv\"".parse().unwrap(),
        );
        headers.insert(header::CACHE_CONTROL, "no-store".parse().unwrap());
        headers.insert(header::CONTENT_ENCODING, "gzip".parse().unwrap());
        headers.insert(header::CONNECTION, "keep-alive".parse().unwrap());
        headers.insert("keep-alive", "timeout=5".parse().unwrap());
        headers.insert(header::TRANSFER_ENCODING, "chunked".parse().unwrap());
        headers.insert(header::CONTENT_LENGTH, "42".parse().unwrap());

        let out = end_to_end(&headers);
        assert_eq!(out.get(header::CONTENT_TYPE).unwrap(), "text/csv");
        assert_eq!(
            out.get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"plans.csv\""
        );
        assert_eq!(out.get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert_eq!(out.get(header::CONTENT_ENCODING).unwrap(), "gzip");
        for hop in ["connection", "keep-alive", "transfer-encoding", "content-length"] {
            assert!(out.get(hop).is_none(), "{hop} was relayed");
        }
    }
}
