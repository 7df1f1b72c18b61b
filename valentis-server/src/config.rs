use crate::error::ServerError;
use std::net::SocketAddr;
use std::path::PathBuf;
use valentis_core::config::DEFAULT_API_BASE;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_DIST: &str = "dist";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directory holding the built UI bundle (`index.html` plus assets).
    pub dist: PathBuf,
    /// Base path the browser uses for API calls; published in `/config.json`.
    pub api_base: String,
    /// Where proxied API calls go, e.g. `http://localhost:8000/api`.
    pub upstream: Option<String>,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = read("VALENTIS_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind = bind_raw.parse().map_err(|_| ServerError::InvalidConfig {
            key: "VALENTIS_BIND",
            value: bind_raw.clone(),
        })?;

        let max_upload_mb = match read("VALENTIS_MAX_UPLOAD_MB") {
            Some(raw) => raw.parse::<usize>().map_err(|_| ServerError::InvalidConfig {
                key: "VALENTIS_MAX_UPLOAD_MB",
                value: raw,
            })?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };

        let api_base = read("VALENTIS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into());

        Ok(Self {
            bind,
            dist: read("VALENTIS_DIST").unwrap_or_else(|| DEFAULT_DIST.into()).into(),
            api_base: valentis_core::ClientConfig::with_api_base(&api_base).api_base,
            upstream: read("VALENTIS_API_UPSTREAM").map(|u| u.trim_end_matches('/').to_string()),
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
        })
    }

    /// Mount point for the proxy; only a same-origin base can be served here.
    pub fn proxy_mount(&self) -> Option<&str> {
        self.api_base.starts_with('/').then_some(self.api_base.as_str())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            dist: DEFAULT_DIST.into(),
            api_base: DEFAULT_API_BASE.into(),
            upstream: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}
