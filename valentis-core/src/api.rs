//! Typed client for the risk-intelligence backend.
//!
//! One method per endpoint, one request per call: no retries, no timeouts,
//! no caching. The wire itself sits behind [`Transport`] so the browser
//! bundle plugs in `fetch` while tests script responses in memory.

use crate::dto::{
    AccessAlerts, AnomalyAlerts, AuditLogs, CurrentCode, DepartmentDetail, ExportLogs,
    FilePreview, Forecast, FraudAlerts, Heatmap, LoginRequest, PaymentHistory, PaymentPlan,
    PaymentPlans, RiskScore, RiskScores, TotpChallenge, UploadResult, User, UserActivity,
    VerifyTotpRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody<F> {
    Empty,
    Json(serde_json::Value),
    /// Multipart form; every file goes under the same field name.
    Files { field: &'static str, files: Vec<F> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest<F> {
    pub method: Method,
    /// Relative to the API base, already percent-encoded.
    pub path: String,
    pub body: RequestBody<F>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request over the wire.
///
/// `File` is whatever handle the platform uses for user-selected files.
/// Errors are transport-level only (unreachable host, aborted request);
/// non-2xx statuses come back as ordinary responses.
pub trait Transport {
    type File;

    fn send(
        &self,
        request: ApiRequest<Self::File>,
    ) -> impl Future<Output = Result<ApiResponse, String>>;
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend returned {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// 200 payload carrying `{"error": ...}` instead of the resource.
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    /// Message for the page: the backend's explanation when it gave one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::NotFound(message) if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
            || matches!(self, ApiError::Status { status: 404, .. })
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

/// Pulls `detail` out of an error body; FastAPI validation errors carry a
/// list whose first `msg` is the useful part.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string),
        _ => None,
    }
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute(&self, request: ApiRequest<T::File>) -> Result<String, ApiError> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(ApiError::Transport)?;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(ApiError::Status {
                status: response.status,
                detail: error_detail(&response.body),
            })
        }
    }

    async fn get<R: DeserializeOwned>(&self, path: String) -> Result<R, ApiError> {
        let body = self
            .execute(ApiRequest {
                method: Method::Get,
                path,
                body: RequestBody::Empty,
            })
            .await?;
        decode(&body)
    }

    /// GET for lookups that answer a miss with `200 {"error": ...}`.
    async fn lookup<R: DeserializeOwned>(&self, path: String) -> Result<R, ApiError> {
        let body = self
            .execute(ApiRequest {
                method: Method::Get,
                path,
                body: RequestBody::Empty,
            })
            .await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        if let Some(error) = value.get("error") {
            let message = error.as_str().map(ToString::to_string).unwrap_or_default();
            return Err(ApiError::NotFound(message));
        }
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B, R>(&self, path: &str, payload: &B) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let json = serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        let body = self
            .execute(ApiRequest {
                method: Method::Post,
                path: path.to_string(),
                body: RequestBody::Json(json),
            })
            .await?;
        decode(&body)
    }

    async fn post_files(
        &self,
        path: &str,
        field: &'static str,
        files: Vec<T::File>,
    ) -> Result<UploadResult, ApiError> {
        let body = self
            .execute(ApiRequest {
                method: Method::Post,
                path: path.to_string(),
                body: RequestBody::Files { field, files },
            })
            .await?;
        decode(&body)
    }

    // --- auth ---

    pub async fn login(&self, email: &str, password: &str) -> Result<TotpChallenge, ApiError> {
        self.post_json("/auth/login", &LoginRequest { email, password })
            .await
    }

    /// Demo helper: the code the backend currently expects for `email`.
    pub async fn current_code(&self, email: &str) -> Result<CurrentCode, ApiError> {
        self.get(format!("/auth/current-code/{}", segment(email)))
            .await
    }

    pub async fn verify_totp(&self, email: &str, code: &str) -> Result<User, ApiError> {
        self.post_json("/auth/verify-totp", &VerifyTotpRequest { email, code })
            .await
    }

    // --- risk ---

    pub async fn risk_scores(&self) -> Result<RiskScores, ApiError> {
        self.get("/risk/scores".into()).await
    }

    pub async fn account_risk(&self, account_id: &str) -> Result<RiskScore, ApiError> {
        self.lookup(format!("/risk/scores/{}", segment(account_id)))
            .await
    }

    // --- fraud / anomaly / forecast ---

    pub async fn fraud_alerts(&self) -> Result<FraudAlerts, ApiError> {
        self.get("/fraud/alerts".into()).await
    }

    pub async fn anomaly_alerts(&self) -> Result<AnomalyAlerts, ApiError> {
        self.get("/anomaly/alerts".into()).await
    }

    pub async fn heatmap(&self) -> Result<Heatmap, ApiError> {
        self.get("/anomaly/heatmap".into()).await
    }

    pub async fn department(&self, name: &str) -> Result<DepartmentDetail, ApiError> {
        self.get(format!("/anomaly/department?name={}", segment(name)))
            .await
    }

    pub async fn forecast(&self) -> Result<Forecast, ApiError> {
        self.get("/forecast".into()).await
    }

    // --- plans ---

    pub async fn plans(&self) -> Result<PaymentPlans, ApiError> {
        self.get("/plans".into()).await
    }

    pub async fn payment_plan(&self, account_id: &str) -> Result<PaymentPlan, ApiError> {
        self.lookup(format!("/plans/{}", segment(account_id)))
            .await
    }

    pub async fn payment_history(&self, account_id: &str) -> Result<PaymentHistory, ApiError> {
        self.get(format!("/plans/{}/history", segment(account_id)))
            .await
    }

    // --- audit ---

    pub async fn audit_logs(&self) -> Result<AuditLogs, ApiError> {
        self.get("/audit/logs".into()).await
    }

    pub async fn access_alerts(&self) -> Result<AccessAlerts, ApiError> {
        self.get("/audit/access".into()).await
    }

    pub async fn export_logs(&self) -> Result<ExportLogs, ApiError> {
        self.get("/audit/exports".into()).await
    }

    pub async fn user_activity(&self, user_id: &str) -> Result<UserActivity, ApiError> {
        self.get(format!("/audit/user/{}", segment(user_id)))
            .await
    }

    // --- upload ---

    /// Posts every selected file (CSV or ZIP) as one multipart batch.
    pub async fn upload(&self, files: Vec<T::File>) -> Result<UploadResult, ApiError> {
        self.post_files("/upload", "files", files).await
    }

    pub async fn upload_single(&self, file: T::File) -> Result<UploadResult, ApiError> {
        self.post_files("/upload", "file", vec![file]).await
    }

    pub async fn upload_multi(&self, files: Vec<T::File>) -> Result<UploadResult, ApiError> {
        self.post_files("/upload/multi", "files", files).await
    }

    pub async fn file_preview(&self, filename: &str) -> Result<FilePreview, ApiError> {
        self.get(format!("/upload/files/{}", segment(filename)))
            .await
    }
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
