use futures::executor::block_on;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use valentis_core::api::{ApiRequest, ApiResponse, Method, RequestBody};
use valentis_core::dto::{RiskCategory, UploadStatus};
use valentis_core::views::{files_loaded, upload_outcome};
use valentis_core::{ApiClient, ApiError, Transport};

/// Replays canned responses in order and records what was sent.
#[derive(Default)]
struct Scripted {
    replies: RefCell<VecDeque<Result<ApiResponse, String>>>,
    sent: RefCell<Vec<ApiRequest<String>>>,
}

impl Scripted {
    fn reply(self, status: u16, body: serde_json::Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    fn fail(self, message: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(message.to_string()));
        self
    }
}

impl Transport for Scripted {
    type File = String;

    async fn send(&self, request: ApiRequest<String>) -> Result<ApiResponse, String> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply".into()))
    }
}

fn client(transport: Scripted) -> ApiClient<Scripted> {
    ApiClient::new(transport)
}

fn last_sent(client: &ApiClient<Scripted>) -> ApiRequest<String> {
    client.transport().sent.borrow().last().cloned().unwrap()
}

#[test]
fn rejected_upload_surfaces_detail() {
    let api = client(Scripted::default().reply(400, json!({"detail": "missing accounts.csv"})));
    let outcome = upload_outcome(block_on(api.upload(vec!["payments.csv".into()])));

    assert_eq!(outcome.heading(), "Upload Failed");
    assert_eq!(outcome.message, "missing accounts.csv");
    assert_eq!(outcome.status, UploadStatus::Error);
}

#[test]
fn upload_sends_every_file_under_files_field() {
    let api = client(Scripted::default().reply(
        200,
        json!({
            "status": "success",
            "message": "Data loaded successfully",
            "files_found": ["accounts.csv", "payments.csv"]
        }),
    ));
    let files = vec!["accounts.csv".to_string(), "payments.csv".to_string()];
    let outcome = upload_outcome(block_on(api.upload(files.clone())));

    assert_eq!(outcome.heading(), "Upload Successful");
    assert_eq!(
        files_loaded(&outcome).as_deref(),
        Some("Files loaded: accounts.csv, payments.csv")
    );
    let sent = last_sent(&api);
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.path, "/upload");
    assert_eq!(
        sent.body,
        RequestBody::Files {
            field: "files",
            files
        }
    );
}

#[test]
fn single_and_multi_uploads_use_their_own_shapes() {
    let ok = json!({"status": "success", "message": "ok"});
    let api = client(Scripted::default().reply(200, ok.clone()).reply(200, ok));

    block_on(api.upload_single("bundle.zip".into())).unwrap();
    assert_eq!(
        last_sent(&api).body,
        RequestBody::Files {
            field: "file",
            files: vec!["bundle.zip".into()]
        }
    );

    block_on(api.upload_multi(vec!["a.csv".into()])).unwrap();
    assert_eq!(last_sent(&api).path, "/upload/multi");
}

#[test]
fn login_posts_credentials_as_json() {
    let api = client(Scripted::default().reply(
        200,
        json!({
            "status": "totp_required",
            "email": "auditor@hospital.org",
            "name": "Maria Thompson",
            "totp_secret": "GEZDGNBVGY3TQOJQ",
            "qr_code": "data:image/png;base64,AAAA"
        }),
    ));
    let challenge = block_on(api.login("auditor@hospital.org", "Auditor2024!")).unwrap();
    assert_eq!(challenge.name, "Maria Thompson");

    let sent = last_sent(&api);
    assert_eq!(sent.path, "/auth/login");
    assert_eq!(
        sent.body,
        RequestBody::Json(json!({"email": "auditor@hospital.org", "password": "Auditor2024!"}))
    );
}

#[test]
fn bad_credentials_keep_backend_message() {
    let api = client(Scripted::default().reply(401, json!({"detail": "Invalid email or password"})));
    let err = block_on(api.login("x@y.z", "wrong")).unwrap_err();
    assert_eq!(err.user_message("Login failed"), "Invalid email or password");
}

#[test]
fn missing_account_is_not_found() {
    let api = client(Scripted::default().reply(200, json!({"error": "Account not found"})));
    let err = block_on(api.account_risk("ACC-404")).unwrap_err();
    assert_eq!(err, ApiError::NotFound("Account not found".into()));
    assert!(err.is_not_found());
}

#[test]
fn account_lookup_decodes_score() {
    let api = client(Scripted::default().reply(
        200,
        json!({
            "account_id": "ACC-1001",
            "risk_score": 82.4,
            "risk_category": "High",
            "expected_collection_probability": 35.0,
            "patient_balance": 4200.5
        }),
    ));
    let score = block_on(api.account_risk("ACC-1001")).unwrap();
    assert_eq!(score.risk_category, RiskCategory::High);
    assert_eq!(last_sent(&api).path, "/risk/scores/ACC-1001");
}

#[test]
fn path_and_query_values_are_encoded() {
    let dept = json!({
        "department": "Emergency Dept",
        "summary": {"department": "Emergency Dept", "risk_score": 71.0, "severity": "critical"},
        "accounts": [],
        "columns": [],
        "total_accounts": 0
    });
    let api = client(
        Scripted::default()
            .reply(200, dept)
            .reply(200, json!({"code": "123456", "remaining_seconds": 12})),
    );

    block_on(api.department("Emergency Dept")).unwrap();
    assert_eq!(last_sent(&api).path, "/anomaly/department?name=Emergency%20Dept");

    let code = block_on(api.current_code("auditor@hospital.org")).unwrap();
    assert_eq!(code.code, "123456");
    assert_eq!(
        last_sent(&api).path,
        "/auth/current-code/auditor%40hospital.org"
    );
}

#[test]
fn network_failure_is_a_transport_error() {
    let api = client(Scripted::default().fail("connection refused"));
    let err = block_on(api.forecast()).unwrap_err();
    assert_eq!(err, ApiError::Transport("connection refused".into()));
    assert_eq!(err.user_message("Failed to load"), "Failed to load");
}

#[test]
fn malformed_body_is_a_decode_error() {
    let api = client(Scripted::default().reply(200, json!({"plans": "nope"})));
    assert!(matches!(
        block_on(api.plans()).unwrap_err(),
        ApiError::Decode(_)
    ));
}

#[test]
fn history_without_payments_decodes_empty() {
    let api = client(Scripted::default().reply(
        200,
        json!({"account_id": "ACC-9", "payments": [], "total": 0}),
    ));
    let history = block_on(api.payment_history("ACC-9")).unwrap();
    assert!(history.payments.is_empty());
    assert!(history.columns.is_empty());
    assert_eq!(last_sent(&api).path, "/plans/ACC-9/history");
}

#[test]
fn numeric_fraud_ids_are_kept_as_text() {
    let api = client(Scripted::default().reply(
        200,
        json!({
            "alerts": [{
                "transaction_id": 5003,
                "account_id": 1001,
                "fraud_risk_flag": true,
                "confidence_score": 0.91,
                "reason_code": "AMOUNT_SPIKE"
            }],
            "total_flagged": 1,
            "high_confidence": 1
        }),
    ));
    let alerts = block_on(api.fraud_alerts()).unwrap();
    assert_eq!(alerts.alerts[0].transaction_id, "5003");
    assert_eq!(alerts.alerts[0].account_id, "1001");
}

#[test]
fn numeric_log_and_user_ids_are_kept_as_text() {
    let api = client(Scripted::default().reply(
        200,
        json!({
            "logs": [{"log_id": 1, "user_id": 204, "action": "VIEW", "resource": "accounts"}],
            "total": 1
        }),
    ));
    let logs = block_on(api.audit_logs()).unwrap();
    assert_eq!(logs.logs[0].log_id, "1");
    assert_eq!(logs.logs[0].user_id, "204");
}

#[test]
fn numeric_account_ids_in_scores_are_kept_as_text() {
    let api = client(Scripted::default().reply(
        200,
        json!({
            "scores": [{
                "account_id": 1001,
                "risk_score": 64.0,
                "risk_category": "Medium",
                "expected_collection_probability": 55.0
            }],
            "total": 1,
            "medium_risk": 1
        }),
    ));
    let scores = block_on(api.risk_scores()).unwrap();
    assert_eq!(scores.scores[0].account_id, "1001");
    assert_eq!(scores.scores[0].risk_category, RiskCategory::Medium);
}
