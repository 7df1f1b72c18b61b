use crate::format::format_number;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A loosely typed record as the backend serializes CSV-backed tables.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Identifier columns come straight from CSVs, so pandas may have typed
/// them as integers or floats.
#[derive(Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Identifier>::deserialize(deserializer)? {
        Some(Identifier::Text(text)) => text,
        Some(Identifier::Signed(n)) => n.to_string(),
        Some(Identifier::Unsigned(n)) => n.to_string(),
        Some(Identifier::Float(n)) => format_number(n),
        None => String::new(),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
            RiskCategory::Unknown => "",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
            Severity::Unknown => "",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- auth ---

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct VerifyTotpRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

/// First-factor result: what the second-factor screen needs to finish login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TotpChallenge {
    pub email: String,
    pub name: String,
    /// `data:` URL of the provisioning QR code.
    #[serde(rename = "qr_code")]
    pub qr_code_image: String,
    #[serde(rename = "totp_secret")]
    pub secret: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentCode {
    pub code: String,
    #[serde(default)]
    pub remaining_seconds: u32,
}

// --- risk ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    #[serde(deserialize_with = "string_or_number")]
    pub account_id: String,
    pub risk_score: f64,
    pub risk_category: RiskCategory,
    pub expected_collection_probability: f64,
    #[serde(default)]
    pub patient_balance: f64,
    #[serde(default)]
    pub total_charges: f64,
    #[serde(default)]
    pub days_past_due: f64,
    #[serde(default)]
    pub payer_type: String,
    #[serde(default)]
    pub service_category: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskScores {
    #[serde(default)]
    pub scores: Vec<RiskScore>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub high_risk: u64,
    #[serde(default)]
    pub medium_risk: u64,
    #[serde(default)]
    pub low_risk: u64,
}

// --- fraud ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FraudAlert {
    /// Comma-joined when one alert groups several transactions.
    #[serde(deserialize_with = "string_or_number")]
    pub transaction_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub account_id: String,
    #[serde(default)]
    pub fraud_risk_flag: bool,
    pub confidence_score: f64,
    pub reason_code: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FraudAlerts {
    #[serde(default)]
    pub alerts: Vec<FraudAlert>,
    #[serde(default)]
    pub total_flagged: u64,
    #[serde(default)]
    pub high_confidence: u64,
}

// --- anomaly ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnomalyAlert {
    #[serde(deserialize_with = "string_or_number")]
    pub alert_id: String,
    pub department: String,
    pub anomaly_type: String,
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyAlerts {
    #[serde(default)]
    pub anomalies: Vec<AnomalyAlert>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentHeat {
    pub department: String,
    #[serde(default)]
    pub avg_balance: f64,
    #[serde(default)]
    pub avg_days_past_due: f64,
    #[serde(default)]
    pub avg_late_payments: f64,
    #[serde(default)]
    pub high_risk_pct: f64,
    #[serde(default)]
    pub total_at_risk: f64,
    #[serde(default)]
    pub refund_count: u64,
    #[serde(default)]
    pub chargeback_count: u64,
    pub risk_score: f64,
    pub severity: Severity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeverityRank {
    pub department: String,
    pub risk_score: f64,
    pub severity: Severity,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    #[serde(default)]
    pub heatmap: Vec<DepartmentHeat>,
    #[serde(default)]
    pub severity_ranking: Vec<SeverityRank>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDetail {
    pub department: String,
    pub summary: DepartmentHeat,
    #[serde(default)]
    pub accounts: Vec<Row>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub total_accounts: u64,
}

// --- forecast ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: String,
    pub projected_risk: f64,
    pub projected_collections: f64,
    #[serde(default)]
    pub net_risk: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub projected_delinquency_30d: f64,
    #[serde(default)]
    pub estimated_bad_debt: f64,
    #[serde(default)]
    pub expected_collection_rate: f64,
    #[serde(default)]
    pub revenue_at_risk: f64,
    #[serde(default)]
    pub total_outstanding: f64,
    #[serde(default)]
    pub total_charges: f64,
    #[serde(default)]
    pub high_risk_count: u64,
    #[serde(default)]
    pub total_accounts: u64,
    #[serde(default)]
    pub forecast_series: Vec<ForecastPoint>,
}

// --- payment plans ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlan {
    #[serde(deserialize_with = "string_or_number")]
    pub account_id: String,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default = "unknown_category")]
    pub risk_category: RiskCategory,
    #[serde(default)]
    pub patient_balance: f64,
    pub plan_length_months: u32,
    pub monthly_payment: f64,
    pub first_payment: f64,
    pub expected_collection_probability: f64,
    pub projected_revenue: f64,
}

fn unknown_category() -> RiskCategory {
    RiskCategory::Unknown
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlans {
    #[serde(default)]
    pub plans: Vec<PaymentPlan>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentHistory {
    #[serde(deserialize_with = "string_or_number")]
    pub account_id: String,
    #[serde(default)]
    pub payments: Vec<Row>,
    #[serde(default)]
    pub total: u64,
    /// Absent when the account has no payments.
    #[serde(default)]
    pub columns: Vec<String>,
}

// --- audit ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub log_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub action: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub resource: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogs {
    #[serde(default)]
    pub logs: Vec<AuditLogEntry>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessAlert {
    #[serde(deserialize_with = "string_or_number")]
    pub alert_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub reason: String,
    pub severity: Severity,
    #[serde(default)]
    pub action_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessAlerts {
    #[serde(default)]
    pub alerts: Vec<AccessAlert>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportLogs {
    #[serde(default)]
    pub exports: Vec<AuditLogEntry>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub logs: Vec<Row>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub columns: Vec<String>,
}

// --- upload ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub status: UploadStatus,
    pub message: String,
    #[serde(default)]
    pub files_found: Option<Vec<String>>,
}

impl UploadResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Error,
            message: message.into(),
            files_found: None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.status {
            UploadStatus::Success => "Upload Successful",
            UploadStatus::Error => "Upload Failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilePreview {
    pub filename: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_reads_backend_field_names() {
        let challenge: TotpChallenge = serde_json::from_value(serde_json::json!({
            "status": "totp_required",
            "email": "auditor@hospital.org",
            "name": "Maria Thompson",
            "role": "auditor",
            "totp_secret": "GEZDGNBVGY3TQOJQ",
            "qr_code": "data:image/png;base64,AAAA",
            "message": "Scan the QR code"
        }))
        .unwrap();
        assert_eq!(challenge.secret, "GEZDGNBVGY3TQOJQ");
        assert_eq!(challenge.qr_code_image, "data:image/png;base64,AAAA");
        assert_eq!(challenge.role.as_deref(), Some("auditor"));
    }

    #[test]
    fn unknown_labels_do_not_fail_decoding() {
        let heat: DepartmentHeat = serde_json::from_value(serde_json::json!({
            "department": "ER",
            "risk_score": 12.5,
            "severity": "elevated"
        }))
        .unwrap();
        assert_eq!(heat.severity, Severity::Unknown);
        assert_eq!(heat.refund_count, 0);

        let plan: PaymentPlan = serde_json::from_value(serde_json::json!({
            "account_id": "A-1",
            "risk_category": "Extreme",
            "plan_length_months": 2,
            "monthly_payment": 50.0,
            "first_payment": 50.0,
            "expected_collection_probability": 95.0,
            "projected_revenue": 95.0
        }))
        .unwrap();
        assert_eq!(plan.risk_category, RiskCategory::Unknown);
    }

    #[test]
    fn numeric_identifiers_decode_as_text() {
        let entry: AuditLogEntry = serde_json::from_value(serde_json::json!({
            "log_id": 17,
            "user_id": 1042.0,
            "action": "EXPORT",
            "resource": 3
        }))
        .unwrap();
        assert_eq!(entry.log_id, "17");
        assert_eq!(entry.user_id, "1042");
        assert_eq!(entry.resource, "3");

        let alert: AccessAlert = serde_json::from_value(serde_json::json!({
            "alert_id": "AA-1",
            "user_id": null,
            "reason": "Bulk export",
            "severity": "warning"
        }))
        .unwrap();
        assert_eq!(alert.alert_id, "AA-1");
        assert_eq!(alert.user_id, "");
    }

    #[test]
    fn upload_result_heading_follows_status() {
        let ok: UploadResult = serde_json::from_str(
            r#"{"status":"success","message":"loaded","files_found":["accounts.csv"]}"#,
        )
        .unwrap();
        assert_eq!(ok.heading(), "Upload Successful");
        assert_eq!(UploadResult::failed("nope").heading(), "Upload Failed");
    }
}
