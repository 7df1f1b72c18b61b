//! Derivations the page views compute from backend payloads.

use crate::api::ApiError;
use crate::dto::{
    DepartmentHeat, FraudAlert, PaymentPlan, RiskCategory, RiskScore, Severity, UploadResult,
};

/// Alerts at or above this score count as high confidence.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

pub fn high_confidence(alerts: &[FraudAlert]) -> Vec<FraudAlert> {
    alerts
        .iter()
        .filter(|a| a.confidence_score >= HIGH_CONFIDENCE_THRESHOLD)
        .cloned()
        .collect()
}

/// Bar width in percent; scores outside 0..=1 are pinned to the track.
pub fn confidence_width(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    (score * 100.0).clamp(0.0, 100.0)
}

/// The score as given, whole percent.
pub fn confidence_label(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// Highest risk first.
pub fn sort_by_risk_desc(rows: &[DepartmentHeat]) -> Vec<DepartmentHeat> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    sorted
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlanSummary {
    pub total_revenue: f64,
    pub high_risk: usize,
    /// Mean collection probability, rounded to a whole percent.
    pub avg_collection: i64,
}

impl PlanSummary {
    pub fn from_plans(plans: &[PaymentPlan]) -> Self {
        let total_revenue = plans.iter().map(|p| p.projected_revenue).sum();
        let high_risk = plans
            .iter()
            .filter(|p| p.risk_category == RiskCategory::High)
            .count();
        let avg_collection = if plans.is_empty() {
            0
        } else {
            let sum: f64 = plans.iter().map(|p| p.expected_collection_probability).sum();
            (sum / plans.len() as f64).round() as i64
        };
        Self {
            total_revenue,
            high_risk,
            avg_collection,
        }
    }
}

pub fn is_currency_column(column: &str) -> bool {
    let lower = column.to_lowercase();
    lower.contains("amount") || lower.contains("balance")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatStatus {
    Default,
    Info,
    Success,
    Warning,
    Danger,
}

impl StatStatus {
    pub fn modifier(&self) -> &'static str {
        match self {
            StatStatus::Default => "default",
            StatStatus::Info => "info",
            StatStatus::Success => "success",
            StatStatus::Warning => "warning",
            StatStatus::Danger => "danger",
        }
    }

    pub fn for_security_alerts(total: u64) -> Self {
        if total > 0 {
            StatStatus::Danger
        } else {
            StatStatus::Success
        }
    }
}

/// Emphasis for an audit action cell.
pub fn action_tone(action: &str) -> Option<StatStatus> {
    match action {
        "export" => Some(StatStatus::Warning),
        "approve_refund" => Some(StatStatus::Danger),
        _ => None,
    }
}

/// Badge modifier on access alerts: only critical reads as high.
pub fn access_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "high",
        _ => "medium",
    }
}

/// Colour modifier for severity pills and heatmap cells.
pub fn severity_tone(severity: Severity) -> StatStatus {
    match severity {
        Severity::Critical => StatStatus::Danger,
        Severity::Warning => StatStatus::Warning,
        _ => StatStatus::Success,
    }
}

pub fn risk_badge_class(category: RiskCategory) -> String {
    format!("risk-badge risk-badge--{}", category.as_str().to_lowercase())
}

pub fn high_risk_ratio(high: u64, total: u64) -> String {
    format!("{high} / {total}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequiredFile {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

pub const REQUIRED_FILES: &[RequiredFile] = &[
    RequiredFile {
        name: "accounts.csv",
        required: true,
        description: "Patient account balances and payment history",
    },
    RequiredFile {
        name: "payments.csv",
        required: true,
        description: "Payment transactions",
    },
    RequiredFile {
        name: "refunds.csv",
        required: true,
        description: "Refund records",
    },
    RequiredFile {
        name: "chargebacks.csv",
        required: true,
        description: "Chargeback records",
    },
    RequiredFile {
        name: "audit_log.csv",
        required: true,
        description: "User access and activity logs",
    },
    RequiredFile {
        name: "claims.csv",
        required: false,
        description: "Insurance claims (optional)",
    },
];

/// What the upload page shows once a submission settles.
pub fn upload_outcome(result: Result<UploadResult, ApiError>) -> UploadResult {
    match result {
        Ok(result) => result,
        Err(err) => UploadResult::failed(err.user_message("Upload failed")),
    }
}

/// `Files loaded: a, b` when the backend listed what it ingested.
pub fn files_loaded(result: &UploadResult) -> Option<String> {
    result
        .files_found
        .as_ref()
        .map(|files| format!("Files loaded: {}", files.join(", ")))
}

#[derive(Clone, Debug, PartialEq)]
pub enum AccountView {
    NotFound,
    Found {
        risk: RiskScore,
        /// Absent when no plan is recommended for the account.
        plan: Option<PaymentPlan>,
    },
}

/// Joins the two account lookups. An unknown account wins over any plan
/// outcome; a missing plan only hides the plan card.
pub fn account_view(
    risk: Result<RiskScore, ApiError>,
    plan: Result<PaymentPlan, ApiError>,
) -> Result<AccountView, ApiError> {
    let risk = match risk {
        Ok(risk) => risk,
        Err(err) if err.is_not_found() => return Ok(AccountView::NotFound),
        Err(err) => return Err(err),
    };
    let plan = match plan {
        Ok(plan) => Some(plan),
        Err(err) if err.is_not_found() => None,
        Err(err) => return Err(err),
    };
    Ok(AccountView::Found { risk, plan })
}

/// Keeps digits only, at most six.
pub fn sanitize_totp_code(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(6).collect()
}

pub fn is_complete_totp_code(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::UploadStatus;

    fn alert(score: f64) -> FraudAlert {
        FraudAlert {
            transaction_id: format!("R-{score}"),
            account_id: "ACC-1".into(),
            fraud_risk_flag: true,
            confidence_score: score,
            reason_code: "DUPLICATE_REFUND".into(),
            amount: 120.0,
            description: String::new(),
        }
    }

    fn heat(department: &str, risk_score: f64) -> DepartmentHeat {
        DepartmentHeat {
            department: department.into(),
            avg_balance: 0.0,
            avg_days_past_due: 0.0,
            avg_late_payments: 0.0,
            high_risk_pct: 0.0,
            total_at_risk: 0.0,
            refund_count: 0,
            chargeback_count: 0,
            risk_score,
            severity: Severity::Normal,
        }
    }

    fn plan(category: RiskCategory, probability: f64, revenue: f64) -> PaymentPlan {
        PaymentPlan {
            account_id: "ACC-1".into(),
            risk_score: 50.0,
            risk_category: category,
            patient_balance: 1000.0,
            plan_length_months: 6,
            monthly_payment: 150.0,
            first_payment: 100.0,
            expected_collection_probability: probability,
            projected_revenue: revenue,
        }
    }

    #[test]
    fn high_confidence_is_inclusive_at_threshold() {
        let kept = high_confidence(&[alert(0.5), alert(0.8), alert(0.95)]);
        let scores: Vec<f64> = kept.iter().map(|a| a.confidence_score).collect();
        assert_eq!(scores, vec![0.8, 0.95]);
    }

    #[test]
    fn confidence_bar_never_overflows() {
        assert_eq!(confidence_width(0.97), 97.0);
        assert_eq!(confidence_width(1.4), 100.0);
        assert_eq!(confidence_width(-0.2), 0.0);
        assert_eq!(confidence_width(f64::NAN), 0.0);
        assert_eq!(confidence_label(0.97), "97%");
        assert_eq!(confidence_label(1.4), "140%");
    }

    #[test]
    fn heatmap_sorts_descending() {
        let sorted = sort_by_risk_desc(&[heat("A", 30.0), heat("B", 90.0), heat("C", 60.0)]);
        let scores: Vec<f64> = sorted.iter().map(|h| h.risk_score).collect();
        assert_eq!(scores, vec![90.0, 60.0, 30.0]);
    }

    #[test]
    fn plan_summary_rounds_mean() {
        let summary = PlanSummary::from_plans(&[
            plan(RiskCategory::High, 40.0, 400.0),
            plan(RiskCategory::Low, 95.0, 950.0),
            plan(RiskCategory::High, 60.0, 600.0),
        ]);
        assert_eq!(summary.total_revenue, 1950.0);
        assert_eq!(summary.high_risk, 2);
        assert_eq!(summary.avg_collection, 65);

        let empty = PlanSummary::from_plans(&[]);
        assert_eq!(empty.avg_collection, 0);
        assert_eq!(empty.high_risk, 0);
    }

    #[test]
    fn currency_columns_match_by_substring() {
        assert!(is_currency_column("payment_amount"));
        assert!(is_currency_column("Remaining_Balance"));
        assert!(!is_currency_column("payment_date"));
    }

    #[test]
    fn audit_emphasis() {
        assert_eq!(action_tone("export"), Some(StatStatus::Warning));
        assert_eq!(action_tone("approve_refund"), Some(StatStatus::Danger));
        assert_eq!(action_tone("view"), None);
        assert_eq!(access_badge(Severity::Critical), "high");
        assert_eq!(access_badge(Severity::Warning), "medium");
        assert_eq!(StatStatus::for_security_alerts(0), StatStatus::Success);
        assert_eq!(StatStatus::for_security_alerts(3).modifier(), "danger");
    }

    #[test]
    fn rejected_upload_shows_backend_detail() {
        let outcome = upload_outcome(Err(ApiError::Status {
            status: 400,
            detail: Some("missing accounts.csv".into()),
        }));
        assert_eq!(outcome.heading(), "Upload Failed");
        assert_eq!(outcome.message, "missing accounts.csv");
        assert_eq!(files_loaded(&outcome), None);

        let offline = upload_outcome(Err(ApiError::Transport("offline".into())));
        assert_eq!(offline.message, "Upload failed");
    }

    #[test]
    fn successful_upload_lists_files() {
        let outcome = upload_outcome(Ok(UploadResult {
            status: UploadStatus::Success,
            message: "Data loaded".into(),
            files_found: Some(vec!["accounts.csv".into(), "payments.csv".into()]),
        }));
        assert_eq!(outcome.heading(), "Upload Successful");
        assert_eq!(
            files_loaded(&outcome).as_deref(),
            Some("Files loaded: accounts.csv, payments.csv")
        );
    }

    #[test]
    fn totp_input_keeps_six_digits() {
        assert_eq!(sanitize_totp_code("12a3 45-678"), "123456");
        assert!(is_complete_totp_code("004213"));
        assert!(!is_complete_totp_code("12345"));
    }

    fn score() -> RiskScore {
        RiskScore {
            account_id: "ACC-1".into(),
            risk_score: 71.0,
            risk_category: RiskCategory::High,
            expected_collection_probability: 40.0,
            patient_balance: 2500.0,
            total_charges: 9000.0,
            days_past_due: 95.0,
            payer_type: "self-pay".into(),
            service_category: "emergency".into(),
        }
    }

    #[test]
    fn unknown_account_wins_over_plan_outcome() {
        fn missing<T>() -> Result<T, ApiError> {
            Err(ApiError::NotFound("Account not found".into()))
        }
        assert_eq!(
            account_view(missing(), Err(ApiError::Transport("offline".into()))),
            Ok(AccountView::NotFound)
        );
        assert_eq!(
            account_view(Ok(score()), missing()),
            Ok(AccountView::Found {
                risk: score(),
                plan: None
            })
        );
        let with_plan = account_view(Ok(score()), Ok(plan(RiskCategory::High, 40.0, 400.0)));
        assert!(matches!(with_plan, Ok(AccountView::Found { plan: Some(_), .. })));
    }

    #[test]
    fn other_lookup_failures_fail_the_view() {
        let err = account_view(
            Ok(score()),
            Err(ApiError::Status {
                status: 500,
                detail: None,
            }),
        );
        assert!(err.is_err());
    }

    #[test]
    fn required_files_include_optional_claims() {
        assert_eq!(REQUIRED_FILES.iter().filter(|f| f.required).count(), 5);
        assert_eq!(REQUIRED_FILES.last().map(|f| f.name), Some("claims.csv"));
        assert_eq!(risk_badge_class(RiskCategory::High), "risk-badge risk-badge--high");
    }
}
