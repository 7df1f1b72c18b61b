use super::settled;
use crate::components::{Column, ConfidenceBar, DataTable, DetailHeader};
use crate::loader::{load_once, ReadLoad};
use crate::transport::Api;
use leptos::*;
use valentis_core::dto::{FraudAlert, FraudAlerts as Alerts};
use valentis_core::format::format_currency;
use valentis_core::views::high_confidence;

fn load_alerts() -> ReadLoad<Alerts> {
    let api = expect_context::<Api>();
    load_once(
        move || {
            let api = api.clone();
            async move { api.fraud_alerts().await }
        },
        "Failed to load fraud alerts",
    )
}

fn alert_columns() -> Vec<Column<FraudAlert>> {
    vec![
        Column::new("Transaction ID", |a: &FraudAlert| a.transaction_id.clone()),
        Column::new("Account", |a: &FraudAlert| a.account_id.clone()),
        Column::new("Reason Code", |a: &FraudAlert| {
            view! { <span class="reason-code">{a.reason_code.clone()}</span> }
        }),
        Column::new("Confidence", |a: &FraudAlert| {
            view! { <ConfidenceBar score=a.confidence_score/> }
        }),
        Column::new("Amount", |a: &FraudAlert| format_currency(a.amount)),
        Column::new("Description", |a: &FraudAlert| a.description.clone()),
    ]
}

#[component]
pub fn FraudAlerts() -> impl IntoView {
    settled(load_alerts(), "Scanning for fraud...", "/", "Back to Dashboard", |data| {
        view! {
            <div class="page page--fraud">
                <div class="fraud-cards-stack">
                    <a class="fraud-card" href="/fraud/flagged">
                        <div class="fraud-card__info">
                            <h3>"Total Flagged"</h3>
                            <p>"All transactions identified as suspicious"</p>
                        </div>
                        <div class="fraud-card__count fraud-card__count--danger">{data.total_flagged}</div>
                    </a>
                    <a class="fraud-card" href="/fraud/high-confidence">
                        <div class="fraud-card__info">
                            <h3>"High Confidence"</h3>
                            <p>"Alerts with ≥80% confidence score"</p>
                        </div>
                        <div class="fraud-card__count fraud-card__count--warning">{data.high_confidence}</div>
                    </a>
                </div>
            </div>
        }
        .into_view()
    })
}

#[component]
pub fn FraudFlagged() -> impl IntoView {
    settled(
        load_alerts(),
        "Loading flagged transactions...",
        "/fraud",
        "Back to Fraud Alerts",
        |data| {
            view! {
                <div class="page page--fraud-detail">
                    <DetailHeader
                        back_href="/fraud"
                        back_label="Back to Fraud Alerts"
                        title="Total Flagged Transactions"
                        subtitle=format!("{} alerts detected", data.total_flagged)
                    />
                    <div class="card explainer">
                        <div class="card__header">
                            <h3>"How This Is Calculated"</h3>
                        </div>
                        <div class="explainer__body">
                            <p>
                                "The " <strong>"Total Flagged"</strong>
                                " count represents all transactions identified as suspicious by three detection methods:"
                            </p>
                            <ul>
                                <li><strong>"Duplicate Refund Detection"</strong>": flags groups of refunds with the same account and amount appearing 2 or more times"</li>
                                <li><strong>"Repeated Chargeback Detection"</strong>": flags accounts with 2 or more chargebacks, indicating potential abuse"</li>
                                <li><strong>"Z-Score Anomaly Detection"</strong>": flags individual refund amounts that deviate more than 1.5 standard deviations from the mean"</li>
                            </ul>
                            <p>"Results are de-duplicated by transaction ID. Each alert includes a confidence score that reflects the severity of the anomaly."</p>
                        </div>
                    </div>
                    <div class="card">
                        <div class="card__header">
                            <h3>"Flagged Transactions"</h3>
                            <span class="badge">{format!("{} alerts", data.total_flagged)}</span>
                        </div>
                        <DataTable columns=alert_columns() rows=data.alerts/>
                    </div>
                </div>
            }
            .into_view()
        },
    )
}

#[component]
pub fn FraudHighConfidence() -> impl IntoView {
    settled(
        load_alerts(),
        "Loading high confidence alerts...",
        "/fraud",
        "Back to Fraud Alerts",
        |data| {
            let alerts = high_confidence(&data.alerts);
            let count = alerts.len();
            view! {
                <div class="page page--fraud-detail">
                    <DetailHeader
                        back_href="/fraud"
                        back_label="Back to Fraud Alerts"
                        title="High Confidence Alerts"
                        subtitle=format!("{count} alerts with ≥80% confidence")
                    />
                    <div class="card explainer">
                        <div class="card__header">
                            <h3>"How This Is Calculated"</h3>
                        </div>
                        <div class="explainer__body">
                            <p>
                                "The " <strong>"High Confidence"</strong> " count includes only alerts with a confidence score of "
                                <strong>"80% or higher"</strong> ". Confidence scores are calculated based on:"
                            </p>
                            <ul>
                                <li><strong>"Duplicate Refunds"</strong>": base confidence of 50%, plus 15% for each additional duplicate (e.g., 2 duplicates = 80%, 3 = 95%)"</li>
                                <li><strong>"Repeated Chargebacks"</strong>": base confidence of 60%, plus 10% per additional chargeback (e.g., 2 chargebacks = 80%, 3 = 90%)"</li>
                                <li><strong>"Unusual Refund Amounts"</strong>": confidence equals 30% × the Z-score deviation (e.g., a 3σ outlier = 90% confidence)"</li>
                            </ul>
                            <p>"All confidence scores are capped at 95%. High confidence alerts are the most actionable and should be investigated first."</p>
                        </div>
                    </div>
                    <div class="card">
                        <div class="card__header">
                            <h3>"High Confidence Transactions"</h3>
                            <span class="badge">{format!("{count} alerts")}</span>
                        </div>
                        <DataTable columns=alert_columns() rows=alerts/>
                    </div>
                </div>
            }
            .into_view()
        },
    )
}
