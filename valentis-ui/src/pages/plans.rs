use super::{dynamic_columns, route_param, settled};
use crate::components::{Column, DataTable, DetailHeader, RiskBadge, StatCard};
use crate::loader::{load_on, load_once};
use crate::transport::Api;
use leptos::*;
use valentis_core::dto::{PaymentHistory as History, PaymentPlan, Row};
use valentis_core::format::{cell_number, column_heading, format_currency, format_number};
use valentis_core::routes::AppRoute;
use valentis_core::views::{is_currency_column, PlanSummary, StatStatus};

fn plan_columns() -> Vec<Column<PaymentPlan>> {
    vec![
        Column::new("Account", |p: &PaymentPlan| {
            let href = AppRoute::PaymentHistory {
                account_id: p.account_id.clone(),
            }
            .to_path();
            view! { <a class="clickable" href=href>{p.account_id.clone()}</a> }
        }),
        Column::new("Risk", |p: &PaymentPlan| view! { <RiskBadge category=p.risk_category/> }),
        Column::new("Score", |p: &PaymentPlan| {
            view! { <strong>{format_number(p.risk_score)}</strong> }
        }),
        Column::new("Balance", |p: &PaymentPlan| format_currency(p.patient_balance)),
        Column::new("Plan Length", |p: &PaymentPlan| format!("{} mo", p.plan_length_months)),
        Column::new("First Payment", |p: &PaymentPlan| format_currency(p.first_payment)),
        Column::new("Monthly", |p: &PaymentPlan| format_currency(p.monthly_payment)),
        Column::new("Collection Prob.", |p: &PaymentPlan| {
            format!("{}%", format_number(p.expected_collection_probability))
        }),
        Column::new("Projected Revenue", |p: &PaymentPlan| format_currency(p.projected_revenue)),
    ]
}

#[component]
pub fn PaymentPlans() -> impl IntoView {
    let api = expect_context::<Api>();
    let state = load_once(
        move || {
            let api = api.clone();
            async move { api.plans().await }
        },
        "Failed to load payment plans",
    );

    settled(state, "Generating plans...", "/", "Back to Dashboard", |data| {
        let summary = PlanSummary::from_plans(&data.plans);
        view! {
            <div class="page page--plans">
                <div class="stats-grid">
                    <StatCard title="Active Plans" value=data.total.to_string() status=StatStatus::Info/>
                    <StatCard
                        title="Projected Revenue"
                        value=format_currency(summary.total_revenue)
                        status=StatStatus::Success
                    />
                    <StatCard
                        title="Avg Collection Prob."
                        value=format!("{}%", summary.avg_collection)
                        status=StatStatus::Warning
                    />
                    <StatCard
                        title="High Risk Plans"
                        value=summary.high_risk.to_string()
                        status=StatStatus::Danger
                    />
                </div>

                <div class="card">
                    <div class="card__header">
                        <h3>"Recommended Plans"</h3>
                        <span class="badge">{format!("{} accounts", data.total)}</span>
                    </div>
                    <DataTable columns=plan_columns() rows=data.plans/>
                </div>
            </div>
        }
        .into_view()
    })
}

/// Currency formatting for amount and balance columns, text for the rest.
fn history_columns(columns: &[String]) -> Vec<Column<Row>> {
    dynamic_columns(columns, |name| {
        is_currency_column(name).then(|| {
            let key = name.to_string();
            Column::new(column_heading(name), move |row: &Row| {
                format_currency(cell_number(row.get(&key)))
            })
        })
    })
}

#[component]
pub fn PaymentHistory() -> impl IntoView {
    let api = expect_context::<Api>();
    let account_id = route_param("accountId");
    let state = load_on(
        account_id,
        move |account_id| {
            let api = api.clone();
            async move { api.payment_history(&account_id).await }
        },
        "Failed to load history",
    );

    settled(
        state,
        "Loading payment history...",
        "/plans",
        "Back to Payment Plans",
        |history: History| {
            view! {
                <div class="page page--payment-history">
                    <DetailHeader
                        back_href="/plans"
                        back_label="Back to Payment Plans"
                        title=format!("Payment History — {}", history.account_id)
                        subtitle=format!("{} payment records", history.total)
                    />
                    <div class="card">
                        <DataTable
                            columns=history_columns(&history.columns)
                            rows=history.payments
                            empty_message=format!("No payment records found for {}", history.account_id)
                        />
                    </div>
                </div>
            }
            .into_view()
        },
    )
}
