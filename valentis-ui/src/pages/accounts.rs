use super::{route_param, settled};
use crate::components::RiskBadge;
use crate::loader::load_on;
use crate::transport::Api;
use leptos::*;
use valentis_core::dto::{PaymentPlan, RiskScore};
use valentis_core::format::{format_currency, format_number};
use valentis_core::routes::AppRoute;
use valentis_core::views::{account_view, AccountView};

fn detail_item(label: &'static str, value: impl IntoView, class: &'static str) -> impl IntoView {
    view! {
        <div class="detail-item">
            <div class="detail-item__label">{label}</div>
            <div class=format!("detail-item__value {class}")>{value}</div>
        </div>
    }
}

#[component]
pub fn AccountDrillDown() -> impl IntoView {
    let api = expect_context::<Api>();
    let id = route_param("id");
    let state = load_on(
        id,
        move |id| {
            let api = api.clone();
            async move {
                let (risk, plan) = futures::join!(api.account_risk(&id), api.payment_plan(&id));
                account_view(risk, plan)
            }
        },
        "Failed to load account",
    );

    settled(
        state,
        "Loading account details...",
        "/",
        "Back to Dashboard",
        move |account| match account {
            AccountView::NotFound => view! {
                <div class="page">
                    <p>"Account not found."</p>
                    <a class="btn btn--primary" href="/">"← Back to Dashboard"</a>
                </div>
            }
            .into_view(),
            AccountView::Found { risk, plan } => {
                view! { <AccountDetail id=id() risk=risk plan=plan/> }.into_view()
            }
        },
    )
}

#[component]
fn AccountDetail(id: String, risk: RiskScore, plan: Option<PaymentPlan>) -> impl IntoView {
    view! {
        <div class="page page--account">
            <div class="page__header">
                <a class="btn btn--outline" href="/">"← Back to Dashboard"</a>
                <h1>{format!("Account {id}")}</h1>
                <p>"Detailed risk analysis and payment plan recommendation"</p>
            </div>

            <div class="detail-grid">
                {detail_item("Risk Score", format_number(risk.risk_score), "")}
                {detail_item("Risk Category", view! { <RiskBadge category=risk.risk_category/> }, "")}
                {detail_item("Patient Balance", format_currency(risk.patient_balance), "")}
                {detail_item("Total Charges", format_currency(risk.total_charges), "")}
                {detail_item("Days Past Due", format!("{} days", format_number(risk.days_past_due)), "")}
                {detail_item(
                    "Collection Probability",
                    format!("{}%", format_number(risk.expected_collection_probability)),
                    "",
                )}
                {detail_item("Payer Type", risk.payer_type.clone(), "capitalize")}
                {detail_item("Service Category", risk.service_category.clone(), "capitalize")}
            </div>

            {plan.map(|plan| view! { <PlanCard plan=plan/> })}
        </div>
    }
}

#[component]
fn PlanCard(plan: PaymentPlan) -> impl IntoView {
    let history = AppRoute::PaymentHistory {
        account_id: plan.account_id.clone(),
    }
    .to_path();
    view! {
        <div class="card plan-card">
            <div class="card__header">
                <h3>"💳 Recommended Payment Plan"</h3>
                <a class="btn btn--outline" href=history>"Payment History"</a>
            </div>
            <div class="detail-grid">
                {detail_item("Plan Length", format!("{} months", plan.plan_length_months), "")}
                {detail_item("First Payment", format_currency(plan.first_payment), "")}
                {detail_item("Monthly Payment", format_currency(plan.monthly_payment), "")}
                {detail_item("Projected Revenue", format_currency(plan.projected_revenue), "")}
            </div>
        </div>
    }
}
