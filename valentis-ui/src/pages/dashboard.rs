use super::settled;
use crate::components::{Column, DataTable, ForecastChart, RiskBadge, StatCard};
use crate::loader::load_once;
use crate::transport::Api;
use leptos::*;
use leptos_router::use_navigate;
use valentis_core::dto::{Forecast, RiskScore, RiskScores};
use valentis_core::format::{format_currency, format_number, format_points};
use valentis_core::routes::AppRoute;
use valentis_core::views::{high_risk_ratio, StatStatus};

#[component]
pub fn Dashboard() -> impl IntoView {
    let api = expect_context::<Api>();
    let state = load_once(
        move || {
            let api = api.clone();
            async move { futures::try_join!(api.risk_scores(), api.forecast()) }
        },
        "Failed to load dashboard",
    );

    settled(state, "Loading dashboard...", "/upload", "Go to Upload Data", |(risk, forecast)| {
        view! { <Overview risk=risk forecast=forecast/> }.into_view()
    })
}

fn score_columns() -> Vec<Column<RiskScore>> {
    vec![
        Column::new("Account", |s: &RiskScore| s.account_id.clone()).clickable(),
        Column::new("Risk Score", |s: &RiskScore| {
            view! { <strong>{format_number(s.risk_score)}</strong> }
        }),
        Column::new("Category", |s: &RiskScore| view! { <RiskBadge category=s.risk_category/> }),
        Column::new("Collection Prob.", |s: &RiskScore| {
            format_points(s.expected_collection_probability)
        }),
        Column::new("Balance", |s: &RiskScore| format_currency(s.patient_balance)),
        Column::new("Payer", |s: &RiskScore| s.payer_type.clone()),
        Column::new("Service", |s: &RiskScore| s.service_category.clone()),
    ]
}

#[component]
fn Overview(risk: RiskScores, forecast: Forecast) -> impl IntoView {
    let navigate = use_navigate();
    let open_account = Callback::new(move |score: RiskScore| {
        navigate(
            &AppRoute::Account { id: score.account_id }.to_path(),
            Default::default(),
        );
    });

    view! {
        <div class="page page--dashboard">
            <div class="stats-grid">
                <StatCard
                    icon="$"
                    title="Revenue at Risk"
                    value=format_currency(forecast.revenue_at_risk)
                    status=StatStatus::Danger
                    change=format!("{} est. bad debt", format_currency(forecast.estimated_bad_debt))
                    change_down=true
                />
                <StatCard
                    icon="!"
                    title="High Risk Accounts"
                    value=high_risk_ratio(risk.high_risk, risk.total)
                    status=StatStatus::Warning
                />
                <StatCard
                    icon="%"
                    title="Collection Rate"
                    value=format_points(forecast.expected_collection_rate)
                    status=StatStatus::Success
                />
                <StatCard
                    icon="#"
                    title="Total Outstanding"
                    value=format_currency(forecast.total_outstanding)
                    status=StatStatus::Info
                />
            </div>

            <ForecastChart points=forecast.forecast_series/>

            <div class="card">
                <div class="card__header">
                    <h3>"All Accounts: Risk Scores"</h3>
                    <span class="badge">{format!("{} accounts", risk.total)}</span>
                </div>
                <DataTable columns=score_columns() rows=risk.scores on_row_click=open_account/>
            </div>
        </div>
    }
}
