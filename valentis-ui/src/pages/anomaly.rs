use super::{dynamic_columns, query_param, settled};
use crate::components::{Column, DataTable, DetailHeader, HeatmapGrid, SeverityPill, StatCard};
use crate::loader::{load_on, load_once};
use crate::transport::Api;
use leptos::*;
use valentis_core::dto::{AnomalyAlert, DepartmentDetail as Detail, DepartmentHeat, Row};
use valentis_core::format::{cell_number, cell_text, format_currency, format_number};
use valentis_core::routes::AppRoute;
use valentis_core::views::{severity_tone, sort_by_risk_desc, StatStatus};

fn tone(heat: &DepartmentHeat) -> &'static str {
    severity_tone(heat.severity).modifier()
}

fn department_columns() -> Vec<Column<DepartmentHeat>> {
    vec![
        Column::new("Department", |d: &DepartmentHeat| {
            let href = AppRoute::Department {
                name: d.department.clone(),
            }
            .to_path();
            view! {
                <span class=format!("severity-dot severity-dot--{}", tone(d))></span>
                <a class="table-link" href=href>{d.department.clone()}</a>
            }
        }),
        Column::new("Risk Score", |d: &DepartmentHeat| {
            view! {
                <span class=format!("risk-pill risk-pill--{}", tone(d))>{format_number(d.risk_score)}</span>
            }
        }),
        Column::new("Severity", |d: &DepartmentHeat| view! { <SeverityPill severity=d.severity/> }),
        Column::new("Avg Balance", |d: &DepartmentHeat| format_currency(d.avg_balance)),
        Column::new("Avg Days Past Due", |d: &DepartmentHeat| {
            format!("{} days", format_number(d.avg_days_past_due))
        }),
        Column::new("High Risk %", |d: &DepartmentHeat| {
            format!("{}%", format_number(d.high_risk_pct))
        }),
        Column::new("Total at Risk", |d: &DepartmentHeat| format_currency(d.total_at_risk)),
        Column::new("Refunds", |d: &DepartmentHeat| d.refund_count),
        Column::new("Chargebacks", |d: &DepartmentHeat| d.chargeback_count),
    ]
}

fn alert_card(alert: AnomalyAlert) -> impl IntoView {
    let tone = severity_tone(alert.severity).modifier();
    view! {
        <div class=format!("anomaly-alert anomaly-alert--{tone}")>
            <div class="anomaly-alert__header">
                <SeverityPill severity=alert.severity/>
                <strong>{alert.anomaly_type}</strong>
                <span class="anomaly-alert__dept">{alert.department}</span>
            </div>
            <p>{alert.description}</p>
        </div>
    }
}

#[component]
pub fn AnomalyMonitor() -> impl IntoView {
    let api = expect_context::<Api>();
    let state = load_once(
        move || {
            let api = api.clone();
            async move { futures::try_join!(api.anomaly_alerts(), api.heatmap()) }
        },
        "Failed to load anomaly data",
    );

    settled(
        state,
        "Analyzing departments...",
        "/",
        "Back to Dashboard",
        |(alerts, heatmap)| {
            let ranked = sort_by_risk_desc(&heatmap.heatmap);
            let alert_count = alerts.total;
            let cards = alerts.anomalies.into_iter().map(alert_card).collect_view();
            view! {
                <div class="page page--anomaly">
                    <div class="card">
                        <div class="card__header">
                            <h3>"Department Risk Ranking"</h3>
                            <span class="badge">{format!("{} departments", ranked.len())}</span>
                        </div>
                        <DataTable columns=department_columns() rows=ranked/>
                    </div>

                    <div class="card">
                        <div class="card__header">
                            <h3>"Department Heatmap"</h3>
                        </div>
                        <HeatmapGrid cells=heatmap.heatmap/>
                    </div>

                    <div class="card">
                        <div class="card__header">
                            <h3>"Anomaly Alerts"</h3>
                            <span class="badge">{format!("{alert_count} alerts")}</span>
                        </div>
                        <div class="anomaly-alerts">{cards}</div>
                    </div>
                </div>
            }
            .into_view()
        },
    )
}

/// Per-department drill-down, keyed by the `name` query parameter.
#[component]
pub fn DepartmentDetail() -> impl IntoView {
    let api = expect_context::<Api>();
    let name = query_param("name");
    let state = load_on(
        name,
        move |name| {
            let api = api.clone();
            async move { api.department(&name).await }
        },
        "Failed to load department",
    );

    settled(
        state,
        "Loading department...",
        "/anomalies",
        "Back to Anomaly Monitor",
        |detail: Detail| {
            let summary = detail.summary;
            let status = match severity_tone(summary.severity) {
                StatStatus::Success => StatStatus::Info,
                tone => tone,
            };
            let columns = account_columns(&detail.columns);
            view! {
                <div class="page page--department">
                    <DetailHeader
                        back_href="/anomalies"
                        back_label="Back to Anomaly Monitor"
                        title=detail.department.clone()
                        subtitle=format!("{} accounts · {}% high risk", detail.total_accounts, format_number(summary.high_risk_pct))
                    />
                    <div class="stats-grid">
                        <StatCard title="Risk Score" value=format_number(summary.risk_score) status=status/>
                        <StatCard title="Severity" value=summary.severity.as_str() status=status/>
                        <StatCard
                            title="Total at Risk"
                            value=format_currency(summary.total_at_risk)
                            status=StatStatus::Danger
                        />
                        <StatCard
                            title="Avg Days Past Due"
                            value=format!("{} days", format_number(summary.avg_days_past_due))
                            status=StatStatus::Warning
                        />
                    </div>
                    <div class="card">
                        <div class="card__header">
                            <h3>"Accounts"</h3>
                            <span class="badge">{format!("{} accounts", detail.total_accounts)}</span>
                        </div>
                        <DataTable columns=columns rows=detail.accounts/>
                    </div>
                </div>
            }
            .into_view()
        },
    )
}

const ACCOUNT_FIELDS: &[(&str, &str)] = &[
    ("account_id", "Account"),
    ("patient_balance", "Balance"),
    ("total_charges", "Total Charges"),
    ("days_past_due", "Days Past Due"),
    ("payer_type", "Payer"),
    ("historical_late_payments_12m", "Late Payments (12m)"),
];

fn account_columns(columns: &[String]) -> Vec<Column<Row>> {
    // Older backends omit the column list; fall back to the known fields.
    let names: Vec<String> = if columns.is_empty() {
        ACCOUNT_FIELDS.iter().map(|(key, _)| key.to_string()).collect()
    } else {
        columns.to_vec()
    };
    dynamic_columns(&names, |name| {
        let (key, label) = ACCOUNT_FIELDS.iter().find(|(key, _)| *key == name)?;
        let key = key.to_string();
        Some(match name {
            "patient_balance" | "total_charges" => {
                Column::new(*label, move |row: &Row| format_currency(cell_number(row.get(&key))))
            }
            _ => Column::new(*label, move |row: &Row| cell_text(row.get(&key))),
        })
    })
}
