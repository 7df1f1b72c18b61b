use super::{dynamic_columns, loading_text, route_param, settled};
use crate::components::{Column, DataTable, DetailHeader, StatCard};
use crate::loader::{load_on, load_once};
use crate::transport::Api;
use leptos::*;
use valentis_core::dto::{AccessAlert, AuditLogEntry, Row, UserActivity};
use valentis_core::format::{cell_text, column_heading, format_date};
use valentis_core::routes::AppRoute;
use valentis_core::views::{access_badge, action_tone, StatStatus};

fn action_cell(action: String) -> impl IntoView {
    let tone = action_tone(&action).map_or("default", |tone| tone.modifier());
    view! { <span class=format!("action-cell action-cell--{tone}")>{action}</span> }
}

fn log_columns() -> Vec<Column<AuditLogEntry>> {
    vec![
        Column::new("Log ID", |e: &AuditLogEntry| e.log_id.clone()),
        Column::new("User", |e: &AuditLogEntry| e.user_id.clone()),
        Column::new("Action", |e: &AuditLogEntry| action_cell(e.action.clone())),
        Column::new("Resource", |e: &AuditLogEntry| e.resource.clone()),
        Column::new("Timestamp", |e: &AuditLogEntry| e.timestamp.clone()),
    ]
}

fn export_columns() -> Vec<Column<AuditLogEntry>> {
    vec![
        Column::new("Log ID", |e: &AuditLogEntry| e.log_id.clone()),
        Column::new("User", |e: &AuditLogEntry| e.user_id.clone()),
        Column::new("Resource", |e: &AuditLogEntry| e.resource.clone()),
        Column::new("Date", |e: &AuditLogEntry| format_date(&e.timestamp)),
    ]
}

fn scroll_to(id: &'static str) {
    match document().get_element_by_id(id) {
        Some(section) => section.scroll_into_view(),
        None => log::debug!("no section #{id} to scroll to"),
    }
}

fn alert_card(alert: AccessAlert) -> impl IntoView {
    let href = AppRoute::AuditUser {
        user_id: alert.user_id.clone(),
    }
    .to_path();
    view! {
        <a class=format!("alert-card alert-card--{} alert-card--clickable", alert.severity) href=href>
            <div class="alert-card__content">
                <div class="alert-card__title">{format!("User: {}", alert.user_id)}</div>
                <div class="alert-card__desc">{alert.reason}</div>
            </div>
            <div class="alert-card__badge">
                <span class=format!("risk-badge risk-badge--{}", access_badge(alert.severity))>
                    {alert.severity.as_str()}
                </span>
            </div>
        </a>
    }
}

#[component]
pub fn AuditLog() -> impl IntoView {
    let api = expect_context::<Api>();
    let state = load_once(
        move || {
            let api = api.clone();
            async move {
                futures::try_join!(api.audit_logs(), api.access_alerts(), api.export_logs())
            }
        },
        "Failed to load audit data",
    );

    settled(
        state,
        "Loading audit data...",
        "/",
        "Back to Dashboard",
        |(logs, alerts, exports)| {
            let alert_status = StatStatus::for_security_alerts(alerts.total);
            let alert_section = (!alerts.alerts.is_empty()).then(|| {
                let cards = alerts.alerts.into_iter().map(alert_card).collect_view();
                view! {
                    <div id="security-alerts" class="alert-section">
                        <h3>"Suspicious Activity Alerts"</h3>
                        {cards}
                    </div>
                }
            });
            let export_total = exports.total;
            let export_section = (!exports.exports.is_empty()).then(|| {
                view! {
                    <div id="data-exports" class="card">
                        <div class="card__header">
                            <h3>"Data Exports"</h3>
                            <span class="badge">{format!("{export_total} exports")}</span>
                        </div>
                        <DataTable columns=export_columns() rows=exports.exports/>
                    </div>
                }
            });

            view! {
                <div class="page page--audit">
                    <div class="stats-grid">
                        <div class="stat-link" on:click=move |_| scroll_to("audit-logs")>
                            <StatCard title="Total Log Entries" value=logs.total.to_string() status=StatStatus::Info/>
                        </div>
                        <div class="stat-link" on:click=move |_| scroll_to("security-alerts")>
                            <StatCard title="Security Alerts" value=alerts.total.to_string() status=alert_status/>
                        </div>
                        <div class="stat-link" on:click=move |_| scroll_to("data-exports")>
                            <StatCard title="Data Exports" value=export_total.to_string() status=StatStatus::Warning/>
                        </div>
                    </div>

                    {alert_section}

                    <div id="audit-logs" class="card">
                        <div class="card__header">
                            <h3>"Audit Log"</h3>
                            <span class="badge">{format!("{} entries", logs.total)}</span>
                        </div>
                        <DataTable columns=log_columns() rows=logs.logs/>
                    </div>

                    {export_section}
                </div>
            }
            .into_view()
        },
    )
}

fn activity_columns(columns: &[String]) -> Vec<Column<Row>> {
    dynamic_columns(columns, |name| {
        (name == "action").then(|| {
            Column::new(column_heading(name), |row: &Row| action_cell(cell_text(row.get("action"))))
        })
    })
}

/// Everything one user did, reached from an access alert.
#[component]
pub fn AuditUserDetail() -> impl IntoView {
    let api = expect_context::<Api>();
    let user_id = route_param("userId");
    let state = load_on(
        user_id,
        move |user_id| {
            let api = api.clone();
            async move { api.user_activity(&user_id).await }
        },
        "Failed to load user activity",
    );

    settled(
        state,
        loading_text(user_id, |id| format!("Loading activity for {id}...")),
        "/audit",
        "Back to Audit & Security",
        |activity: UserActivity| {
            view! {
                <div class="page page--audit-detail">
                    <DetailHeader
                        back_href="/audit"
                        back_label="Back to Audit & Security"
                        title=format!("User Activity — {}", activity.user_id)
                        subtitle=format!("{} log entries", activity.total)
                    />
                    <div class="card">
                        <DataTable
                            columns=activity_columns(&activity.columns)
                            rows=activity.logs
                            empty_message=format!("No activity found for {}", activity.user_id)
                        />
                    </div>
                </div>
            }
            .into_view()
        },
    )
}
