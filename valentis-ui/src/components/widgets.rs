use leptos::*;
use valentis_core::dto::{RiskCategory, Severity};
use valentis_core::views::{self, StatStatus};

#[component]
pub fn StatCard(
    title: &'static str,
    #[prop(into)] value: String,
    #[prop(default = StatStatus::Default)] status: StatStatus,
    #[prop(optional)] icon: Option<&'static str>,
    #[prop(optional, into)] change: Option<String>,
    #[prop(optional)] change_down: bool,
) -> impl IntoView {
    let change = change.map(|change| {
        let (dir, arrow) = if change_down { ("down", "↓") } else { ("up", "↑") };
        view! { <span class=format!("stat-card__change stat-card__change--{dir}")>{arrow} " " {change}</span> }
    });
    view! {
        <div class=format!("stat-card stat-card--{}", status.modifier())>
            {icon.map(|icon| view! { <div class="stat-card__icon">{icon}</div> })}
            <p class="stat-card__title">{title}</p>
            <h3 class="stat-card__value">{value}</h3>
            {change}
        </div>
    }
}

#[component]
pub fn RiskBadge(category: RiskCategory) -> impl IntoView {
    view! { <span class=views::risk_badge_class(category)>{category.as_str()}</span> }
}

/// Pill coloured by severity, as used in the anomaly tables.
#[component]
pub fn SeverityPill(severity: Severity) -> impl IntoView {
    let tone = views::severity_tone(severity).modifier();
    view! { <span class=format!("severity-pill severity-pill--{tone}")>{severity.as_str()}</span> }
}

#[component]
pub fn ConfidenceBar(score: f64) -> impl IntoView {
    let width = format!("width: {}%", views::confidence_width(score));
    view! {
        <div class="confidence-bar">
            <div class="confidence-bar__track">
                <div class="confidence-bar__fill" style=width></div>
            </div>
            <span class="confidence-bar__label">{views::confidence_label(score)}</span>
        </div>
    }
}

#[component]
pub fn Loading(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="loading__spinner"></div>
            {message}
        </div>
    }
}

/// Replaces a page's content when its fetch fails.
#[component]
pub fn ErrorPanel(
    #[prop(into)] message: String,
    back_href: &'static str,
    back_label: &'static str,
) -> impl IntoView {
    view! {
        <div class="page">
            <div class="auth-error error-panel">{message}</div>
            <a class="btn btn--outline error-panel__back" href=back_href>
                "← " {back_label}
            </a>
        </div>
    }
}

/// Back button plus title block used by the drill-down pages.
#[component]
pub fn DetailHeader(
    back_href: &'static str,
    back_label: &'static str,
    #[prop(into)] title: String,
    #[prop(into)] subtitle: String,
) -> impl IntoView {
    view! {
        <div class="csv-viewer__header">
            <a class="btn btn--outline" href=back_href>"← " {back_label}</a>
            <div>
                <h1>{title}</h1>
                <p>{subtitle}</p>
            </div>
        </div>
    }
}
