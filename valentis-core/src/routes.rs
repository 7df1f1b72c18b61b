//! Client-side route surface of the authenticated layout.

use std::borrow::Cow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Dashboard,
    Fraud,
    FraudFlagged,
    FraudHighConfidence,
    Anomalies,
    Department { name: String },
    Account { id: String },
    Plans,
    PaymentHistory { account_id: String },
    Audit,
    AuditUser { user_id: String },
    Upload,
    FileView { filename: String },
}

impl AppRoute {
    /// Parses a path with optional `?query`. Unknown paths yield `None`.
    pub fn parse(location: &str) -> Option<Self> {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => AppRoute::Dashboard,
            ["fraud"] => AppRoute::Fraud,
            ["fraud", "flagged"] => AppRoute::FraudFlagged,
            ["fraud", "high-confidence"] => AppRoute::FraudHighConfidence,
            ["anomalies"] => AppRoute::Anomalies,
            ["anomalies", "department"] => AppRoute::Department {
                name: query_param(query, "name").unwrap_or_default(),
            },
            ["accounts", id] => AppRoute::Account { id: decode(id) },
            ["plans"] => AppRoute::Plans,
            ["plans", "history", account_id] => AppRoute::PaymentHistory {
                account_id: decode(account_id),
            },
            ["audit"] => AppRoute::Audit,
            ["audit", "user", user_id] => AppRoute::AuditUser {
                user_id: decode(user_id),
            },
            ["upload"] => AppRoute::Upload,
            ["upload", "view", filename] => AppRoute::FileView {
                filename: decode(filename),
            },
            _ => return None,
        };
        Some(route)
    }

    pub fn to_path(&self) -> String {
        match self {
            AppRoute::Dashboard => "/".into(),
            AppRoute::Fraud => "/fraud".into(),
            AppRoute::FraudFlagged => "/fraud/flagged".into(),
            AppRoute::FraudHighConfidence => "/fraud/high-confidence".into(),
            AppRoute::Anomalies => "/anomalies".into(),
            AppRoute::Department { name } => {
                format!("/anomalies/department?name={}", urlencoding::encode(name))
            }
            AppRoute::Account { id } => format!("/accounts/{}", urlencoding::encode(id)),
            AppRoute::Plans => "/plans".into(),
            AppRoute::PaymentHistory { account_id } => {
                format!("/plans/history/{}", urlencoding::encode(account_id))
            }
            AppRoute::Audit => "/audit".into(),
            AppRoute::AuditUser { user_id } => {
                format!("/audit/user/{}", urlencoding::encode(user_id))
            }
            AppRoute::Upload => "/upload".into(),
            AppRoute::FileView { filename } => {
                format!("/upload/view/{}", urlencoding::encode(filename))
            }
        }
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == key).then(|| decode(&v.replace('+', " ")))
    })
}

/// Header title keyed on the first path segment; unknown sections fall back
/// to the overview title.
pub fn page_title(path: &str) -> &'static str {
    let section = path.trim_start_matches('/').split(['/', '?']).next().unwrap_or("");
    match section {
        "fraud" => "Fraud & Refund Alerts",
        "anomalies" => "Anomaly Monitor",
        "plans" => "Payment Plan Optimizer",
        "audit" => "Audit & Security",
        "upload" => "Upload Data",
        _ => "Revenue Risk Overview",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIcon {
    Grid,
    Upload,
    Alert,
    Pulse,
    Card,
    Gear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub to: &'static str,
    pub label: &'static str,
    pub icon: NavIcon,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { to: "/", label: "Dashboard", icon: NavIcon::Grid },
    NavLink { to: "/upload", label: "Upload Data", icon: NavIcon::Upload },
    NavLink { to: "/fraud", label: "Fraud Alerts", icon: NavIcon::Alert },
    NavLink { to: "/anomalies", label: "Anomaly Monitor", icon: NavIcon::Pulse },
    NavLink { to: "/plans", label: "Payment Plans", icon: NavIcon::Card },
    NavLink { to: "/audit", label: "Audit & Security", icon: NavIcon::Gear },
];

/// `/` only matches itself; every other link also covers its sub-pages.
pub fn is_nav_active(link_to: &str, current_path: &str) -> bool {
    if link_to == "/" {
        return current_path == "/" || current_path.is_empty();
    }
    current_path == link_to
        || current_path
            .strip_prefix(link_to)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Class of the shell container; collapses along with the sidebar.
pub fn layout_class(sidebar_open: bool) -> &'static str {
    if sidebar_open {
        "app-layout"
    } else {
        "app-layout app-layout--collapsed"
    }
}

pub fn sidebar_class(sidebar_open: bool) -> &'static str {
    if sidebar_open {
        "sidebar"
    } else {
        "sidebar sidebar--collapsed"
    }
}
