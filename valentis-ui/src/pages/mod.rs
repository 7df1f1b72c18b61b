mod accounts;
mod anomaly;
mod audit;
mod auth;
mod dashboard;
mod fraud;
mod plans;
mod upload;

pub use accounts::AccountDrillDown;
pub use anomaly::{AnomalyMonitor, DepartmentDetail};
pub use audit::{AuditLog, AuditUserDetail};
pub use auth::{Login, TotpVerify};
pub use dashboard::Dashboard;
pub use fraud::{FraudAlerts, FraudFlagged, FraudHighConfidence};
pub use plans::{PaymentHistory, PaymentPlans};
pub use upload::{CsvViewer, Upload};

use crate::components::{Column, ErrorPanel, Loading};
use crate::loader::{LoadState, ReadLoad};
use leptos::*;
use leptos_router::{use_params_map, use_query_map};
use valentis_core::dto::Row;
use valentis_core::format::{cell_text, column_heading};

/// Reactive route parameter, empty when absent.
fn route_param(name: &'static str) -> impl Fn() -> String + Copy + 'static {
    let params = use_params_map();
    move || params.with(|p| p.get(name).cloned().unwrap_or_default())
}

fn query_param(name: &'static str) -> impl Fn() -> String + Copy + 'static {
    let query = use_query_map();
    move || query.with(|q| q.get(name).cloned().unwrap_or_default())
}

/// Plain-text column over a loosely typed record.
fn field(label: impl Into<String>, key: &str) -> Column<Row> {
    let key = key.to_string();
    Column::new(label, move |row: &Row| cell_text(row.get(&key)))
}

/// Columns for backend-described tables; `special` may take over a column's
/// cells, everything else renders as text under an upper-cased heading.
fn dynamic_columns(
    columns: &[String],
    special: impl Fn(&str) -> Option<Column<Row>>,
) -> Vec<Column<Row>> {
    columns
        .iter()
        .map(|name| special(name).unwrap_or_else(|| field(column_heading(name), name)))
        .collect()
}

/// Loading text that tracks a route or query parameter.
fn loading_text(
    param: impl Fn() -> String + 'static,
    describe: impl Fn(&str) -> String + 'static,
) -> Signal<String> {
    Signal::derive(move || describe(&param()))
}

/// Spinner while `state` loads, an error panel linking to `back_href` when it
/// fails, and `ready` once data arrives.
fn settled<T: Clone + 'static>(
    state: ReadLoad<T>,
    loading: impl Into<MaybeSignal<String>>,
    back_href: &'static str,
    back_label: &'static str,
    ready: impl Fn(T) -> View + 'static,
) -> impl IntoView {
    let loading: MaybeSignal<String> = loading.into();
    move || match state.get() {
        LoadState::Loading => view! { <Loading message=loading.get()/> }.into_view(),
        LoadState::Failed(message) => view! {
            <ErrorPanel message=message back_href=back_href back_label=back_label/>
        }
        .into_view(),
        LoadState::Ready(data) => ready(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_text_follows_the_parameter() {
        let runtime = create_runtime();
        let user = create_rw_signal("U-1".to_string());
        let text = loading_text(move || user.get(), |id| format!("Loading activity for {id}..."));
        assert_eq!(text.get(), "Loading activity for U-1...");

        user.set("U-2".to_string());
        assert_eq!(text.get(), "Loading activity for U-2...");
        runtime.dispose();
    }
}
