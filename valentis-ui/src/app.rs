use crate::components::{Header, Sidebar};
use crate::pages::{
    AccountDrillDown, AnomalyMonitor, AuditLog, AuditUserDetail, CsvViewer, Dashboard,
    DepartmentDetail, FraudAlerts, FraudFlagged, FraudHighConfidence, Login, PaymentHistory,
    PaymentPlans, TotpVerify, Upload,
};
use crate::store::SessionStore;
use leptos::*;
use leptos_router::{Route, Router, Routes};
use valentis_core::routes::layout_class;
use valentis_core::AuthPhase;

/// Top-level shell: the auth screens until both factors pass, then the
/// routed dashboard.
#[component]
pub fn App(session: SessionStore) -> impl IntoView {
    let phase = create_memo(move |_| session.phase());

    view! {
        <Router>
            {move || match phase.get() {
                AuthPhase::Login => view! { <Login session=session/> }.into_view(),
                AuthPhase::Totp => view! { <TotpVerify session=session/> }.into_view(),
                AuthPhase::Authenticated => view! { <MainLayout session=session/> }.into_view(),
            }}
        </Router>
    }
}

#[component]
fn MainLayout(session: SessionStore) -> impl IntoView {
    let sidebar_open = create_rw_signal(false);
    let toggle = Callback::new(move |()| sidebar_open.update(|open| *open = !*open));

    view! {
        <div class={move || layout_class(sidebar_open.get())}>
            <Sidebar open=sidebar_open on_toggle=toggle/>
            <div class="main-content">
                <Header session=session/>
                <main class="page-container">
                    <Routes>
                        <Route path="/" view=Dashboard/>
                        <Route path="/upload" view=Upload/>
                        <Route path="/upload/view/:filename" view=CsvViewer/>
                        <Route path="/fraud" view=FraudAlerts/>
                        <Route path="/fraud/flagged" view=FraudFlagged/>
                        <Route path="/fraud/high-confidence" view=FraudHighConfidence/>
                        <Route path="/anomalies" view=AnomalyMonitor/>
                        <Route path="/anomalies/department" view=DepartmentDetail/>
                        <Route path="/accounts/:id" view=AccountDrillDown/>
                        <Route path="/plans" view=PaymentPlans/>
                        <Route path="/plans/history/:accountId" view=PaymentHistory/>
                        <Route path="/audit" view=AuditLog/>
                        <Route path="/audit/user/:userId" view=AuditUserDetail/>
                    </Routes>
                </main>
            </div>
        </div>
    }
}
