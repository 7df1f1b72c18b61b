use crate::loader::{load_on, LoadState};
use crate::store::SessionStore;
use crate::transport::Api;
use leptos::*;
use valentis_core::views::{is_complete_totp_code, sanitize_totp_code};
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn Login(session: SessionStore) -> impl IntoView {
    let api = expect_context::<Api>();
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        pending.set(true);
        let api = api.clone();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let result = api.login(&email, &password).await;
            pending.set(false);
            match result {
                Ok(challenge) => {
                    if let Err(err) = session.begin_challenge(challenge) {
                        log::warn!("login response ignored: {err}");
                    }
                }
                Err(err) => {
                    log::warn!("login failed: {err}");
                    error.set(Some(err.user_message("Login failed")));
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-card__header">
                    <div class="auth-logo">
                        <div class="auth-logo__icon">"V"</div>
                        <h1>"Valentis"</h1>
                    </div>
                    <p class="auth-card__subtitle">"Hospital Revenue & Payment Risk Intelligence"</p>
                </div>

                <form class="auth-form" on:submit=on_submit>
                    <div class="auth-form__group">
                        <label for="email">"Email Address"</label>
                        <input
                            id="email"
                            type="email"
                            placeholder="auditor@hospital.org"
                            required
                            autofocus
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="auth-form__group">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            placeholder="Enter your password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>

                    {move || error.get().map(|message| view! { <div class="auth-error">{message}</div> })}

                    <button type="submit" class="btn btn--primary auth-btn" disabled=move || pending.get()>
                        {move || if pending.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <div class="auth-card__footer">
                    <p>"Demo Credentials"</p>
                    <div class="auth-demo-creds">
                        <code>"auditor@hospital.org / Auditor2024!"</code>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn TotpVerify(session: SessionStore) -> impl IntoView {
    let Some(challenge) = session.challenge() else {
        log::warn!("second-factor screen shown without a pending challenge");
        return ().into_view();
    };
    let api = expect_context::<Api>();
    let code = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);
    let show_secret = create_rw_signal(false);

    let helper_email = challenge.email.clone();
    let helper_api = api.clone();
    let demo_code = load_on(
        move || helper_email.clone(),
        move |email| {
            let api = helper_api.clone();
            async move { api.current_code(&email).await }
        },
        "Demo code unavailable",
    );

    let email = challenge.email.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let entered = code.get_untracked();
        if !is_complete_totp_code(&entered) {
            return;
        }
        error.set(None);
        pending.set(true);
        let api = api.clone();
        let email = email.clone();
        spawn_local(async move {
            let result = api.verify_totp(&email, &entered).await;
            pending.set(false);
            match result {
                Ok(user) => {
                    if let Err(err) = session.complete_authentication(user) {
                        log::warn!("verification response ignored: {err}");
                    }
                }
                Err(err) => {
                    log::warn!("verification failed: {err}");
                    error.set(Some(err.user_message("Verification failed")));
                }
            }
        });
    };

    let secret = challenge.secret.clone();
    let qr_code = challenge.qr_code_image.clone();
    let qr_image = (!qr_code.is_empty())
        .then(move || view! { <img src=qr_code alt="TOTP QR Code" class="totp-qr__image"/> });
    let helper = move || match demo_code.get() {
        LoadState::Ready(current) => {
            let fill = current.code.clone();
            Some(view! {
                <div class="totp-dev-helper">
                    <p>"Demo Helper"</p>
                    <button type="button" class="btn btn--outline" on:click=move |_| code.set(fill.clone())>
                        "Auto-fill code: " <strong>{current.code}</strong>
                    </button>
                </div>
            })
        }
        _ => None,
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--totp">
                <div class="auth-card__header">
                    <div class="auth-logo">
                        <div class="auth-logo__icon">"2FA"</div>
                        <h1>"Two-Factor Authentication"</h1>
                    </div>
                    <p class="auth-card__subtitle">
                        "Welcome, " <strong>{challenge.name.clone()}</strong>
                        ". Verify your identity with Google Authenticator."
                    </p>
                </div>

                <div class="totp-setup">
                    <div class="totp-qr">
                        <p class="totp-qr__label">"1. Scan this QR code with Google Authenticator"</p>
                        {qr_image}
                    </div>
                    <div class="totp-secret-toggle">
                        <button type="button" class="btn btn--outline" on:click=move |_| show_secret.update(|s| *s = !*s)>
                            {move || if show_secret.get() { "Hide" } else { "Show" }}
                            " Manual Setup Key"
                        </button>
                        <Show when=move || show_secret.get()>
                            <code class="totp-secret-code">{secret.clone()}</code>
                        </Show>
                    </div>
                </div>

                <form class="auth-form" on:submit=on_submit>
                    <div class="auth-form__group">
                        <label for="totp-code">"2. Enter the 6-digit code"</label>
                        <input
                            id="totp-code"
                            class="totp-input"
                            type="text"
                            inputmode="numeric"
                            pattern="[0-9]{6}"
                            maxlength="6"
                            placeholder="000000"
                            required
                            autofocus
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(sanitize_totp_code(&event_target_value(&ev)))
                        />
                    </div>

                    {move || error.get().map(|message| view! { <div class="auth-error">{message}</div> })}

                    <button
                        type="submit"
                        class="btn btn--primary auth-btn"
                        disabled={move || pending.get() || !is_complete_totp_code(&code.get())}
                    >
                        {move || if pending.get() { "Verifying..." } else { "Verify & Continue" }}
                    </button>
                </form>

                <div class="auth-card__footer">
                    {helper}
                    <button type="button" class="btn btn--outline" on:click=move |_| session.logout()>
                        "← Back to Login"
                    </button>
                </div>
            </div>
        </div>
    }
    .into_view()
}
