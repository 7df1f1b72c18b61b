use leptos::*;
use valentis_core::dto::{TotpChallenge, User};
use valentis_core::{AuthPhase, AuthSession, SessionError};

/// Reactive handle on the tab's [`AuthSession`].
///
/// Created once at startup and handed down as a prop; nothing reaches for it
/// through context.
#[derive(Clone, Copy)]
pub struct SessionStore(RwSignal<AuthSession>);

impl SessionStore {
    pub fn new() -> Self {
        Self(create_rw_signal(AuthSession::default()))
    }

    pub fn phase(&self) -> AuthPhase {
        self.0.with(AuthSession::phase)
    }

    pub fn challenge(&self) -> Option<TotpChallenge> {
        self.0.with(|s| s.pending_challenge().cloned())
    }

    pub fn user(&self) -> Option<User> {
        self.0.with(|s| s.user().cloned())
    }

    pub fn begin_challenge(&self, challenge: TotpChallenge) -> Result<(), SessionError> {
        let email = challenge.email.clone();
        let mut outcome = Ok(());
        self.0.update(|s| outcome = s.begin_challenge(challenge));
        if outcome.is_ok() {
            log::info!("password accepted for {email}, awaiting second factor");
        }
        outcome
    }

    pub fn complete_authentication(&self, user: User) -> Result<(), SessionError> {
        let email = user.email.clone();
        let mut outcome = Ok(());
        self.0.update(|s| outcome = s.complete_authentication(user));
        if outcome.is_ok() {
            log::info!("{email} signed in");
        }
        outcome
    }

    pub fn logout(&self) {
        self.0.update(AuthSession::logout);
        log::info!("signed out");
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
