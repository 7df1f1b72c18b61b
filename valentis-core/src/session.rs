use crate::dto::{TotpChallenge, User};
use std::fmt;
use thiserror::Error;

/// Where the browser tab is in the two-step login.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthPhase {
    Login,
    Totp,
    Authenticated,
}

impl fmt::Display for AuthPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthPhase::Login => "login",
            AuthPhase::Totp => "totp",
            AuthPhase::Authenticated => "authenticated",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    BeginChallenge,
    CompleteAuthentication,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transition::BeginChallenge => "begin a two-factor challenge",
            Transition::CompleteAuthentication => "complete authentication",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {action} from the {from} phase")]
    InvalidTransition { from: AuthPhase, action: Transition },
}

/// Tab-scoped authentication state.
///
/// Each variant carries exactly the data valid in that phase, so a pending
/// challenge and a signed-in user can never coexist.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthSession {
    #[default]
    LoggedOut,
    AwaitingSecondFactor {
        challenge: TotpChallenge,
    },
    Authenticated {
        user: User,
    },
}

impl AuthSession {
    pub fn phase(&self) -> AuthPhase {
        match self {
            AuthSession::LoggedOut => AuthPhase::Login,
            AuthSession::AwaitingSecondFactor { .. } => AuthPhase::Totp,
            AuthSession::Authenticated { .. } => AuthPhase::Authenticated,
        }
    }

    pub fn pending_challenge(&self) -> Option<&TotpChallenge> {
        match self {
            AuthSession::AwaitingSecondFactor { challenge } => Some(challenge),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthSession::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    /// Credentials accepted; only valid while logged out.
    pub fn begin_challenge(&mut self, challenge: TotpChallenge) -> Result<(), SessionError> {
        match self {
            AuthSession::LoggedOut => {
                *self = AuthSession::AwaitingSecondFactor { challenge };
                Ok(())
            }
            _ => Err(self.reject(Transition::BeginChallenge)),
        }
    }

    /// Second factor accepted; only valid while a challenge is pending.
    pub fn complete_authentication(&mut self, user: User) -> Result<(), SessionError> {
        match self {
            AuthSession::AwaitingSecondFactor { .. } => {
                *self = AuthSession::Authenticated { user };
                Ok(())
            }
            _ => Err(self.reject(Transition::CompleteAuthentication)),
        }
    }

    pub fn logout(&mut self) {
        *self = AuthSession::LoggedOut;
    }

    fn reject(&self, action: Transition) -> SessionError {
        SessionError::InvalidTransition {
            from: self.phase(),
            action,
        }
    }
}
