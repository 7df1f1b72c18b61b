//! Target-independent pieces of the Valentis dashboard.
//!
//! Everything here compiles for both the browser bundle and the host, so the
//! rules the UI renders by (formatting, filters, routes, the auth session
//! machine, and the API client itself) are tested without a browser.

pub mod api;
pub mod chart;
pub mod config;
pub mod dto;
pub mod fetch;
pub mod format;
pub mod routes;
pub mod session;
pub mod views;

pub use api::{ApiClient, ApiError, Transport};
pub use config::ClientConfig;
pub use session::{AuthPhase, AuthSession, SessionError};
