//! Hosts the Valentis browser bundle: static files with client-route
//! fallback, runtime client config, and a same-origin proxy to the backend.

pub mod config;
pub mod error;
pub mod proxy;

pub use config::ServerConfig;
pub use error::ServerError;
pub use proxy::app_router;
