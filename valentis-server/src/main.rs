use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use valentis_server::{app_router, ServerConfig, ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valentis_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    if config.upstream.is_none() {
        tracing::warn!("VALENTIS_API_UPSTREAM not set; proxied API calls will answer 502");
    }

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %config.bind,
        dist = %config.dist.display(),
        api_base = %config.api_base,
        "valentis-server listening"
    );
    axum::serve(listener, app_router(config)).await?;
    Ok(())
}
