use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tsxdesk_core::{ReqwestHttpClient, Settings};
use tsxdesk_web::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env();
    let bind = settings.bind.clone();
    let http_client = Arc::new(ReqwestHttpClient::new(&settings.user_agent)?);
    let app = router(AppState::new(settings, http_client));

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "tsxdesk-web listening");
    axum::serve(listener, app).await?;

    Ok(())
}
