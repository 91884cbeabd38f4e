use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use folio_core::MemStorage;
use folio_web::{AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const THROTTLE_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_web=debug,folio_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::load()?;
    let bind_addr = config.bind_addr;
    let tls_config = config.tls.clone();

    if let Some(dir) = &config.static_files.dir {
        tracing::info!("Serving front end from {}", dir.display());
    }

    let state = AppState::new(config, Arc::new(MemStorage::new()));
    state.seed_admin().await?;

    // Throttle records otherwise accumulate for every address that ever failed a login
    let cleanup_throttle = state.throttle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(THROTTLE_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = cleanup_throttle.purge_expired();
            if purged > 0 {
                tracing::debug!("Purged {purged} stale login attempt records");
            }
        }
    });

    let app = folio_web::app(state);

    if let (Some(cert), Some(key)) = (&tls_config.cert_path, &tls_config.key_path) {
        use axum_server::tls_rustls::RustlsConfig;
        let rustls_config = RustlsConfig::from_pem_file(cert, key).await?;
        tracing::info!("folio-web listening on https://{}", bind_addr);
        axum_server::bind_rustls(bind_addr, rustls_config)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await?;
    } else {
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        tracing::info!("folio-web listening on http://{}", bind_addr);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
    }

    Ok(())
}
