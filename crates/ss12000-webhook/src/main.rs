mod api;
mod middleware;
mod worker;

use ss12000_client::Ss12000Client;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ss12000_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = Ss12000Client::new(
        &config.base_url,
        config.auth_token.as_deref(),
        config.request_timeout_secs,
    )?;

    let (tx, rx) = mpsc::channel(worker::QUEUE_CAPACITY);
    let worker = worker::spawn(client, rx);

    let app = build_app(AppState::new(tx), &config.webhook_path);
    let listener = tokio::net::TcpListener::bind(config.webhook_bind_addr).await?;
    tracing::info!(
        addr = %config.webhook_bind_addr,
        path = %config.webhook_path,
        env = %config.env,
        "SS12000 webhook receiver listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the only sender; the worker drains what is queued and exits.
    worker.await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, draining webhook queue");
}
