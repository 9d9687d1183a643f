use std::net::SocketAddr;
use std::sync::Arc;

use axum::serve;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{info, warn};
use transactions_relay::{
    api,
    infrastructure::{config::Config, state::AppState, upstream::MonarchClient},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init();
    let config = Arc::new(Config::from_env()?);

    if config.proxy.api_key.is_empty() {
        warn!("proxy api key is not configured; all requests will be rejected with 401");
    }

    let upstream = Arc::new(MonarchClient::new(config.upstream.graphql_url.clone())?);
    let state = Arc::new(AppState::new(Arc::clone(&config), upstream));

    let router = api::build_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!(%addr, upstream = %config.upstream.graphql_url, "starting transactions relay");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server = serve(listener, router.into_make_service());

    tokio::select! {
        res = server => {
            if let Err(err) = res {
                warn!(error = ?err, "server exited with error");
            }
        }
        _ = shutdown_signal() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
