use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ppd_predictor::linear::LinearClassifier;
use ppd_server::config::{LogFormat, ServerConfig};
use ppd_server::state::AppState;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Plain => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ServerConfig::from_env()?;
    init_tracing(config.log_format);

    // Without the model there is nothing to serve.
    let predictor = LinearClassifier::load(&config.model_path).inspect_err(|e| {
        tracing::error!(error = %e, "risk model could not be loaded; refusing to start");
    })?;

    let bind_addr = config.bind_addr;
    let reap_every = (config.session_ttl() / 4).max(Duration::from_secs(1));
    let state = AppState::new(Arc::new(predictor), config);

    tokio::spawn(ppd_server::run_session_reaper(state.clone(), reap_every));

    let app = ppd_server::router(state);
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(local_addr = %listener.local_addr()?, "starting app");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
