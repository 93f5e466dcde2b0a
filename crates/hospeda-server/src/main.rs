//! # Hospeda Server
//!
//! Entry point: loads configuration, wires components and serves the REST
//! API until SIGINT/SIGTERM, then drains pending cache work.

use hospeda_config::{ConfigLoader, ObservabilityConfig};
use hospeda_core::{HospedaError, HospedaResult};
use hospeda_rest::create_router;
use hospeda_server::{
    container::Container,
    logging::init_logging,
    startup::{print_banner, print_startup_info},
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config.observability);

    print_banner();
    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: hospeda_config::AppConfig) -> HospedaResult<()> {
    let container = Container::build(config).await?;
    let server_config = container.config.server.clone();

    if let Some(limiters) = container.rate_limiters.clone() {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
            loop {
                interval.tick().await;
                limiters.general.prune();
                limiters.auth.prune();
                limiters.create.prune();
            }
        });
    }

    let router = create_router(
        container.app_state(),
        container.auth_state(),
        container.rate_limiters.clone(),
        &server_config,
    );

    let listener = tokio::net::TcpListener::bind(server_config.addr())
        .await
        .map_err(|e| HospedaError::Internal(format!("Failed to bind {}: {}", server_config.addr(), e)))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| HospedaError::Internal(format!("Failed to read bound address: {}", e)))?;
    print_startup_info(local_addr);

    let served = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    container.shutdown().await;

    served.map_err(|e| HospedaError::Internal(format!("REST server error: {}", e)))?;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
