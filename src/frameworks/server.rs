// Framework bootstrap for the simulation server runtime.

use crate::frameworks::config::{self, WorldConfig};
use crate::frameworks::world_setup::build_context;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::{ObserverHandle, PauseFlag, spawn_observer};

use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::broadcast;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let (state, observer) = build_state()?;
    let app = app(state);

    tracing::info!(%address, "listening");

    let served = axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    });

    // The observer thread blocks on the guard, so join it off the async workers.
    let _ = tokio::task::spawn_blocking(move || observer.stop()).await;
    served
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> Result<(AppState, ObserverHandle)> {
    let world_config = WorldConfig::from_env()
        .map_err(|e| std::io::Error::other(format!("failed to load world config: {e}")))?;

    let sim = build_context(&world_config, PauseFlag::default())
        .map_err(|e| std::io::Error::other(format!("failed to build world: {e}")))?;
    let sim = Arc::new(sim);

    let (snapshot_tx, _) = broadcast::channel(config::SNAPSHOT_BROADCAST_CAPACITY);

    let observer = spawn_observer(
        sim.clone(),
        SystemClock,
        config::observer_interval(),
        snapshot_tx.clone(),
    )?;

    Ok((AppState { sim, snapshot_tx }, observer))
}
