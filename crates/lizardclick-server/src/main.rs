//! lizardclick server
//!
//! - `GET /clicks`, `POST /click` over one batched counter
//! - Counter loaded from the store before the first request is served
//! - Graceful shutdown on Ctrl-C / SIGTERM (no final flush)

use tracing_subscriber::{fmt, EnvFilter};

use lizardclick_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var(config::CONFIG_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_or_default(&path).expect("config load failed");
    let listen = cfg.server.listen_addr().expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::from_config(&cfg).expect("state init failed");
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");
    tracing::info!(%listen, "lizardclick-server listening");

    // Requests queue in the backlog until the persisted total is loaded.
    state.initialize().await;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("server failed");

    tracing::info!("lizardclick-server stopped");
}

async fn shutdown_signal(state: app_state::AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    state.set_draining();
    let st = state.counter().snapshot();
    tracing::info!(
        persisted_total = st.persisted_total,
        pending_delta = st.pending_delta,
        "shutdown requested, draining"
    );
}
