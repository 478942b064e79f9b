//! tailvane exporter binary.
//!
//! Startup:
//! - fetch the current status and derive the bind address from the self node
//! - serve `/metrics` on `<self-ip>:9995`
//! - race the HTTP server against the address watchdog; a watchdog fatal
//!   terminates the whole process so a supervisor can restart it with a
//!   freshly derived address

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use tailvane_exporter::fetch::StatusSource;
use tailvane_exporter::{app_state, fetch, router, watchdog};

/// Port the exposition endpoint binds on.
const METRICS_PORT: u16 = 9995;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let source: Arc<dyn StatusSource> = Arc::new(fetch::StatusCommand::new());

    let status = source
        .fetch_status()
        .await
        .expect("startup status fetch failed");
    let boot_ip = status
        .self_node
        .primary_ip()
        .expect("no usable self address");
    tracing::info!(
        version = %status.version,
        backend = %status.backend_state,
        %boot_ip,
        "tailvane starting"
    );

    let listen = SocketAddr::new(boot_ip, METRICS_PORT);
    let state = app_state::AppState::new(Arc::clone(&source));
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");
    tracing::info!(%listen, "serving metrics");

    tokio::select! {
        res = async { axum::serve(listener, app).await } => {
            res.expect("server failed");
        }
        fatal = watchdog::run(source, boot_ip, watchdog::WATCH_INTERVAL) => {
            tracing::error!(error = %fatal, "watchdog fatal; shutting down");
            std::process::exit(1);
        }
    }
}
