//! Read-only web server for the public pages, the TV monitor and the JSON API

pub mod handlers;
pub mod router;
pub mod state;

use crate::infrastructure::FileSystemRepository;
use anyhow::Context;
use tracing::info;

pub use router::build_router;
pub use state::AppState;

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(repository: FileSystemRepository, addr: &str) -> anyhow::Result<()> {
    let root = repository.root.clone();
    let state = AppState::new(repository)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(addr = %listener.local_addr()?, root = %root.display(), "serving sirup dashboard");
    println!("Serving on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
