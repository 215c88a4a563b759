//! Graceful shutdown support.

/// Completes when when ctrl-c is pressed.
pub async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to fetch ctrl_c: {}", e);
    }
    tracing::info!("Shutting down");
}
