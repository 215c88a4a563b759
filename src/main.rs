//! An example web service with axum.

use greeting_service::{
    infra::{config, logging},
    server,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let _guard = logging::init_logging();
    let config = config::load_config()?;

    let listener = TcpListener::bind(format!(
        "{}:{}",
        config.server.http_address, config.server.http_port
    ))
    .await?;
    server::run_app(listener).await?;

    Ok(())
}
