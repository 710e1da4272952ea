use tracing_subscriber::EnvFilter;

use gameshelf_server::build_app;
use gameshelf_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::load();
    config.validate();

    if let Err(e) = config.storage.ensure_layout() {
        tracing::error!("Failed to prepare storage directories: {e}");
        std::process::exit(1);
    }

    let listen_addr = config.listen_addr.clone();
    let (app, _state) = build_app(config);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {listen_addr}: {e}"));

    tracing::info!("Gameshelf server listening on {listen_addr}");

    axum::serve(listener, app).await.expect("Server error");
}
