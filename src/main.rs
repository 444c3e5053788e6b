use guestlist_server::{Config, Server, ServerState, utils::logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    logger::init(&config);

    tracing::info!("Starting guestlist-server (env: {})", config.environment);

    let state = ServerState::initialize(&config).await?;

    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
