use depositor_gateway::{
    blockchain::ChainClients,
    config::{NetworkInfo, Settings},
    server::start_server,
    AppState,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    // RUST_LOG wins over LOG_LEVEL when both are set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting depositor gateway");

    let network = NetworkInfo::from_path(&settings.network.network_info_path)?;
    info!(
        path = %settings.network.network_info_path,
        chains = ?network.chain_ids().collect::<Vec<_>>(),
        "Network map loaded"
    );

    let clients = ChainClients::from_settings(&settings, &network)?;
    info!(connected = ?clients.chain_ids(), "Chain clients initialized");

    let state = AppState::new(settings, network, clients)?;
    info!(home_chain_id = state.home_chain_id(), "Configuration loaded successfully");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state).await {
            error!("Web server error: {}", e);
        }
    });

    tokio::select! {
        _ = server_handle => {
            error!("Web server stopped unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutting down depositor gateway");
    Ok(())
}
