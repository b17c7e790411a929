use tracing_subscriber::EnvFilter;

use btc_wallet_analyzer::config::Config;
use btc_wallet_analyzer::web::{self, AppState};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Load configuration (missing file -> built-in defaults)
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load_or_default(&config_path)?;

    // Initialize structured logging (set RUST_LOG=debug for more output)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    tracing::info!("BTC Wallet Analyzer starting");
    tracing::info!(
        explorer = %config.explorer.base_url,
        log_path = %config.storage.log_path,
        pdf_path = %config.storage.pdf_path,
        "Configuration loaded from {}",
        config_path
    );

    let state = AppState::from_config(&config);
    web::serve(state, &config.server.host, config.server.port).await?;

    tracing::info!("BTC Wallet Analyzer stopped");
    Ok(())
}
