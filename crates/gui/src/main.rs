mod board_canvas;
mod gui;

use board::{api::MatchClient, config::Config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let client = MatchClient::new(&config)?;
    tracing::info!(api = %config.api_url, "starting chessboard");

    gui::run(gui::Launch { config, client })?;
    Ok(())
}
