use tracing_subscriber::EnvFilter;

pub mod tui;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not tear through the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = tui::run().await {
        eprintln!("chessboard: {e}");
        std::process::exit(1);
    }
}
