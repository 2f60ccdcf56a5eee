use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use yt_audio_server::config::Config;
use yt_audio_server::resolver::YtDlp;
use yt_audio_server::search::YouTubeSearch;
use yt_audio_server::server::Server;
use yt_audio_server::state::AppState;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // JSON logs in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("yt_audio_server=info,tower_http=info"));

    if config.is_dev {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    }

    info!("🚀 yt-audio-server starting...");
    info!(
        program = %config.resolver.program,
        timeout_secs = config.resolver.timeout.as_secs(),
        max_concurrent = config.resolver.max_concurrent,
        max_output_bytes = config.resolver.max_output_bytes,
        "📝 Configuration loaded"
    );

    let search = YouTubeSearch::new(&config.search);
    if search.is_configured() {
        info!(keys = search.key_count(), "🔎 YouTube search enabled");
    } else {
        tracing::warn!("YT_KEY_1..YT_KEY_3 not set, /api/search will answer 503");
    }

    let state = AppState::new(Arc::new(YtDlp::new(&config.resolver))).with_search(search);

    let server = Server::bind(&config.server_addr(), state)
        .await
        .expect("Failed to bind to address");
    let handle = server.start().expect("Server failed to start");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");

    info!("Shutdown signal received");
    handle.stop().await.expect("Server failed during shutdown");
}
