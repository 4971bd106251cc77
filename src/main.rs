use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use news_aggregator::{
    api::routes::create_router,
    config::Config,
    corpus,
    profile::UserProfile,
    recommender::NewsRecommender,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    // Load the news corpus and the single user record
    let articles = corpus::load_articles(&config.news_data_path);
    let profile = UserProfile::load(&config.user_data_path);

    // Create application state
    let app_state = AppState {
        config: Arc::new(config),
        articles: Arc::new(articles),
        profile: Arc::new(Mutex::new(profile)),
        recommender: Arc::new(Mutex::new(NewsRecommender::new())),
    };

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    info!(%server_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
