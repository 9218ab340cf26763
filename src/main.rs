use tracing_subscriber::EnvFilter;

use daily_diet_api::{app, config, database, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = config::config();
    tracing::info!("Starting Daily Diet API in {:?} mode", config.environment);

    let pool = database::connect(&config.database.url)
        .await
        .unwrap_or_else(|e| panic!("failed to open database {}: {}", config.database.url, e));

    let app = app(AppState::new(pool));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Daily Diet API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
