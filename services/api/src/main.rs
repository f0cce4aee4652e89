use sea_orm::Database;
use tracing::info;

use yamdb_api::config::ApiConfig;
use yamdb_api::router::build_router;
use yamdb_api::state::AppState;
use yamdb_auth_types::token::JwtSecret;
use yamdb_core::config::Config as _;
use yamdb_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    let config = ApiConfig::from_env();
    init_tracing(config.log_format);

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
