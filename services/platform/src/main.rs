use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use encore_auth_types::token::TokenService;
use encore_core::config::Config;
use encore_core::tracing::init_tracing;

use encore_platform::config::PlatformConfig;
use encore_platform::infra::password::Argon2Hasher;
use encore_platform::router::build_router;
use encore_platform::state::AppState;
use encore_platform::usecase::report::run_listen_report;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = PlatformConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        tokens: TokenService::new(&config.jwt_secret, config.jwt_ttl_secs),
        hasher: Argon2Hasher,
    };

    // Listen report
    let report_period = Duration::from_secs(config.stats_report_interval_secs);
    tokio::spawn(run_listen_report(state.listen_repo(), report_period));

    // HTTP server
    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.platform_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("platform service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
