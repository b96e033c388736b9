use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::auth::domain::RegisterInput;
use service::auth::errors::AuthError;

use crate::routes::{self, auth::ServerState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Create the back-office account named by `ADMIN_EMAIL` / `ADMIN_PASSWORD` when both are set.
async fn seed_admin(state: &ServerState) -> anyhow::Result<()> {
    let (Ok(email), Ok(password)) = (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) else {
        return Ok(());
    };
    let input = RegisterInput {
        first_name: "Admin".into(),
        last_name: "Adboard".into(),
        email,
        password,
        introduction: None,
    };
    match state.auth.register_admin(input).await {
        Ok(user) => info!(user_id = %user.id, "admin_account_seeded"),
        Err(AuthError::Conflict) => info!("admin account already present"),
        Err(e) => warn!(error = %e, "admin account not seeded"),
    }
    Ok(())
}

/// Connect, migrate and assemble the application from a loaded config.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    let state = ServerState::new(db, &cfg.auth, cfg.pagination.clone());
    seed_admin(&state).await?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_or_env()?;
    common::env::ensure_env("public", "public/uploads").await?;
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting adboard server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
