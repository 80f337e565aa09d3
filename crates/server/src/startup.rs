use std::{env, future::Future, net::SocketAddr};

use axum::Router;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> Result<SocketAddr, StartupError> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {}", host, port, e)))
}

/// Database settings from the config file, else from `DATABASE_URL`.
fn database_config(cfg: Option<&configs::AppConfig>) -> Result<DatabaseConfig, StartupError> {
    match cfg {
        Some(cfg) => Ok(DatabaseConfig::from(&cfg.database)),
        None => {
            let mut section = configs::DatabaseConfig::default();
            section.normalize_from_env();
            section.validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
            Ok(DatabaseConfig::from(&section))
        }
    }
}

/// Load `config.toml` once; `None` means "use environment variables".
pub fn load_app_config() -> Option<configs::AppConfig> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(error = %e, "config file unavailable; falling back to environment");
            None
        }
    }
}

/// Connect, migrate and assemble the application router.
pub async fn build_app(app_cfg: Option<&configs::AppConfig>) -> Result<Router, StartupError> {
    let db_cfg = database_config(app_cfg)?;
    let db = connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    let state = ServerState::with_db(db);
    Ok(routes::build_router(state, build_cors()))
}

/// Run the HTTP server, draining in-flight requests once `shutdown` resolves.
///
/// Logging must already be initialised; `app_cfg` is the config the caller loaded
/// (or `None` to fall back to environment variables).
pub async fn run_with_shutdown<F>(app_cfg: Option<configs::AppConfig>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(app_cfg.as_ref()).await?;

    let addr = load_bind_addr(app_cfg.as_ref())?;
    info!(%addr, "starting student registry server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}
