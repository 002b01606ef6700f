use std::{env, path::Path, sync::Arc};

use configs::{AppConfig, ConflictMode, LogFormat, StudentsConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::student::{repo::seaorm::SeaOrmStudentRepository, ConflictPolicy};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// Initialize logging via shared common utils
pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => common::utils::logging::init_logging_default(),
        LogFormat::Json => common::utils::logging::init_logging_json(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `CONFIG_PATH` (default `config.toml`) when it exists, otherwise build
/// the config from `SERVER_HOST`/`SERVER_PORT`/`DATABASE_URL`.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = if Path::new(&path).exists() {
        let mut cfg = configs::load_from_file(&path).map_err(|e| StartupError::InvalidConfig(format!("{path}: {e}")))?;
        cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        cfg
    } else {
        AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?
    };
    Ok(cfg)
}

pub fn conflict_policy(cfg: &StudentsConfig) -> ConflictPolicy {
    match cfg.conflict_policy {
        ConflictMode::Propagate => ConflictPolicy::Propagate,
        ConflictMode::LastWriterWins => ConflictPolicy::LastWriterWins { max_attempts: cfg.conflict_max_attempts },
    }
}

/// Connect, migrate if configured, and serve until the listener fails.
pub async fn run_with(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Runtime(format!("migrate up failed: {e}")))?;
        info!(event = "migrated", "schema up to date");
    }

    let policy = conflict_policy(&cfg.students);
    let state = ServerState::new(Arc::new(SeaOrmStudentRepository::new(db)), policy);
    let app = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port))
        .await
        .map_err(|e| StartupError::Runtime(format!("bind {}:{}: {e}", cfg.server.host, cfg.server.port)))?;
    let addr = listener.local_addr().map_err(anyhow::Error::from)?;
    info!(%addr, ?policy, "starting student registry server");
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}
