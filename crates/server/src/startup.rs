use std::future::Future;

use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `CONFIG_PATH` (default `config.toml`), normalized and validated.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(StartupError::Config)
}

/// Connect the database, apply migrations, then serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = models::db::connect(&cfg.database)
        .await
        .map_err(StartupError::Database)?;
    models::db::auto_migrate(&db)
        .await
        .map_err(StartupError::Migration)?;

    let app = routes::build_router(AppState::new(db), build_cors());

    let addr = cfg.app.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    let local = listener.local_addr().map_err(StartupError::Serve)?;
    info!(addr = %local, event = "listening", "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve)?;
    Ok(())
}
