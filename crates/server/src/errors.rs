use thiserror::Error;

/// Failures that abort startup. None of them allow a partial start.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0:#}")]
    Config(anyhow::Error),
    #[error("database connection failed: {0:#}")]
    Database(anyhow::Error),
    #[error("auto migration failed: {0:#}")]
    Migration(anyhow::Error),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
