use std::io;

use configs::{LogConfig, LogFormat};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the process-wide tracing subscriber from `[log]` settings.
/// - `RUST_LOG` wins over the configured level
/// - Writes to stdout for consistent container logging behavior
pub fn init_logging(cfg: &LogConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(env_filter).with_target(false);
    let _ = match cfg.format {
        LogFormat::Json => builder.json().with_writer(io::stdout).try_init(),
        LogFormat::Compact => builder.compact().with_writer(io::stdout).try_init(),
    };
}

/// JSON output at `info`, used before the config file has been read.
pub fn init_logging_default() {
    init_logging(&LogConfig::default());
}
