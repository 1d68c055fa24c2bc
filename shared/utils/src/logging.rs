use anyhow::Result;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initializes the global tracing subscriber from the logging section of the
/// application config. `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let fmt_layer = fmt::layer().json().with_span_events(FmtSpan::CLOSE);
            if let Some(file_path) = &config.file_path {
                registry
                    .with(fmt_layer.with_writer(open_log_file(file_path)?))
                    .init();
            } else {
                registry.with(fmt_layer).init();
            }
        }
        _ => {
            let fmt_layer = fmt::layer().with_span_events(FmtSpan::CLOSE);
            if let Some(file_path) = &config.file_path {
                registry
                    .with(fmt_layer.with_writer(open_log_file(file_path)?))
                    .init();
            } else {
                registry.with(fmt_layer).init();
            }
        }
    }

    tracing::info!("Logging initialized with level: {}", config.level);
    Ok(())
}

fn open_log_file(path: &str) -> Result<std::fs::File> {
    Ok(std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?)
}
