use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use crate::config::{FunctionConfig, LogFormat};

/// Installs the global subscriber for a function binary.
///
/// `RUST_LOG` directives win over `LOG_LEVEL` when present. Timestamps and
/// module targets are omitted since CloudWatch records ingestion time.
pub fn init_logging(config: &FunctionConfig) -> Result<(), lambda_runtime::Error> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(false)
        .without_time();

    match config.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    }
}

fn env_filter(config: &FunctionConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(config.log_level).into())
    })
}
