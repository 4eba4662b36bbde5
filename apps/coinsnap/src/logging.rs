use crate::config::LogFormat;
use anyhow::Context;
use tracing_subscriber::EnvFilter;

pub fn init_tracing(log_level: &str, log_format: LogFormat) -> anyhow::Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    let env_filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("invalid log filter '{filter}'"))?;

    match log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(env_filter).init(),
    }

    Ok(())
}
