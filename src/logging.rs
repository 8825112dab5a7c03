// Diagnostics go to stderr so stdout stays clean for results
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "nlpiffy=info,tower_http=info";

pub fn init(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| anyhow!("invalid log filter '{}': {}", filter, e))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))
}
