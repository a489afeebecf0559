//! Tracing subscriber setup.
//!
//! One global subscriber: an `EnvFilter` from `RUST_LOG` (falling back to
//! [`DEFAULT_FILTER`]) and a JSON or human-readable formatter per
//! [`LogFormat`].

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogFormat;

pub const DEFAULT_FILTER: &str = "recipebook=debug,tower_http=debug";

/// Install the global subscriber. Errors if one is already installed.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        LogFormat::Pretty => registry.with(fmt::layer()).try_init()?,
    }

    Ok(())
}
