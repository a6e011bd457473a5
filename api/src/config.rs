use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context};
use axum::http::HeaderValue;
use stockroom::{ReturnPolicy, Storage};
use tracing::{info, warn};

pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

pub struct Config {
    pub port: u16,
    pub storage: Storage,
    pub return_policy: ReturnPolicy,
    /// `None` allows any origin.
    pub cors_origin: Option<HeaderValue>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            port: try_load("STOCKROOM_PORT", DEFAULT_PORT)?,
            storage: storage_from(var("STOCKROOM_DATABASE")),
            return_policy: try_load("STOCKROOM_RESTOCK_ON_RETURN", "false")?,
            cors_origin: cors_origin_from(&try_load::<String>(
                "STOCKROOM_CORS_ORIGIN",
                DEFAULT_CORS_ORIGIN,
            )?)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            storage: Storage::InMemory,
            return_policy: ReturnPolicy::Keep,
            cors_origin: None,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("invalid {key} value `{raw}`: {e}")
    })
}

fn storage_from(value: Option<String>) -> Storage {
    match value.as_deref().map(str::trim) {
        None => {
            info!("STOCKROOM_DATABASE not set, using the platform data directory");
            Storage::Default
        }
        Some(":memory:") => Storage::InMemory,
        Some(path) => Storage::File(PathBuf::from(path)),
    }
}

fn cors_origin_from(origin: &str) -> anyhow::Result<Option<HeaderValue>> {
    if origin == "*" {
        return Ok(None);
    }
    let value = HeaderValue::from_str(origin)
        .with_context(|| format!("invalid STOCKROOM_CORS_ORIGIN `{origin}`"))?;
    Ok(Some(value))
}
