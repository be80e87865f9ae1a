//! Process settings from the environment (a `.env` file is loaded first by `main`).

use crate::error::StartupError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Variables checked, in order, for the store connection string.
pub const STORE_URL_VARS: &[&str] = &["STORE_URL", "MONGODB_URI", "DATABASE_URL"];

#[derive(Clone, Debug)]
pub struct Settings {
    pub store_url: String,
    /// Mongo database name, or Postgres schema holding the collection tables.
    pub database: String,
    pub bind_addr: String,
    pub port: u16,
    pub public_dir: PathBuf,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Settings {
    /// Defaults for everything except the store connection string.
    pub fn with_store_url(store_url: impl Into<String>) -> Self {
        Self {
            store_url: store_url.into(),
            database: "studentDB".into(),
            bind_addr: "0.0.0.0".into(),
            port: 3000,
            public_dir: PathBuf::from("public"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
        }
    }

    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store_url = STORE_URL_VARS
            .iter()
            .find_map(|key| get(*key))
            .ok_or(StartupError::MissingConfig("STORE_URL"))?;
        let mut settings = Self::with_store_url(store_url);

        if let Some(v) = get("STORE_DATABASE") {
            settings.database = v;
        }
        if let Some(v) = get("BIND_ADDR") {
            settings.bind_addr = v;
        }
        if let Some(v) = get("PORT") {
            settings.port = parse_number("PORT", &v)?;
        }
        if let Some(v) = get("PUBLIC_DIR") {
            settings.public_dir = PathBuf::from(v);
        }
        if let Some(v) = get("STORE_CONNECT_TIMEOUT_SECS") {
            settings.connect_timeout = Duration::from_secs(parse_number("STORE_CONNECT_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
            settings.request_timeout = Duration::from_secs(parse_number("REQUEST_TIMEOUT_SECS", &v)?);
        }
        Ok(settings)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, StartupError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| StartupError::InvalidConfig {
        key,
        reason: format!("'{}': {}", value, e),
    })
}
