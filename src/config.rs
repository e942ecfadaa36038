use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use crate::types::Config;

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:9141";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 10;
pub const DEFAULT_CYCLE_TIMEOUT_SECONDS: u64 = 30;

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let listen_address: SocketAddr = env
        .get_var("LISTEN_ADDRESS")
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_string())
        .parse()
        .context("Invalid LISTEN_ADDRESS")?;

    let metrics_path = env
        .get_var("METRICS_PATH")
        .unwrap_or_else(|| DEFAULT_METRICS_PATH.to_string());
    let metrics_path = if metrics_path.starts_with('/') {
        metrics_path
    } else {
        format!("/{}", metrics_path)
    };
    if metrics_path == "/" {
        return Err(anyhow!("METRICS_PATH must not be the root path"));
    }

    let in_cluster = env
        .get_var("IN_CLUSTER")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false);

    let poll_interval_seconds: u64 = env
        .get_var("POLL_INTERVAL_SECONDS")
        .unwrap_or_default()
        .parse()
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS);
    if poll_interval_seconds == 0 {
        return Err(anyhow!("POLL_INTERVAL_SECONDS must be positive"));
    }

    let cycle_timeout_seconds: u64 = env
        .get_var("CYCLE_TIMEOUT_SECONDS")
        .unwrap_or_default()
        .parse()
        .unwrap_or(DEFAULT_CYCLE_TIMEOUT_SECONDS);
    if cycle_timeout_seconds == 0 {
        return Err(anyhow!("CYCLE_TIMEOUT_SECONDS must be positive"));
    }

    Ok(Config {
        listen_address,
        metrics_path,
        in_cluster,
        poll_interval: Duration::from_secs(poll_interval_seconds),
        cycle_timeout: Duration::from_secs(cycle_timeout_seconds),
    })
}
