// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_BIND_ADDR: &str = "POSTDB_BIND_ADDR";
pub const ENV_DB_PATH: &str = "POSTDB_DB_PATH";
pub const ENV_PUBLIC_DIR: &str = "POSTDB_PUBLIC_DIR";
pub const ENV_SERIALIZE_WRITES: &str = "POSTDB_SERIALIZE_WRITES";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    BindAddr { var: &'static str, value: String },
    #[error("{var}: expected true/false/1/0, got {value:?}")]
    Flag { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// JSON document backing the store.
    pub db_path: PathBuf,
    /// Directory served as static assets ahead of the routes.
    pub public_dir: PathBuf,
    /// Hold one lock across load, mutate and persist for every mutating
    /// request. Off by default: concurrent mutations may lose updates.
    pub serialize_writes: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: PathBuf::from("db.json"),
            public_dir: PathBuf::from("public"),
            serialize_writes: false,
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by any `POSTDB_*` variables set in the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(value) = lookup(ENV_BIND_ADDR) {
            cfg.bind_addr = value
                .parse()
                .map_err(|_| ConfigError::BindAddr { var: ENV_BIND_ADDR, value })?;
        }
        if let Some(value) = lookup(ENV_DB_PATH) {
            cfg.db_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_PUBLIC_DIR) {
            cfg.public_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_SERIALIZE_WRITES) {
            cfg.serialize_writes = match value.to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return Err(ConfigError::Flag { var: ENV_SERIALIZE_WRITES, value }),
            };
        }

        Ok(cfg)
    }
}
