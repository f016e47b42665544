use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub deployments: DeploymentsConfig,
    #[serde(default)]
    pub networks: HashMap<String, NetworkConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentsConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkConfig {
    pub url: String,
    pub chain_id: u64,
    #[serde(default)]
    pub private_key: Option<String>,
}

impl NetworkConfig {
    /// Local development chains fall back to the well-known dev accounts
    pub fn is_local(&self) -> bool {
        self.chain_id == 1337 || self.chain_id == 31337
    }
}

impl Config {
    /// Defaults, then the optional config file, then `ANALYZER__*`
    /// environment variables (e.g. `ANALYZER__SERVICE__PORT=9000`)
    pub fn load(path: &Path) -> AppResult<Self> {
        let config_builder = config::Config::builder()
            .set_default("service.host", "127.0.0.1")?
            .set_default("service.port", 8545)?
            .set_default("service.log_level", "info")?
            .set_default("deployments.dir", "deployments")?
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("ANALYZER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Config = config_builder.try_deserialize()?;
        Ok(config)
    }

    /// Configured network, or one of the built-in `hardhat` and `localhost`
    /// definitions. Every network URL must point at an analyzer node.
    pub fn network(&self, name: &str) -> AppResult<NetworkConfig> {
        if let Some(network) = self.networks.get(name) {
            return Ok(network.clone());
        }
        builtin_network(name)
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Unknown network '{}': add [networks.{}] with the URL of an analyzer node",
                    name, name
                ))
            })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}

pub fn builtin_network(name: &str) -> Option<NetworkConfig> {
    match name {
        "hardhat" | "localhost" => Some(NetworkConfig {
            url: LOCAL_RPC_URL.to_string(),
            chain_id: 1337,
            private_key: None,
        }),
        _ => None,
    }
}
