//! Deployment records: one JSON file per deployment

use alloy::primitives::{Address, B256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub network: String,
    pub chain_id: u64,
    pub contract_address: Address,
    pub deployer_address: Address,
    pub transaction_hash: B256,
    pub block_number: u64,
    /// Gas figures stay empty for the in-process node, which does not
    /// meter gas
    pub gas_used: Option<String>,
    pub gas_price: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub contract_name: String,
}

impl DeploymentRecord {
    /// `{network}_{unixMillis}.json`
    pub fn file_name(&self) -> String {
        format!("{}_{}.json", self.network, self.timestamp.timestamp_millis())
    }

    /// Write the record into `dir`, creating the directory if needed
    pub fn save(&self, dir: &Path) -> AppResult<PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let path = dir.join(self.file_name());
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;

        info!("Deployment record saved to {}", path.display());
        Ok(path)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Most recent record for `network` in `dir`, or `None` when the
    /// directory is missing or holds no record for that network
    pub fn latest_for_network(dir: &Path, network: &str) -> AppResult<Option<Self>> {
        if !dir.exists() {
            return Ok(None);
        }

        let prefix = format!("{}_", network);
        let mut files: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(&prefix) && name.ends_with(".json"))
            .collect();
        files.sort();

        match files.last() {
            Some(name) => {
                debug!("Using deployment record {}", name);
                Self::load(&dir.join(name)).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Like [`Self::latest_for_network`] but a missing record is an error
    pub fn require_latest(dir: &Path, network: &str) -> AppResult<Self> {
        Self::latest_for_network(dir, network)?.ok_or_else(|| {
            AppError::NotFound(format!(
                "no deployment found for network '{}' in {}. Please deploy the contract first",
                network,
                dir.display()
            ))
        })
    }
}
