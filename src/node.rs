//! In-process ledger node hosting one deployed analyzer
//!
//! The node is the execution substrate: it serializes state-changing calls
//! behind a write lock, mines one block per successful transaction and hands
//! out receipts. Views share a read lock.

use alloy::primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::contract::{PrivateArtistIncomeAnalyzer, CONTRACT_NAME};
use crate::deployment::DeploymentRecord;
use crate::error::ContractResult;
use crate::types::{AnalyzerEvent, CallContext, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: B256,
    pub block_number: u64,
    pub from: Address,
    pub event: AnalyzerEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub network: String,
    pub chain_id: u64,
    pub block_number: u64,
    pub contract_address: Address,
    pub contract_name: String,
    pub transaction_count: u64,
}

struct NodeState {
    contract: PrivateArtistIncomeAnalyzer,
    block_number: u64,
    last_timestamp: Timestamp,
    receipts: Vec<TxReceipt>,
}

pub struct LedgerNode {
    network: String,
    chain_id: u64,
    contract_address: Address,
    state: RwLock<NodeState>,
}

impl LedgerNode {
    /// Deploy a fresh analyzer owned by `deployer`. The deployment itself is
    /// mined as block 1 and the contract lands at the CREATE address of the
    /// deployer's first nonce. The node does not meter gas, so the record's
    /// gas figures are left empty.
    pub fn deploy(network: &str, chain_id: u64, deployer: Address) -> (Self, DeploymentRecord) {
        let contract_address = deployer.create(0);
        let now = chrono::Utc::now();
        let timestamp = now.timestamp().max(0) as Timestamp;
        let transaction_hash = tx_hash(deployer, 1, CONTRACT_NAME.as_bytes());

        let node = Self {
            network: network.to_string(),
            chain_id,
            contract_address,
            state: RwLock::new(NodeState {
                contract: PrivateArtistIncomeAnalyzer::deploy(deployer),
                block_number: 1,
                last_timestamp: timestamp,
                receipts: Vec::new(),
            }),
        };

        let record = DeploymentRecord {
            network: network.to_string(),
            chain_id,
            contract_address,
            deployer_address: deployer,
            transaction_hash,
            block_number: 1,
            gas_used: None,
            gas_price: None,
            timestamp: now,
            contract_name: CONTRACT_NAME.to_string(),
        };

        info!(
            "Deployed {} at {} on {} (chain {})",
            CONTRACT_NAME, contract_address, network, chain_id
        );
        (node, record)
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub async fn status(&self) -> NodeStatus {
        let state = self.state.read().await;
        NodeStatus {
            network: self.network().to_string(),
            chain_id: self.chain_id(),
            block_number: state.block_number,
            contract_address: self.contract_address,
            contract_name: CONTRACT_NAME.to_string(),
            transaction_count: state.receipts.len() as u64,
        }
    }

    /// Run a state-changing operation as one transaction. The write guard is
    /// held for the whole call; a rejected call mines nothing.
    pub async fn transact<F>(&self, from: Address, op: F) -> ContractResult<TxReceipt>
    where
        F: FnOnce(&mut PrivateArtistIncomeAnalyzer, &CallContext) -> ContractResult<AnalyzerEvent>,
    {
        let mut state = self.state.write().await;

        // block timestamps never go backwards
        let now = chrono::Utc::now().timestamp().max(0) as Timestamp;
        let timestamp = now.max(state.last_timestamp);
        let ctx = CallContext::new(from, timestamp);

        let event = op(&mut state.contract, &ctx)?;

        state.block_number += 1;
        state.last_timestamp = timestamp;
        let block_number = state.block_number;
        let receipt = TxReceipt {
            transaction_hash: tx_hash(from, block_number, event.name().as_bytes()),
            block_number,
            from,
            event,
        };
        state.receipts.push(receipt.clone());

        debug!(
            "Mined block {} with {} from {}",
            block_number,
            receipt.event.name(),
            from
        );
        Ok(receipt)
    }

    /// Read the contract under the shared lock
    pub async fn view<R, F>(&self, read: F) -> R
    where
        F: FnOnce(&PrivateArtistIncomeAnalyzer) -> R,
    {
        let state = self.state.read().await;
        read(&state.contract)
    }

    /// Caller-scoped read; the context carries the latest block timestamp
    pub async fn view_as<R, F>(&self, from: Address, read: F) -> R
    where
        F: FnOnce(&PrivateArtistIncomeAnalyzer, &CallContext) -> R,
    {
        let state = self.state.read().await;
        let ctx = CallContext::new(from, state.last_timestamp);
        read(&state.contract, &ctx)
    }

    pub async fn block_number(&self) -> u64 {
        self.state.read().await.block_number
    }

    /// Receipt of a mined transaction
    pub async fn receipt(&self, transaction_hash: B256) -> Option<TxReceipt> {
        self.state
            .read()
            .await
            .receipts
            .iter()
            .find(|r| r.transaction_hash == transaction_hash)
            .cloned()
    }

}

fn tx_hash(from: Address, block_number: u64, payload: &[u8]) -> B256 {
    let mut preimage = Vec::with_capacity(20 + 8 + payload.len());
    preimage.extend_from_slice(from.as_slice());
    preimage.extend_from_slice(&block_number.to_be_bytes());
    preimage.extend_from_slice(payload);
    keccak256(preimage)
}
