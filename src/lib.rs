//! Private Artist Income Analyzer
//!
//! A ledger core where registered artists submit confidential income and
//! creative-revenue figures per analysis session, and the owner or an
//! authorized analyst closes the session into a platform-wide aggregate
//! report. Individual records never leave the core; only profiles (to their
//! own artist) and aggregates (to owner and analysts) are readable.
//!
//! # Features
//!
//! - Role-gated operations: owner, analysts, registered artists, public reads
//! - Session-keyed income and creative analytics ledgers
//! - In-process ledger node with blocks, receipts and deployment records
//! - Solidity ABI surface and calldata dispatch, built on Alloy
//! - HTTP API (axum) with EIP-191 signed requests and a matching reqwest client
//!
//! # Example
//!
//! ```rust,no_run
//! use artist_income_analyzer::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let owner = Address::with_last_byte(1);
//!     let artist = Address::with_last_byte(2);
//!     let (node, _record) = LedgerNode::deploy("hardhat", 1337, owner);
//!
//!     node.transact(artist, |c, ctx| c.register_artist(ctx, "digital_artist_001"))
//!         .await?;
//!     node.transact(artist, |c, ctx| {
//!         c.submit_income_data(ctx, IncomeRecord::new(75000, 15, 5000, 10000, 15000))
//!     })
//!     .await?;
//!     node.transact(owner, |c, ctx| c.generate_income_analysis(ctx))
//!         .await?;
//!
//!     let report = node
//!         .view_as(owner, |c, ctx| c.get_aggregate_report(ctx, 1))
//!         .await?;
//!     println!("Session 1 income: {}", report.total_income);
//!
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod access;
pub mod accounts;
pub mod analysis;
pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod contract;
pub mod deployment;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod node;
pub mod query;
pub mod simulation;
pub mod types;

// Re-export commonly used types
pub use client::NodeClient;
pub use contract::{PrivateArtistIncomeAnalyzer, CONTRACT_NAME};
pub use deployment::DeploymentRecord;
pub use error::{AppError, AppResult, ContractError, ContractResult};
pub use node::{LedgerNode, NodeStatus, TxReceipt};
pub use types::{
    AggregateReport, AnalyzerEvent, ArtistProfile, CallContext, CreativeAnalyticsRecord,
    IncomeRecord, PlatformStats, SessionId, Timestamp,
};

// Re-export Alloy types for convenience
pub use alloy::primitives::{Address, B256, U256};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::INITIAL_SESSION_ID;
    pub use crate::client::NodeClient;
    pub use crate::contract::PrivateArtistIncomeAnalyzer;
    pub use crate::error::{AppError, AppResult, ContractError, ContractResult};
    pub use crate::node::{LedgerNode, TxReceipt};
    pub use crate::types::{
        AggregateReport, AnalyzerEvent, ArtistProfile, CallContext, CreativeAnalyticsRecord,
        IncomeRecord, PlatformStats, SessionId,
    };
    pub use alloy::primitives::{Address, B256, U256};
}
