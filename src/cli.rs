//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(name = "analyzer")]
#[command(about = "Private artist income analyzer: ledger node and tooling", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "ANALYZER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Network to operate on
    #[arg(short, long, env = "ANALYZER_NETWORK", default_value = "localhost")]
    pub network: String,

    /// Private key for the acting account
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deploy a fresh analyzer into a ledger node and serve it over HTTP
    Node {
        /// Bind host, overrides the configured one
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overrides the configured one
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the scripted three-artist analysis session
    Simulate,

    /// Read owner, stats and the signer's profile from the latest deployment
    Interact,

    /// Show owner, artist count and session of a deployed analyzer
    ContractInfo {
        /// Contract address
        #[arg(short, long)]
        address: String,
    },

    /// Show network, chain id and block number of the node
    DeployStatus,

    /// List the local development accounts
    Accounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_node_with_overrides() {
        let cli = Cli::try_parse_from(["analyzer", "--network", "hardhat", "node", "--port", "9000"])
            .unwrap();

        assert_eq!(cli.network, "hardhat");
        assert!(matches!(
            cli.command,
            Command::Node { host: None, port: Some(9000) }
        ));
    }

    #[test]
    fn test_parse_contract_info_requires_address() {
        assert!(Cli::try_parse_from(["analyzer", "contract-info"]).is_err());

        let cli = Cli::try_parse_from([
            "analyzer",
            "contract-info",
            "--address",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::ContractInfo { .. }));
    }
}
