//! Solidity ABI of the analyzer and a calldata dispatcher
//!
//! The interface keeps the exact operation names and shapes the deployment
//! and interaction tooling relies on. [`dispatch`] decodes raw calldata,
//! runs the matching core operation on a [`LedgerNode`] and returns the
//! ABI-encoded result.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::{SolInterface, SolValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::node::{LedgerNode, TxReceipt};
use crate::types::{CreativeAnalyticsRecord, IncomeRecord};

sol! {
    /// @title PrivateArtistIncomeAnalyzer
    /// @notice Confidential artist income submissions with session-based aggregate analysis
    interface IPrivateArtistIncomeAnalyzer {
        function owner() external view returns (address);
        function totalArtists() external view returns (uint256);
        function analysisSessionId() external view returns (uint256);

        function authorizeAnalyst(address analyst) external;
        function registerArtist(string artistId) external;
        function submitIncomeData(
            uint256 totalIncome,
            uint256 artworksSold,
            uint256 averagePrice,
            uint256 royaltyEarnings,
            uint256 commissionEarnings
        ) external;
        function submitCreativeAnalytics(
            uint256 digitalArtSales,
            uint256 physicalArtSales,
            uint256 nftSales,
            uint256 licensingRevenue,
            uint256 workshopEarnings,
            uint256 customCommissions
        ) external;
        function generateIncomeAnalysis() external;

        function getPlatformStats() external view returns (
            uint256 totalArtistsCount,
            uint256 currentSessionId,
            uint256 lastReportTimestamp
        );
        function isRegisteredArtist(address artist) external view returns (bool);
        function isAuthorizedAnalyst(address analyst) external view returns (bool);
        function getMyProfile() external view returns (
            string artistId,
            uint256 profileCreated,
            bool isActive
        );
    }
}

use IPrivateArtistIncomeAnalyzer::IPrivateArtistIncomeAnalyzerCalls as Calls;

/// Result of a dispatched call: return data, plus a receipt when the call
/// changed state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOutcome {
    pub output: Bytes,
    pub receipt: Option<TxReceipt>,
}

impl CallOutcome {
    fn view(output: Vec<u8>) -> Self {
        Self {
            output: Bytes::from(output),
            receipt: None,
        }
    }

    fn transaction(receipt: TxReceipt) -> Self {
        Self {
            output: Bytes::new(),
            receipt: Some(receipt),
        }
    }
}

fn to_u64(field: &str, value: U256) -> AppResult<u64> {
    u64::try_from(value)
        .map_err(|_| AppError::InvalidInput(format!("{} does not fit in 64 bits: {}", field, value)))
}

pub async fn dispatch(node: &LedgerNode, from: Address, calldata: &[u8]) -> AppResult<CallOutcome> {
    let call = Calls::abi_decode(calldata)
        .map_err(|e| AppError::InvalidInput(format!("Undecodable calldata: {}", e)))?;
    debug!("Dispatching call from {}", from);

    let outcome = match call {
        Calls::owner(_) => CallOutcome::view(node.view(|c| c.owner()).await.abi_encode()),
        Calls::totalArtists(_) => {
            let total = node.view(|c| c.total_artists()).await;
            CallOutcome::view(U256::from(total).abi_encode())
        }
        Calls::analysisSessionId(_) => {
            let session = node.view(|c| c.analysis_session_id()).await;
            CallOutcome::view(U256::from(session).abi_encode())
        }
        Calls::authorizeAnalyst(call) => {
            let receipt = node
                .transact(from, |c, ctx| c.authorize_analyst(ctx, call.analyst))
                .await?;
            CallOutcome::transaction(receipt)
        }
        Calls::registerArtist(call) => {
            let receipt = node
                .transact(from, |c, ctx| c.register_artist(ctx, &call.artistId))
                .await?;
            CallOutcome::transaction(receipt)
        }
        Calls::submitIncomeData(call) => {
            let record = IncomeRecord::new(
                to_u64("totalIncome", call.totalIncome)?,
                to_u64("artworksSold", call.artworksSold)?,
                to_u64("averagePrice", call.averagePrice)?,
                to_u64("royaltyEarnings", call.royaltyEarnings)?,
                to_u64("commissionEarnings", call.commissionEarnings)?,
            );
            let receipt = node
                .transact(from, |c, ctx| c.submit_income_data(ctx, record))
                .await?;
            CallOutcome::transaction(receipt)
        }
        Calls::submitCreativeAnalytics(call) => {
            let record = CreativeAnalyticsRecord::new(
                to_u64("digitalArtSales", call.digitalArtSales)?,
                to_u64("physicalArtSales", call.physicalArtSales)?,
                to_u64("nftSales", call.nftSales)?,
                to_u64("licensingRevenue", call.licensingRevenue)?,
                to_u64("workshopEarnings", call.workshopEarnings)?,
                to_u64("customCommissions", call.customCommissions)?,
            );
            let receipt = node
                .transact(from, |c, ctx| c.submit_creative_analytics(ctx, record))
                .await?;
            CallOutcome::transaction(receipt)
        }
        Calls::generateIncomeAnalysis(_) => {
            let receipt = node
                .transact(from, |c, ctx| c.generate_income_analysis(ctx))
                .await?;
            CallOutcome::transaction(receipt)
        }
        Calls::getPlatformStats(_) => {
            let stats = node.view(|c| c.get_platform_stats()).await;
            let encoded = (
                U256::from(stats.total_artists_count),
                U256::from(stats.current_session_id),
                U256::from(stats.last_report_timestamp),
            )
                .abi_encode_params();
            CallOutcome::view(encoded)
        }
        Calls::isRegisteredArtist(call) => {
            let registered = node.view(|c| c.is_registered_artist(call.artist)).await;
            CallOutcome::view(registered.abi_encode())
        }
        Calls::isAuthorizedAnalyst(call) => {
            let authorized = node.view(|c| c.is_authorized_analyst(call.analyst)).await;
            CallOutcome::view(authorized.abi_encode())
        }
        Calls::getMyProfile(_) => {
            let profile = node.view_as(from, |c, ctx| c.get_my_profile(ctx)).await?;
            let encoded = (
                profile.artist_id,
                U256::from(profile.profile_created),
                profile.is_active,
            )
                .abi_encode_params();
            CallOutcome::view(encoded)
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContractError;
    use crate::types::AnalyzerEvent;
    use alloy::sol_types::SolCall;
    use IPrivateArtistIncomeAnalyzer::*;

    fn addr(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    #[test]
    fn test_signatures_match_operation_surface() {
        assert_eq!(registerArtistCall::SIGNATURE, "registerArtist(string)");
        assert_eq!(authorizeAnalystCall::SIGNATURE, "authorizeAnalyst(address)");
        assert_eq!(
            submitIncomeDataCall::SIGNATURE,
            "submitIncomeData(uint256,uint256,uint256,uint256,uint256)"
        );
        assert_eq!(
            submitCreativeAnalyticsCall::SIGNATURE,
            "submitCreativeAnalytics(uint256,uint256,uint256,uint256,uint256,uint256)"
        );
        assert_eq!(generateIncomeAnalysisCall::SIGNATURE, "generateIncomeAnalysis()");
        assert_eq!(getPlatformStatsCall::SIGNATURE, "getPlatformStats()");
    }

    #[tokio::test]
    async fn test_dispatch_register_and_read_profile() {
        let (node, _) = LedgerNode::deploy("hardhat", 1337, addr(1));

        let calldata = registerArtistCall {
            artistId: "digital_artist_001".to_string(),
        }
        .abi_encode();
        let outcome = dispatch(&node, addr(2), &calldata).await.unwrap();

        let receipt = outcome.receipt.unwrap();
        assert!(outcome.output.is_empty());
        assert!(matches!(receipt.event, AnalyzerEvent::ArtistRegistered { .. }));

        let outcome = dispatch(&node, addr(2), &getMyProfileCall {}.abi_encode())
            .await
            .unwrap();
        let (artist_id, _created, active) =
            <(String, U256, bool)>::abi_decode_params(&outcome.output).unwrap();
        assert_eq!(artist_id, "digital_artist_001");
        assert!(active);
    }

    #[tokio::test]
    async fn test_dispatch_platform_stats() {
        let (node, _) = LedgerNode::deploy("hardhat", 1337, addr(1));
        dispatch(
            &node,
            addr(2),
            &registerArtistCall { artistId: "a".into() }.abi_encode(),
        )
        .await
        .unwrap();

        let outcome = dispatch(&node, addr(9), &getPlatformStatsCall {}.abi_encode())
            .await
            .unwrap();
        let (total, session, last) =
            <(U256, U256, U256)>::abi_decode_params(&outcome.output).unwrap();

        assert_eq!(total, U256::from(1));
        assert_eq!(session, U256::from(1));
        assert_eq!(last, U256::ZERO);

        let outcome = dispatch(&node, addr(9), &ownerCall {}.abi_encode()).await.unwrap();
        assert_eq!(Address::abi_decode(&outcome.output).unwrap(), addr(1));
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_contract_errors() {
        let (node, _) = LedgerNode::deploy("hardhat", 1337, addr(1));

        let result = dispatch(&node, addr(5), &generateIncomeAnalysisCall {}.abi_encode()).await;

        assert!(matches!(
            result,
            Err(AppError::Contract(ContractError::Unauthorized(a))) if a == addr(5)
        ));
    }

    #[tokio::test]
    async fn test_dispatch_rejects_oversized_values() {
        let (node, _) = LedgerNode::deploy("hardhat", 1337, addr(1));
        dispatch(&node, addr(2), &registerArtistCall { artistId: "a".into() }.abi_encode())
            .await
            .unwrap();

        let calldata = submitIncomeDataCall {
            totalIncome: U256::MAX,
            artworksSold: U256::from(1),
            averagePrice: U256::from(1),
            royaltyEarnings: U256::ZERO,
            commissionEarnings: U256::ZERO,
        }
        .abi_encode();
        let result = dispatch(&node, addr(2), &calldata).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert_eq!(node.block_number().await, 2);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_garbage() {
        let (node, _) = LedgerNode::deploy("hardhat", 1337, addr(1));

        let result = dispatch(&node, addr(2), &[0xde, 0xad, 0xbe, 0xef]).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
