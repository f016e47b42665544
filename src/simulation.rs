//! Scripted walk-through of a full analysis session
//!
//! Runs against a fresh in-process [`LedgerNode`] using the local
//! development accounts: #0 deploys and owns, #1 is the analyst, #2..#4 are
//! the artists. The outsider is an address none of the roles use.

use alloy::primitives::Address;
use tracing::{info, warn};

use crate::accounts::dev_addresses;
use crate::error::{AppError, AppResult, ContractError};
use crate::node::LedgerNode;
use crate::types::{
    AggregateReport, ArtistProfile, CreativeAnalyticsRecord, IncomeRecord, PlatformStats, SessionId,
};

pub struct SimulatedArtist {
    pub artist_id: &'static str,
    pub income: IncomeRecord,
    pub analytics: CreativeAnalyticsRecord,
}

pub fn sample_artists() -> [SimulatedArtist; 3] {
    [
        SimulatedArtist {
            artist_id: "digital_artist_001",
            income: IncomeRecord::new(75_000, 15, 5_000, 10_000, 15_000),
            analytics: CreativeAnalyticsRecord::new(30_000, 10_000, 20_000, 5_000, 8_000, 2_000),
        },
        SimulatedArtist {
            artist_id: "traditional_painter_002",
            income: IncomeRecord::new(60_000, 12, 5_000, 8_000, 12_000),
            analytics: CreativeAnalyticsRecord::new(5_000, 40_000, 0, 10_000, 5_000, 0),
        },
        SimulatedArtist {
            artist_id: "nft_creator_003",
            income: IncomeRecord::new(90_000, 20, 4_500, 15_000, 20_000),
            analytics: CreativeAnalyticsRecord::new(25_000, 5_000, 50_000, 8_000, 2_000, 0),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub contract_address: Address,
    pub owner: Address,
    pub analyst: Address,
    pub artists: Vec<Address>,
    pub stats_before: PlatformStats,
    pub stats_after: PlatformStats,
    pub analyzed_session: SessionId,
    pub report: AggregateReport,
    pub profiles: Vec<ArtistProfile>,
    pub outsider: Address,
    pub outsider_rejection: Option<ContractError>,
    pub blocks_mined: u64,
}

// Outside the dev account range
fn outsider_address() -> Address {
    Address::repeat_byte(0x0b)
}

pub async fn run_simulation(network: &str, chain_id: u64) -> AppResult<SimulationReport> {
    let accounts = dev_addresses()?;
    let (owner, analyst) = (accounts[0], accounts[1]);
    let artist_accounts = accounts[2..5].to_vec();
    let outsider = outsider_address();

    let (node, _record) = LedgerNode::deploy(network, chain_id, owner);
    info!("Simulation contract deployed at {}", node.contract_address());

    node.transact(owner, |c, ctx| c.authorize_analyst(ctx, analyst))
        .await?;

    for (account, artist) in artist_accounts.iter().zip(sample_artists()) {
        node.transact(*account, |c, ctx| c.register_artist(ctx, artist.artist_id))
            .await?;
        node.transact(*account, |c, ctx| c.submit_income_data(ctx, artist.income))
            .await?;
        node.transact(*account, |c, ctx| {
            c.submit_creative_analytics(ctx, artist.analytics)
        })
        .await?;
    }

    let stats_before = node.view(|c| c.get_platform_stats()).await;
    info!(
        "Platform before analysis: {} artists, session {}",
        stats_before.total_artists_count, stats_before.current_session_id
    );

    node.transact(analyst, |c, ctx| c.generate_income_analysis(ctx))
        .await?;
    let analyzed_session = stats_before.current_session_id;
    let report = node
        .view_as(analyst, |c, ctx| c.get_aggregate_report(ctx, analyzed_session))
        .await?;
    let stats_after = node.view(|c| c.get_platform_stats()).await;

    let mut profiles = Vec::with_capacity(artist_accounts.len());
    for account in &artist_accounts {
        let profile = node.view_as(*account, |c, ctx| c.get_my_profile(ctx)).await?;
        profiles.push(profile);
    }

    let outsider_rejection = match node
        .transact(outsider, |c, ctx| c.generate_income_analysis(ctx))
        .await
    {
        Ok(receipt) => {
            warn!(
                "Outsider {} generated an analysis in block {}",
                outsider, receipt.block_number
            );
            None
        }
        Err(e) => {
            info!("Outsider analysis rejected as expected: {}", e);
            Some(e)
        }
    };

    if outsider_rejection.is_none() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "access control failed: outsider was allowed to generate an analysis"
        )));
    }

    Ok(SimulationReport {
        contract_address: node.contract_address(),
        owner,
        analyst,
        artists: artist_accounts,
        stats_before,
        stats_after,
        analyzed_session,
        report,
        profiles,
        outsider,
        outsider_rejection,
        blocks_mined: node.block_number().await,
    })
}
