//! The `PrivateArtistIncomeAnalyzer` ledger contract
//!
//! One value of [`PrivateArtistIncomeAnalyzer`] is the whole platform state:
//! owner, analyst set, artist directory, both submission ledgers and the
//! session counter. Every state-changing operation checks its guard first and
//! only then mutates, so a rejected call leaves the state exactly as it was.
//!
//! Privacy is role-gated visibility. Individual records are never readable
//! through the public surface; only owner and analysts see aggregates.

use alloy::primitives::Address;
use tracing::{info, warn};

use crate::access::AccessControlRegistry;
use crate::analysis::AnalysisEngine;
use crate::directory::ArtistDirectory;
use crate::error::ContractResult;
use crate::ledger::{CreativeAnalyticsLedger, IncomeLedger};
use crate::types::{AnalyzerEvent, CallContext, CreativeAnalyticsRecord, IncomeRecord};

pub const CONTRACT_NAME: &str = "PrivateArtistIncomeAnalyzer";

#[derive(Debug, Clone)]
pub struct PrivateArtistIncomeAnalyzer {
    pub(crate) access: AccessControlRegistry,
    pub(crate) directory: ArtistDirectory,
    pub(crate) income: IncomeLedger,
    pub(crate) creative: CreativeAnalyticsLedger,
    pub(crate) engine: AnalysisEngine,
}

impl PrivateArtistIncomeAnalyzer {
    /// Constructor-less deployment: the deployer becomes the owner and the
    /// first session is open.
    pub fn deploy(deployer: Address) -> Self {
        info!("Deploying {} with owner {}", CONTRACT_NAME, deployer);
        Self {
            access: AccessControlRegistry::new(deployer),
            directory: ArtistDirectory::new(),
            income: IncomeLedger::new(),
            creative: CreativeAnalyticsLedger::new(),
            engine: AnalysisEngine::new(),
        }
    }

    pub fn authorize_analyst(
        &mut self,
        ctx: &CallContext,
        analyst: Address,
    ) -> ContractResult<AnalyzerEvent> {
        let added = self.access.authorize(ctx.caller, analyst).inspect_err(|e| {
            warn!("authorizeAnalyst rejected: {}", e);
        })?;

        if added {
            info!("Analyst authorized: {}", analyst);
        }
        Ok(AnalyzerEvent::AnalystAuthorized { analyst })
    }

    pub fn register_artist(
        &mut self,
        ctx: &CallContext,
        artist_id: &str,
    ) -> ContractResult<AnalyzerEvent> {
        let profile = self
            .directory
            .register(ctx.caller, artist_id, ctx.timestamp)
            .inspect_err(|e| warn!("registerArtist rejected: {}", e))?;

        info!(
            "Artist registered: {} as '{}' (#{})",
            ctx.caller, profile.artist_id, profile.artist_number
        );
        Ok(AnalyzerEvent::ArtistRegistered {
            artist: ctx.caller,
            artist_id: profile.artist_id.clone(),
            artist_number: profile.artist_number,
        })
    }

    /// Record the caller's income data for the open session, replacing an
    /// earlier submission of the same session
    pub fn submit_income_data(
        &mut self,
        ctx: &CallContext,
        record: IncomeRecord,
    ) -> ContractResult<AnalyzerEvent> {
        self.directory
            .ensure_registered(ctx.caller)
            .inspect_err(|e| warn!("submitIncomeData rejected: {}", e))?;

        let session_id = self.engine.session_id();
        let replaced = self.income.submit(ctx.caller, session_id, record);
        info!(
            "Income data submitted by {} for session {}{}",
            ctx.caller,
            session_id,
            if replaced { " (replaced)" } else { "" }
        );

        Ok(AnalyzerEvent::IncomeDataSubmitted {
            artist: ctx.caller,
            session_id,
        })
    }

    pub fn submit_creative_analytics(
        &mut self,
        ctx: &CallContext,
        record: CreativeAnalyticsRecord,
    ) -> ContractResult<AnalyzerEvent> {
        self.directory
            .ensure_registered(ctx.caller)
            .inspect_err(|e| warn!("submitCreativeAnalytics rejected: {}", e))?;

        let session_id = self.engine.session_id();
        let replaced = self.creative.submit(ctx.caller, session_id, record);
        info!(
            "Creative analytics submitted by {} for session {}{}",
            ctx.caller,
            session_id,
            if replaced { " (replaced)" } else { "" }
        );

        Ok(AnalyzerEvent::CreativeAnalyticsSubmitted {
            artist: ctx.caller,
            session_id,
        })
    }

    /// Aggregate the open session across all artists, store the report and
    /// open the next session. The session id is read once and used for the
    /// whole aggregation.
    pub fn generate_income_analysis(&mut self, ctx: &CallContext) -> ContractResult<AnalyzerEvent> {
        self.access
            .ensure_owner_or_analyst(ctx.caller)
            .inspect_err(|e| warn!("generateIncomeAnalysis rejected: {}", e))?;

        let session_id = self.engine.session_id();
        let report = AnalysisEngine::aggregate(
            session_id,
            self.directory.iter_in_order(),
            &self.income,
            &self.creative,
            ctx.timestamp,
        );
        let participating_artists = report.participating_artists;
        self.engine.close_session(report);

        info!(
            "Income analysis generated for session {} by {} ({} participating artists)",
            session_id, ctx.caller, participating_artists
        );
        Ok(AnalyzerEvent::IncomeAnalysisGenerated {
            session_id,
            participating_artists,
            timestamp: ctx.timestamp,
        })
    }
}
