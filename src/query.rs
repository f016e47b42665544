//! Read-only accessors of the analyzer. Nothing here mutates state.

use alloy::primitives::Address;

use crate::contract::PrivateArtistIncomeAnalyzer;
use crate::error::{ContractError, ContractResult};
use crate::types::{AggregateReport, ArtistProfile, CallContext, PlatformStats, SessionId, Timestamp};

impl PrivateArtistIncomeAnalyzer {
    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn total_artists(&self) -> u64 {
        self.directory.total_artists()
    }

    pub fn analysis_session_id(&self) -> SessionId {
        self.engine.session_id()
    }

    pub fn last_report_timestamp(&self) -> Timestamp {
        self.engine.last_report_timestamp()
    }

    pub fn get_platform_stats(&self) -> PlatformStats {
        PlatformStats {
            total_artists_count: self.total_artists(),
            current_session_id: self.analysis_session_id(),
            last_report_timestamp: self.last_report_timestamp(),
        }
    }

    pub fn is_registered_artist(&self, identity: Address) -> bool {
        self.directory.is_registered(identity)
    }

    pub fn is_authorized_analyst(&self, identity: Address) -> bool {
        self.access.is_analyst(identity)
    }

    /// Profile of the caller; nobody can look up another identity's profile
    pub fn get_my_profile(&self, ctx: &CallContext) -> ContractResult<ArtistProfile> {
        self.directory.profile(ctx.caller).cloned()
    }

    /// Aggregate report of a closed session, owner and analysts only
    pub fn get_aggregate_report(
        &self,
        ctx: &CallContext,
        session: SessionId,
    ) -> ContractResult<AggregateReport> {
        self.access.ensure_owner_or_analyst(ctx.caller)?;
        self.engine
            .report(session)
            .cloned()
            .ok_or(ContractError::ReportNotFound(session))
    }
}
