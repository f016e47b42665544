//! Session sequencing and platform-level aggregation

use alloy::primitives::Address;
use std::collections::BTreeMap;
use tracing::debug;

use crate::ledger::{CreativeAnalyticsLedger, IncomeLedger};
use crate::types::{AggregateReport, SessionId, Timestamp};

pub const INITIAL_SESSION_ID: SessionId = 1;

#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    session_id: SessionId,
    last_report_timestamp: Timestamp,
    reports: BTreeMap<SessionId, AggregateReport>,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self {
            session_id: INITIAL_SESSION_ID,
            last_report_timestamp: 0,
            reports: BTreeMap::new(),
        }
    }
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn last_report_timestamp(&self) -> Timestamp {
        self.last_report_timestamp
    }

    pub fn report(&self, session: SessionId) -> Option<&AggregateReport> {
        self.reports.get(&session)
    }

    /// Build the report for `session` without touching any state. Artists
    /// without a submission in the session contribute nothing.
    pub fn aggregate<'a>(
        session: SessionId,
        artists: impl Iterator<Item = &'a Address>,
        income: &IncomeLedger,
        creative: &CreativeAnalyticsLedger,
        now: Timestamp,
    ) -> AggregateReport {
        let mut report = AggregateReport::empty(session, now);

        for artist in artists {
            let income_record = income.get(*artist, session);
            let creative_record = creative.get(*artist, session);

            if let Some(record) = income_record {
                report.income_submissions += 1;
                report.total_income += u128::from(record.total_income);
                report.total_artworks_sold += u128::from(record.artworks_sold);
                report.total_royalty_earnings += u128::from(record.royalty_earnings);
                report.total_commission_earnings += u128::from(record.commission_earnings);
            }
            if let Some(record) = creative_record {
                report.analytics_submissions += 1;
                report.creative.add(record);
            }
            if income_record.is_some() || creative_record.is_some() {
                report.participating_artists += 1;
            }
        }

        debug!(
            "Aggregated session {}: {} participating artists",
            session, report.participating_artists
        );
        report
    }

    /// Store the report of the current session and open the next one.
    /// The report must have been built for the current session.
    pub fn close_session(&mut self, report: AggregateReport) -> SessionId {
        debug_assert_eq!(report.session_id, self.session_id);

        let closed = self.session_id;
        self.last_report_timestamp = report.generated_at;
        self.reports.insert(closed, report);
        self.session_id += 1;
        closed
    }
}
