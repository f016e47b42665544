use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Aggregation epoch counter
pub type SessionId = u64;

/// Unix seconds
pub type Timestamp = u64;

/// Who is calling, and when. Every operation of the analyzer receives one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub timestamp: Timestamp,
}

impl CallContext {
    pub fn new(caller: Address, timestamp: Timestamp) -> Self {
        Self { caller, timestamp }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    /// Handle chosen by the registrant, not unique across identities
    pub artist_id: String,
    pub owner: Address,
    /// Sequential number assigned at registration, starting at 1
    pub artist_number: u64,
    pub profile_created: Timestamp,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub total_income: u64,
    pub artworks_sold: u64,
    pub average_price: u64,
    pub royalty_earnings: u64,
    pub commission_earnings: u64,
}

impl IncomeRecord {
    pub fn new(
        total_income: u64,
        artworks_sold: u64,
        average_price: u64,
        royalty_earnings: u64,
        commission_earnings: u64,
    ) -> Self {
        Self {
            total_income,
            artworks_sold,
            average_price,
            royalty_earnings,
            commission_earnings,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeAnalyticsRecord {
    pub digital_art_sales: u64,
    pub physical_art_sales: u64,
    pub nft_sales: u64,
    pub licensing_revenue: u64,
    pub workshop_earnings: u64,
    pub custom_commissions: u64,
}

impl CreativeAnalyticsRecord {
    pub fn new(
        digital_art_sales: u64,
        physical_art_sales: u64,
        nft_sales: u64,
        licensing_revenue: u64,
        workshop_earnings: u64,
        custom_commissions: u64,
    ) -> Self {
        Self {
            digital_art_sales,
            physical_art_sales,
            nft_sales,
            licensing_revenue,
            workshop_earnings,
            custom_commissions,
        }
    }
}

/// Platform-wide creative revenue per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeTotals {
    pub digital_art_sales: u128,
    pub physical_art_sales: u128,
    pub nft_sales: u128,
    pub licensing_revenue: u128,
    pub workshop_earnings: u128,
    pub custom_commissions: u128,
}

impl CreativeTotals {
    pub fn add(&mut self, record: &CreativeAnalyticsRecord) {
        self.digital_art_sales += u128::from(record.digital_art_sales);
        self.physical_art_sales += u128::from(record.physical_art_sales);
        self.nft_sales += u128::from(record.nft_sales);
        self.licensing_revenue += u128::from(record.licensing_revenue);
        self.workshop_earnings += u128::from(record.workshop_earnings);
        self.custom_commissions += u128::from(record.custom_commissions);
    }

    pub fn total(&self) -> u128 {
        self.digital_art_sales
            + self.physical_art_sales
            + self.nft_sales
            + self.licensing_revenue
            + self.workshop_earnings
            + self.custom_commissions
    }
}

/// Summary produced once per session by the analysis engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub session_id: SessionId,
    pub generated_at: Timestamp,
    /// Artists with an income or analytics submission in the session
    pub participating_artists: u64,
    pub income_submissions: u64,
    pub analytics_submissions: u64,
    pub total_income: u128,
    pub total_artworks_sold: u128,
    pub total_royalty_earnings: u128,
    pub total_commission_earnings: u128,
    pub creative: CreativeTotals,
}

impl AggregateReport {
    pub fn empty(session_id: SessionId, generated_at: Timestamp) -> Self {
        Self {
            session_id,
            generated_at,
            participating_artists: 0,
            income_submissions: 0,
            analytics_submissions: 0,
            total_income: 0,
            total_artworks_sold: 0,
            total_royalty_earnings: 0,
            total_commission_earnings: 0,
            creative: CreativeTotals::default(),
        }
    }

    /// Mean declared income over artists that submitted income data
    pub fn average_income(&self) -> Option<u128> {
        if self.income_submissions == 0 {
            return None;
        }
        Some(self.total_income / u128::from(self.income_submissions))
    }

    pub fn total_creative_revenue(&self) -> u128 {
        self.creative.total()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_artists_count: u64,
    pub current_session_id: SessionId,
    pub last_report_timestamp: Timestamp,
}

/// Emitted by every successful state-changing operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum AnalyzerEvent {
    AnalystAuthorized {
        analyst: Address,
    },
    #[serde(rename_all = "camelCase")]
    ArtistRegistered {
        artist: Address,
        artist_id: String,
        artist_number: u64,
    },
    #[serde(rename_all = "camelCase")]
    IncomeDataSubmitted {
        artist: Address,
        session_id: SessionId,
    },
    #[serde(rename_all = "camelCase")]
    CreativeAnalyticsSubmitted {
        artist: Address,
        session_id: SessionId,
    },
    #[serde(rename_all = "camelCase")]
    IncomeAnalysisGenerated {
        session_id: SessionId,
        participating_artists: u64,
        timestamp: Timestamp,
    },
}

impl AnalyzerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyzerEvent::AnalystAuthorized { .. } => "AnalystAuthorized",
            AnalyzerEvent::ArtistRegistered { .. } => "ArtistRegistered",
            AnalyzerEvent::IncomeDataSubmitted { .. } => "IncomeDataSubmitted",
            AnalyzerEvent::CreativeAnalyticsSubmitted { .. } => "CreativeAnalyticsSubmitted",
            AnalyzerEvent::IncomeAnalysisGenerated { .. } => "IncomeAnalysisGenerated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creative_totals_accumulate() {
        let mut totals = CreativeTotals::default();
        totals.add(&CreativeAnalyticsRecord::new(1, 2, 3, 4, 5, 6));
        totals.add(&CreativeAnalyticsRecord::new(10, 20, 30, 40, 50, 60));

        assert_eq!(totals.digital_art_sales, 11);
        assert_eq!(totals.custom_commissions, 66);
        assert_eq!(totals.total(), 231);
    }

    #[test]
    fn test_average_income_without_submissions() {
        let report = AggregateReport::empty(1, 0);
        assert_eq!(report.average_income(), None);
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = ArtistProfile {
            artist_id: "artist_123".to_string(),
            owner: Address::with_last_byte(1),
            artist_number: 1,
            profile_created: 1_700_000_000,
            is_active: true,
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["artistId"], "artist_123");
        assert_eq!(value["profileCreated"], 1_700_000_000u64);
        assert_eq!(value["isActive"], true);
    }

    #[test]
    fn test_event_tagging() {
        let event = AnalyzerEvent::IncomeDataSubmitted {
            artist: Address::with_last_byte(2),
            session_id: 4,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "IncomeDataSubmitted");
        assert_eq!(value["sessionId"], 4);
        assert_eq!(event.name(), "IncomeDataSubmitted");
    }
}
