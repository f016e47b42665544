//! Per-session submission storage

use alloy::primitives::Address;
use std::collections::HashMap;

use crate::types::{CreativeAnalyticsRecord, IncomeRecord, SessionId};

/// Latest record per (artist, session). Records of earlier sessions stay in
/// storage but never count towards a later session.
#[derive(Debug, Clone)]
pub struct SessionLedger<R> {
    records: HashMap<(Address, SessionId), R>,
}

pub type IncomeLedger = SessionLedger<IncomeRecord>;

pub type CreativeAnalyticsLedger = SessionLedger<CreativeAnalyticsRecord>;

impl<R> Default for SessionLedger<R> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<R> SessionLedger<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record`, replacing any earlier one for the same key.
    /// Returns `true` when a record was overwritten.
    pub fn submit(&mut self, artist: Address, session: SessionId, record: R) -> bool {
        self.records.insert((artist, session), record).is_some()
    }

    pub(crate) fn get(&self, artist: Address, session: SessionId) -> Option<&R> {
        self.records.get(&(artist, session))
    }
}
