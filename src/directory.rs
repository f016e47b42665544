//! Artist registration, keyed by identity

use alloy::primitives::Address;
use std::collections::HashMap;

use crate::error::{ContractError, ContractResult};
use crate::types::{ArtistProfile, Timestamp};

#[derive(Debug, Clone, Default)]
pub struct ArtistDirectory {
    profiles: HashMap<Address, ArtistProfile>,
    // Registration order; artist number N lives at index N - 1
    order: Vec<Address>,
}

impl ArtistDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profile for `caller`. The `artist_id` handle is advisory and
    /// may repeat across identities.
    pub fn register(
        &mut self,
        caller: Address,
        artist_id: &str,
        now: Timestamp,
    ) -> ContractResult<&ArtistProfile> {
        if self.profiles.contains_key(&caller) {
            return Err(ContractError::AlreadyRegistered(caller));
        }

        self.order.push(caller);
        let profile = ArtistProfile {
            artist_id: artist_id.to_string(),
            owner: caller,
            artist_number: self.order.len() as u64,
            profile_created: now,
            is_active: true,
        };

        let profile: &ArtistProfile = self.profiles.entry(caller).or_insert(profile);
        Ok(profile)
    }

    pub fn is_registered(&self, identity: Address) -> bool {
        self.profiles.contains_key(&identity)
    }

    pub fn ensure_registered(&self, identity: Address) -> ContractResult<()> {
        if !self.is_registered(identity) {
            return Err(ContractError::NotRegistered(identity));
        }
        Ok(())
    }

    pub fn profile(&self, identity: Address) -> ContractResult<&ArtistProfile> {
        self.profiles
            .get(&identity)
            .ok_or(ContractError::NotRegistered(identity))
    }

    pub fn total_artists(&self) -> u64 {
        self.order.len() as u64
    }

    /// Registered identities in ascending artist-number order
    pub fn iter_in_order(&self) -> impl Iterator<Item = &Address> + '_ {
        self.order.iter()
    }
}
