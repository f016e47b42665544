//! Owner and analyst roles

use alloy::primitives::Address;
use std::collections::HashSet;

use crate::error::{ContractError, ContractResult};

/// Single owner fixed at deployment plus an append-only analyst set
#[derive(Debug, Clone)]
pub struct AccessControlRegistry {
    owner: Address,
    analysts: HashSet<Address>,
}

impl AccessControlRegistry {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            analysts: HashSet::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_owner(&self, identity: Address) -> bool {
        identity == self.owner
    }

    pub fn is_analyst(&self, identity: Address) -> bool {
        self.analysts.contains(&identity)
    }

    pub fn is_owner_or_analyst(&self, identity: Address) -> bool {
        self.is_owner(identity) || self.is_analyst(identity)
    }

    pub fn ensure_owner(&self, caller: Address) -> ContractResult<()> {
        if !self.is_owner(caller) {
            return Err(ContractError::Unauthorized(caller));
        }
        Ok(())
    }

    pub fn ensure_owner_or_analyst(&self, caller: Address) -> ContractResult<()> {
        if !self.is_owner_or_analyst(caller) {
            return Err(ContractError::Unauthorized(caller));
        }
        Ok(())
    }

    /// Owner-only. Returns `false` when the analyst was already authorized.
    pub fn authorize(&mut self, caller: Address, analyst: Address) -> ContractResult<bool> {
        self.ensure_owner(caller)?;
        Ok(self.analysts.insert(analyst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    #[test]
    fn test_owner_can_authorize() {
        let mut registry = AccessControlRegistry::new(addr(1));

        assert_eq!(registry.authorize(addr(1), addr(9)), Ok(true));
        assert!(registry.is_analyst(addr(9)));
        assert!(registry.is_owner_or_analyst(addr(9)));
    }

    #[test]
    fn test_authorize_is_idempotent() {
        let mut registry = AccessControlRegistry::new(addr(1));

        assert_eq!(registry.authorize(addr(1), addr(9)), Ok(true));
        assert_eq!(registry.authorize(addr(1), addr(9)), Ok(false));
        assert_eq!(registry.analysts.len(), 1);
    }

    #[test]
    fn test_non_owner_cannot_authorize() {
        let mut registry = AccessControlRegistry::new(addr(1));

        assert_eq!(
            registry.authorize(addr(2), addr(2)),
            Err(ContractError::Unauthorized(addr(2)))
        );
        assert!(!registry.is_analyst(addr(2)));
    }

    #[test]
    fn test_analyst_cannot_authorize_others() {
        let mut registry = AccessControlRegistry::new(addr(1));
        registry.authorize(addr(1), addr(5)).unwrap();

        assert!(registry.authorize(addr(5), addr(6)).is_err());
        assert!(registry.ensure_owner_or_analyst(addr(5)).is_ok());
        assert!(registry.ensure_owner_or_analyst(addr(6)).is_err());
    }
}
