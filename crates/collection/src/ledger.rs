//! Minimal ownership bookkeeping: who owns which id and how many each holds.
//!
//! Transfers and approvals are out of scope; tokens only ever get minted.

use crate::{error::CollectionError, TokenId};
use alloy_primitives::{Address, U256};
use std::collections::HashMap;

/// Owner and balance mappings for issued tokens.
#[derive(Clone, Debug, Default)]
pub struct TokenLedger {
    owners: HashMap<TokenId, Address>,
    balances: HashMap<Address, U256>,
}

impl TokenLedger {
    /// Whether `id` has been issued.
    pub fn exists(&self, id: TokenId) -> bool {
        self.owners.contains_key(&id)
    }

    /// Owner of `id`.
    pub fn owner_of(&self, id: TokenId) -> Result<Address, CollectionError> {
        self.owners.get(&id).copied().ok_or(CollectionError::UnknownToken(id))
    }

    /// Number of tokens held by `owner`.
    pub fn balance_of(&self, owner: Address) -> Result<U256, CollectionError> {
        if owner.is_zero() {
            return Err(CollectionError::ZeroAddress);
        }
        Ok(self.balances.get(&owner).copied().unwrap_or_default())
    }

    /// Number of issued tokens across both ranges.
    pub fn minted(&self) -> usize {
        self.owners.len()
    }

    /// Records `to` as owner of a fresh `id`.
    pub fn mint(&mut self, to: Address, id: TokenId) -> Result<(), CollectionError> {
        if to.is_zero() {
            return Err(CollectionError::ZeroAddress);
        }
        if self.exists(id) {
            return Err(CollectionError::AlreadyMinted(id));
        }
        self.owners.insert(id, to);
        *self.balances.entry(to).or_default() += U256::from(1);
        Ok(())
    }

    /// Removes the ownership record created by a mint that is being rolled back.
    pub(crate) fn unmint(&mut self, id: TokenId) {
        let Some(owner) = self.owners.remove(&id) else { return };
        if let Some(balance) = self.balances.get_mut(&owner) {
            *balance = balance.saturating_sub(U256::from(1));
            if balance.is_zero() {
                self.balances.remove(&owner);
            }
        }
    }
}
