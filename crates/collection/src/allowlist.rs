//! Presale allowlist: a Merkle root plus per-minter counters.

use crate::{error::CollectionError, merkle};
use alloy_primitives::{Address, B256};
use std::collections::HashMap;

/// Root value that disables the allowlist (public sale).
pub const PRESALE_DISABLED: B256 = B256::ZERO;

/// Result of a successful allowlist check, consumed by [`PresaleAllowlist::consume`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresaleTicket {
    /// Allowlist disabled; nothing is counted.
    Open,
    /// Presale slot to count against the minter.
    Counted(Address),
}

/// Current presale root and how many presale mints each address has made.
#[derive(Clone, Debug, Default)]
pub struct PresaleAllowlist {
    root: B256,
    consumed: HashMap<Address, u64>,
}

impl PresaleAllowlist {
    /// Current root; [`PRESALE_DISABLED`] when the presale is off.
    pub const fn root(&self) -> B256 {
        self.root
    }

    /// Whether proofs are currently required.
    pub fn is_enabled(&self) -> bool {
        self.root != PRESALE_DISABLED
    }

    /// Replaces the root. Existing counters are kept.
    pub fn set_root(&mut self, root: B256) {
        let previous = std::mem::replace(&mut self.root, root);
        tracing::info!(target: "zbz::presale", %previous, %root, "presale root updated");
    }

    /// Presale mints counted against `account`.
    pub fn minted(&self, account: Address) -> u64 {
        self.consumed.get(&account).copied().unwrap_or_default()
    }

    /// Checks `proof` and the per-minter cap without counting anything.
    pub fn check(
        &self,
        minter: Address,
        proof: &[B256],
        cap: u64,
    ) -> Result<PresaleTicket, CollectionError> {
        if !self.is_enabled() {
            return Ok(PresaleTicket::Open);
        }
        if !merkle::verify(proof, self.root, merkle::leaf_hash(minter)) {
            tracing::warn!(
                target: "zbz::presale",
                ?minter,
                root = %self.root,
                "invalid presale proof"
            );
            return Err(CollectionError::NotAllowlisted);
        }
        if self.minted(minter).saturating_add(1) > cap {
            tracing::warn!(target: "zbz::presale", ?minter, cap, "presale cap reached");
            return Err(CollectionError::AllowlistCapExceeded { cap });
        }
        Ok(PresaleTicket::Counted(minter))
    }

    /// Counts the slot described by `ticket`.
    pub fn consume(&mut self, ticket: PresaleTicket) {
        if let PresaleTicket::Counted(minter) = ticket {
            *self.consumed.entry(minter).or_default() += 1;
        }
    }

    /// Checks and counts in one step.
    pub fn check_and_consume(
        &mut self,
        minter: Address,
        proof: &[B256],
        cap: u64,
    ) -> Result<PresaleTicket, CollectionError> {
        let ticket = self.check(minter, proof, cap)?;
        self.consume(ticket);
        Ok(ticket)
    }

    /// Returns a slot counted by a mint that is being rolled back.
    pub(crate) fn release(&mut self, minter: Address) {
        if let Some(count) = self.consumed.get_mut(&minter) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.consumed.remove(&minter);
            }
        }
    }
}
