//! Consumed authorization fingerprints.

use crate::error::CollectionError;
use alloy_primitives::B256;
use std::collections::HashSet;

/// Set of redeemed `(minter, salt)` fingerprints.
///
/// Entries are never pruned; a fingerprint redeemed once stays redeemed.
#[derive(Clone, Debug, Default)]
pub struct ReplayLedger {
    consumed: HashSet<B256>,
}

impl ReplayLedger {
    /// Whether `fingerprint` has been redeemed.
    pub fn is_finalized(&self, fingerprint: &B256) -> bool {
        self.consumed.contains(fingerprint)
    }

    /// Fails with `SaltUsed` if `fingerprint` has been redeemed.
    pub fn ensure_unused(&self, fingerprint: &B256) -> Result<(), CollectionError> {
        if self.is_finalized(fingerprint) {
            tracing::warn!(target: "zbz::replay", %fingerprint, "salt already used");
            return Err(CollectionError::SaltUsed);
        }
        Ok(())
    }

    /// Marks `fingerprint` as redeemed.
    pub fn consume(&mut self, fingerprint: B256) -> Result<(), CollectionError> {
        if !self.consumed.insert(fingerprint) {
            return Err(CollectionError::SaltUsed);
        }
        Ok(())
    }

    /// Number of redeemed fingerprints.
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    /// Whether nothing has been redeemed yet.
    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }

    /// Drops a mark placed by a mint that is being rolled back.
    pub(crate) fn release(&mut self, fingerprint: &B256) {
        self.consumed.remove(fingerprint);
    }
}
