//! Undo log for collection mutations.
//!
//! Every successful mutating operation leaves one [`Journal`] in the state's
//! history. Popping and reverting journals rolls the collection back to an
//! earlier revision, which lets an embedding execution environment discard
//! work when the frame that performed it is reverted.

use crate::{access::Role, state::CollectionState, TokenId};
use alloy_primitives::{Address, B256};

/// One applied effect, recorded so it can be undone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum JournalEntry {
    /// Ownership moved away from the address.
    OwnerTransferred(Address),
    /// The account entered the role set.
    RoleGranted(Role, Address),
    /// The account left the role set.
    RoleRevoked(Role, Address),
    /// The collection was activated.
    Activated,
    /// The presale root replaced the given one.
    PresaleRootSet(B256),
    /// A fingerprint was marked consumed.
    SaltConsumed(B256),
    /// A presale slot was counted against the minter.
    PresaleCounted(Address),
    /// The public cursor moved past the id.
    CursorAdvanced(TokenId),
    /// An ownership record was created.
    TokenIssued(TokenId),
}

/// Effects of one operation, reverted newest first.
#[derive(Clone, Debug, Default)]
#[must_use = "a journal that is dropped can no longer be reverted"]
pub(crate) struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub(crate) fn single(entry: JournalEntry) -> Self {
        Self { entries: vec![entry] }
    }

    pub(crate) fn push(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Undoes every recorded effect.
    pub(crate) fn revert(self, state: &mut CollectionState) {
        for entry in self.entries.into_iter().rev() {
            tracing::debug!(target: "zbz::journal", ?entry, "reverting effect");
            match entry {
                JournalEntry::OwnerTransferred(previous) => state.access.restore_owner(previous),
                JournalEntry::RoleGranted(role, account) => {
                    state.access.restore_role(role, account, false)
                }
                JournalEntry::RoleRevoked(role, account) => {
                    state.access.restore_role(role, account, true)
                }
                JournalEntry::Activated => state.activation.reset(),
                JournalEntry::PresaleRootSet(previous) => state.presale.set_root(previous),
                JournalEntry::SaltConsumed(fingerprint) => state.replay.release(&fingerprint),
                JournalEntry::PresaleCounted(minter) => state.presale.release(minter),
                JournalEntry::CursorAdvanced(id) => {
                    if let Ok(allocator) = state.activation.allocator_mut() {
                        allocator.rewind(id);
                    }
                }
                JournalEntry::TokenIssued(id) => state.ledger.unmint(id),
            }
        }
    }
}
