//! Rejection reasons for every collection operation.

use crate::access::Role;
use alloy_primitives::U256;
use thiserror::Error;

/// Reason a collection operation was rejected.
///
/// Every variant aborts the whole operation with no state change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectionError {
    // === Configuration ===
    /// The collection has not been activated yet.
    #[error("collection is not activated")]
    NotActivated,
    /// Activation was attempted a second time.
    #[error("collection is already activated")]
    AlreadyActivated,
    /// Activation parameters are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    // === Authorization ===
    /// The caller lacks the role, or a signature does not recover to a verifier.
    #[error("unauthorized: {required} role required")]
    Unauthorized {
        /// Role the operation required.
        required: Role,
    },
    /// The `(minter, salt)` authorization was already redeemed.
    #[error("salt already used")]
    SaltUsed,

    // === Allowlist ===
    /// The Merkle proof does not place the minter under the presale root.
    #[error("minter is not on the presale allowlist")]
    NotAllowlisted,
    /// The minter already used every presale slot.
    #[error("presale cap of {cap} exceeded")]
    AllowlistCapExceeded {
        /// Configured per-minter cap.
        cap: u64,
    },

    // === Allocation ===
    /// Token id 0 is never valid.
    #[error("invalid token id")]
    InvalidTokenId,
    /// A public mint requested an id from the admin-reserved range.
    #[error("token id {0} is reserved")]
    TokenReserved(U256),
    /// A reserved mint requested an id above the reserved range.
    #[error("token id {0} is outside the reserved range")]
    TokenOutOfReservedRange(U256),
    /// A public mint requested an id other than the current cursor.
    #[error("token id {requested} is not the next public id {expected}")]
    TokenOutOfRange {
        /// Id the caller asked for.
        requested: U256,
        /// Id the allocator would issue.
        expected: U256,
    },
    /// The id already has an owner.
    #[error("token {0} already minted")]
    AlreadyMinted(U256),
    /// The public range has been fully issued.
    #[error("supply exhausted")]
    SupplyExhausted,
    /// The id has not been issued.
    #[error("unknown token {0}")]
    UnknownToken(U256),
    /// The zero address cannot own tokens or the collection.
    #[error("zero address")]
    ZeroAddress,

    // === Payment ===
    /// The payment is below the unit price.
    #[error("invalid amount: paid {paid}, unit price {price}")]
    InvalidAmount {
        /// Amount sent with the call.
        paid: U256,
        /// Configured unit price.
        price: U256,
    },
    /// Forwarding the payment to the fund recipient failed.
    #[error("fund forwarding failed: {0}")]
    FundsForwarding(String),

    // === Concurrency ===
    /// A mint entry point was entered while another one was still running.
    #[error("reentrant call")]
    Reentrant,
    /// A rollback targeted a revision the collection has not reached.
    #[error("cannot roll back to revision {requested}, current revision is {current}")]
    UnknownRevision {
        /// Revision asked for.
        requested: u64,
        /// Revision the collection is at.
        current: u64,
    },
}

impl CollectionError {
    pub(crate) const fn unauthorized(required: Role) -> Self {
        Self::Unauthorized { required }
    }
}
