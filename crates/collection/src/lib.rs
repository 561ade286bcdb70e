//! Mint engine for the Zombiezoo collection.
//!
//! A fixed-supply token collection split into a reserved range issued by
//! admins and a public range issued strictly in order. Public mints redeem a
//! single-use authorization signed by a registered verifier, optionally
//! restricted to a Merkle allowlist during the presale, and forward their
//! payment to the configured fund recipient.
//!
//! [`Collection`] is the entry point. The component stores are public so
//! off-chain tooling can reuse the hashing and validation rules.

pub mod access;
pub mod activation;
pub mod allocator;
pub mod allowlist;
pub mod authorizer;
pub mod config;
pub mod controller;
pub mod error;
pub mod funds;
pub mod interface;
pub mod ledger;
pub mod merkle;
pub mod replay;
pub mod royalty;

mod guard;
mod journal;
mod state;

use alloy_primitives::U256;

/// Identifier of a token in the collection.
pub type TokenId = U256;

/// Verifier-chosen nonce making each authorization unique.
pub type Salt = U256;

pub use access::{AccessRegistry, Role};
pub use activation::ActivationState;
pub use allocator::TokenIndexAllocator;
pub use allowlist::{PresaleAllowlist, PRESALE_DISABLED};
pub use authorizer::{order_hash, Authorization, AuthorizationRequest, SignatureAuthorizer};
pub use config::{ActivationConfig, CollectionParams, ConfigError};
pub use controller::{Collection, PublicMint};
pub use error::CollectionError;
pub use funds::{FundsError, FundsRail};
pub use merkle::MerkleTree;
pub use replay::ReplayLedger;
pub use royalty::{royalty_info, RoyaltyInfo};
