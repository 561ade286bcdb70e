//! # Zombiezoo collection precompile
//!
//! Exposes [`zbz_collection::Collection`] to EVM callers as a stateful
//! precompile with a Solidity ABI ([`zombiezoo::IZombiezoo`]).
//!
//! | Address | Name | Description |
//! |---------|------|-------------|
//! | `0xF200` | [`zombiezoo`] | Signed, allowlisted, fixed-supply minting |
//!
//! ## Payments
//!
//! `mint` is the only payable function. The EVM credits the call value to the
//! precompile account before the call runs; the precompile then forwards the full
//! amount to the fund recipient. A failed transfer reverts the mint.
//!
//! ## Reverts
//!
//! Failures surface as `PrecompileError::Other` carrying the reason string of the
//! original Solidity collection (see [`revert::revert_reason`]).
//!
//! ## Journaling
//!
//! Collection state lives outside the EVM, but every call that changes it
//! writes the new collection revision to storage slot
//! [`zombiezoo::REVISION_SLOT`] of the precompile account. When the enclosing
//! frame reverts, or an `eth_call` is discarded, the slot goes back with the rest
//! of the journal. The next call finds the slot behind the collection and rolls
//! the collection back to it before doing anything else.
//!
//! One collection serves one chain of EVM state. Running independent
//! executions against the same collection concurrently is not supported and
//! surfaces as `ZBZ: State out of sync` when a slot runs ahead of it.

pub mod revert;
pub mod zombiezoo;

pub use zombiezoo::{ZombiezooPrecompile, REVISION_SLOT, ZOMBIEZOO_PRECOMPILE_ADDR};
