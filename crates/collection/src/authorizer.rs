//! Verifier-signed mint authorizations.
//!
//! A verifier signs the fingerprint `keccak256(minter ‖ salt)` as an EIP-191
//! personal message; the minter redeems `(salt, signature)` exactly once.

use crate::{
    access::{AccessRegistry, Role},
    error::CollectionError,
    replay::ReplayLedger,
    Salt,
};
use alloy_primitives::{Address, Bytes, Keccak256, Signature, SignatureError, B256};

/// Computes `keccak256(abi.encodePacked(minter, salt))`.
pub fn order_hash(minter: Address, salt: Salt) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(minter);
    hasher.update(salt.to_be_bytes::<32>());
    hasher.finalize()
}

/// Recovers the address that signed `fingerprint` as a personal message.
///
/// `signature` is the 65-byte `r ‖ s ‖ v` encoding.
pub fn recover_signer(fingerprint: &B256, signature: &[u8]) -> Result<Address, SignatureError> {
    let signature = Signature::from_raw(signature)?;
    signature.recover_address_from_msg(fingerprint.as_slice())
}

/// A mint request carrying a verifier signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// Address that will receive the token.
    pub minter: Address,
    /// Caller-chosen nonce.
    pub salt: Salt,
    /// Verifier signature over [`AuthorizationRequest::fingerprint`].
    pub signature: Bytes,
}

impl AuthorizationRequest {
    /// Fingerprint recorded in the replay ledger.
    pub fn fingerprint(&self) -> B256 {
        order_hash(self.minter, self.salt)
    }
}

/// Outcome of a successful authorization check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Authorization {
    /// Fingerprint to mark as consumed.
    pub fingerprint: B256,
    /// Verifier that signed the request.
    pub verifier: Address,
}

/// Read-only authorization check against the role registry and replay ledger.
#[derive(Clone, Copy, Debug)]
pub struct SignatureAuthorizer<'a> {
    access: &'a AccessRegistry,
    replay: &'a ReplayLedger,
}

impl<'a> SignatureAuthorizer<'a> {
    /// Creates an authorizer over the given stores.
    pub const fn new(access: &'a AccessRegistry, replay: &'a ReplayLedger) -> Self {
        Self { access, replay }
    }

    /// Checks `request` without consuming it.
    ///
    /// Replay is checked before the signature so a redeemed salt always reports
    /// `SaltUsed`.
    pub fn verify(&self, request: &AuthorizationRequest) -> Result<Authorization, CollectionError> {
        let fingerprint = request.fingerprint();
        self.replay.ensure_unused(&fingerprint)?;

        let verifier = match recover_signer(&fingerprint, &request.signature) {
            Ok(signer) => signer,
            Err(err) => {
                tracing::warn!(
                    target: "zbz::authorizer",
                    minter = ?request.minter,
                    %err,
                    "signature recovery failed"
                );
                return Err(CollectionError::unauthorized(Role::Verifier));
            }
        };
        self.access.ensure(Role::Verifier, verifier)?;

        tracing::debug!(
            target: "zbz::authorizer",
            minter = ?request.minter,
            ?verifier,
            %fingerprint,
            "authorization verified"
        );
        Ok(Authorization { fingerprint, verifier })
    }
}

/// Verifies `request` and marks its fingerprint consumed.
pub fn authorize(
    access: &AccessRegistry,
    replay: &mut ReplayLedger,
    request: &AuthorizationRequest,
) -> Result<Authorization, CollectionError> {
    let authorization = SignatureAuthorizer::new(access, replay).verify(request)?;
    replay.consume(authorization.fingerprint)?;
    Ok(authorization)
}
