//! The collection entry points.
//!
//! [`Collection`] owns every store behind one lock and is the only component
//! that mutates more than one of them in a single operation. Mutations either
//! complete or leave no trace, and each completed one advances the revision
//! that [`Collection::revert_to`] can roll back to.

use crate::{
    access::Role,
    authorizer::AuthorizationRequest,
    config::{ActivationConfig, CollectionParams},
    error::CollectionError,
    funds::FundsRail,
    guard::CallLock,
    interface,
    royalty::{royalty_info, RoyaltyInfo},
    state::{CollectionState, StagedMint},
    Salt, TokenId,
};
use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;

/// Arguments of a public mint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicMint {
    /// Id the minter expects; must equal the current public cursor.
    pub token_id: TokenId,
    /// Salt the verifier signed.
    pub salt: Salt,
    /// Verifier signature over `keccak256(minter ‖ salt)`.
    pub signature: Bytes,
    /// Merkle proof against the presale root; empty outside the presale.
    pub proof: Vec<B256>,
}

impl PublicMint {
    /// Authorization request this mint redeems for `minter`.
    pub fn authorization(&self, minter: Address) -> AuthorizationRequest {
        AuthorizationRequest { minter, salt: self.salt, signature: self.signature.clone() }
    }
}

/// A fixed-supply collection with signed, allowlisted, two-range minting.
///
/// State sits behind a re-entrant mutex. A public mint holds it until its
/// payment settles, so other threads never observe an unsettled mint, while a
/// fund-forwarding callback on the minting thread can still query the
/// collection.
#[derive(Debug)]
pub struct Collection {
    params: CollectionParams,
    state: ReentrantMutex<RefCell<CollectionState>>,
    call_lock: CallLock,
}

impl Collection {
    /// Deploys a collection with default parameters; `deployer` gets every role.
    pub fn new(deployer: Address) -> Self {
        Self::with_params(deployer, CollectionParams::default())
    }

    /// Deploys a collection with explicit parameters.
    pub fn with_params(deployer: Address, params: CollectionParams) -> Self {
        tracing::info!(
            target: "zbz::collection",
            ?deployer,
            name = %params.name,
            symbol = %params.symbol,
            unit_price = %params.unit_price,
            "collection deployed"
        );
        Self {
            params,
            state: ReentrantMutex::new(RefCell::new(CollectionState::new(deployer))),
            call_lock: CallLock::default(),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&CollectionState) -> T) -> T {
        let guard = self.state.lock();
        let state = guard.borrow();
        f(&state)
    }

    fn write<T>(&self, f: impl FnOnce(&mut CollectionState) -> T) -> T {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        f(&mut state)
    }

    // === Metadata ===

    /// Deploy-time parameters.
    pub const fn params(&self) -> &CollectionParams {
        &self.params
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.params.name
    }

    /// Collection symbol.
    pub fn symbol(&self) -> &str {
        &self.params.symbol
    }

    /// Whether the collection implements the interface with ERC-165 id `interface_id`.
    pub fn supports_interface(&self, interface_id: FixedBytes<4>) -> bool {
        interface::supports_interface(interface_id)
    }

    // === Revisions ===

    /// Number of mutations committed since deployment.
    ///
    /// Rejected calls and calls that change nothing leave it unchanged.
    pub fn revision(&self) -> u64 {
        self.read(CollectionState::revision)
    }

    /// Rolls back every mutation committed after `revision`, newest first.
    ///
    /// Returns the number of mutations undone. Fails with `UnknownRevision` if
    /// `revision` lies ahead of the current one, and with `Reentrant` when
    /// called from inside a running mint.
    pub fn revert_to(&self, revision: u64) -> Result<u64, CollectionError> {
        let _guard = self.call_lock.enter()?;
        self.write(|state| state.revert_to(revision))
    }

    // === Roles ===

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.read(|state| state.access.owner())
    }

    /// Whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.read(|state| state.access.has_role(role, account))
    }

    /// Whether `account` may run admin operations.
    pub fn is_admin(&self, account: Address) -> bool {
        self.read(|state| state.access.is_admin(account))
    }

    /// Whether `account` is a registered verifier.
    pub fn is_verifier(&self, account: Address) -> bool {
        self.read(|state| state.access.is_verifier(account))
    }

    /// Hands ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(
        &self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), CollectionError> {
        self.write(|state| state.transfer_ownership(caller, new_owner))
    }

    /// Grants the admin role. Admin only, idempotent.
    pub fn grant_admin(&self, caller: Address, account: Address) -> Result<(), CollectionError> {
        self.write(|state| {
            if state.access.grant_admin(caller, account)? {
                state.record_role_change(Role::Admin, account, true);
            }
            Ok(())
        })
    }

    /// Revokes the admin role. Admin only, idempotent.
    pub fn revoke_admin(&self, caller: Address, account: Address) -> Result<(), CollectionError> {
        self.write(|state| {
            if state.access.revoke_admin(caller, account)? {
                state.record_role_change(Role::Admin, account, false);
            }
            Ok(())
        })
    }

    /// Registers a verifier. Admin only, idempotent.
    pub fn set_verifier(&self, caller: Address, account: Address) -> Result<(), CollectionError> {
        self.write(|state| {
            if state.access.set_verifier(caller, account)? {
                state.record_role_change(Role::Verifier, account, true);
            }
            Ok(())
        })
    }

    /// Removes a verifier. Admin only, idempotent.
    pub fn revoke_verifier(
        &self,
        caller: Address,
        account: Address,
    ) -> Result<(), CollectionError> {
        self.write(|state| {
            if state.access.revoke_verifier(caller, account)? {
                state.record_role_change(Role::Verifier, account, false);
            }
            Ok(())
        })
    }

    // === Activation ===

    /// Configures the collection once. Admin only.
    pub fn activate(
        &self,
        caller: Address,
        config: ActivationConfig,
    ) -> Result<(), CollectionError> {
        self.write(|state| state.activate(caller, config))
    }

    /// Whether [`Collection::activate`] has succeeded.
    pub fn is_activated(&self) -> bool {
        self.read(|state| state.activation.is_configured())
    }

    /// Copy of the activation configuration, if activated.
    pub fn activation_config(&self) -> Option<ActivationConfig> {
        self.read(|state| state.activation.config().ok().cloned())
    }

    /// Highest issuable id; zero before activation.
    pub fn total_supply(&self) -> U256 {
        self.activation_config().map(|config| config.total_supply).unwrap_or_default()
    }

    /// Payment and royalty recipient; zero before activation.
    pub fn fund_recipient(&self) -> Address {
        self.activation_config().map(|config| config.fund_recipient).unwrap_or_default()
    }

    /// Next id `mint_public` will issue.
    pub fn current_public_cursor(&self) -> Result<TokenId, CollectionError> {
        self.read(|state| Ok(state.activation.allocator()?.cursor()))
    }

    // === Presale ===

    /// Replaces the presale root; the zero root disables the presale. Admin only.
    pub fn set_presale_root(&self, caller: Address, root: B256) -> Result<(), CollectionError> {
        self.write(|state| state.set_presale_root(caller, root))
    }

    /// Current presale root.
    pub fn presale_root(&self) -> B256 {
        self.read(|state| state.presale.root())
    }

    /// Presale mints counted against `account`.
    pub fn presale_minted(&self, account: Address) -> u64 {
        self.read(|state| state.presale.minted(account))
    }

    /// Whether the authorization with `fingerprint` has been redeemed.
    pub fn is_finalized(&self, fingerprint: &B256) -> bool {
        self.read(|state| state.replay.is_finalized(fingerprint))
    }

    // === Minting ===

    /// Redeems a verifier-signed authorization for the next public id.
    ///
    /// `payment` is forwarded in full to the fund recipient through `rail`. If
    /// forwarding fails, the mint is rolled back: the salt stays unused, the
    /// presale slot is returned and the cursor does not move. Other threads
    /// wait on the state lock until the outcome is known.
    pub fn mint_public<R>(
        &self,
        caller: Address,
        request: &PublicMint,
        payment: U256,
        rail: &mut R,
    ) -> Result<TokenId, CollectionError>
    where
        R: FundsRail + ?Sized,
    {
        let _guard = self.call_lock.enter()?;
        let state = self.state.lock();

        let StagedMint { token_id, fund_recipient, journal } =
            state.borrow_mut().stage_public_mint(&self.params, caller, request, payment)?;

        if let Err(err) = rail.forward(fund_recipient, payment) {
            tracing::warn!(
                target: "zbz::mint",
                minter = ?caller,
                %token_id,
                %err,
                "fund forwarding failed, reverting mint"
            );
            journal.revert(&mut state.borrow_mut());
            return Err(CollectionError::FundsForwarding(err.to_string()));
        }
        state.borrow_mut().commit(journal);

        tracing::info!(
            target: "zbz::mint",
            minter = ?caller,
            %token_id,
            %payment,
            ?fund_recipient,
            "public mint completed"
        );
        Ok(token_id)
    }

    /// Issues reserved id `token_id` to `to`. Admin only.
    pub fn mint_reserved(
        &self,
        caller: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), CollectionError> {
        let _guard = self.call_lock.enter()?;
        self.write(|state| state.mint_reserved(caller, to, token_id))?;
        tracing::info!(target: "zbz::mint", ?to, %token_id, "reserved mint completed");
        Ok(())
    }

    // === Token queries ===

    /// Owner of `token_id`.
    pub fn owner_of(&self, token_id: TokenId) -> Result<Address, CollectionError> {
        self.read(|state| state.ledger.owner_of(token_id))
    }

    /// Tokens held by `owner`.
    pub fn balance_of(&self, owner: Address) -> Result<U256, CollectionError> {
        self.read(|state| state.ledger.balance_of(owner))
    }

    /// Tokens issued so far across both ranges.
    pub fn minted_count(&self) -> usize {
        self.read(|state| state.ledger.minted())
    }

    /// Metadata URI of an issued token.
    pub fn token_uri(&self, token_id: TokenId) -> Result<String, CollectionError> {
        self.read(|state| {
            state.ledger.owner_of(token_id)?;
            Ok(state.activation.config()?.token_uri(token_id))
        })
    }

    /// Royalty owed when `token_id` sells for `sale_price`.
    pub fn royalty_info(&self, token_id: TokenId, sale_price: U256) -> RoyaltyInfo {
        let receiver = self.activation_config().map(|config| config.fund_recipient);
        royalty_info(receiver, token_id, sale_price, self.params.royalty_bps)
    }
}
