//! Collection storage and the staged mint paths.

use crate::{
    access::{AccessRegistry, Role},
    activation::ActivationState,
    allowlist::{PresaleAllowlist, PresaleTicket},
    authorizer::{Authorization, SignatureAuthorizer},
    config::{ActivationConfig, CollectionParams},
    controller::PublicMint,
    error::CollectionError,
    journal::{Journal, JournalEntry},
    ledger::TokenLedger,
    replay::ReplayLedger,
    TokenId,
};
use alloy_primitives::{Address, B256, U256};

/// Every store the collection owns. Only [`crate::Collection`] touches it, under
/// its lock.
#[derive(Debug)]
pub(crate) struct CollectionState {
    pub(crate) access: AccessRegistry,
    pub(crate) activation: ActivationState,
    pub(crate) replay: ReplayLedger,
    pub(crate) presale: PresaleAllowlist,
    pub(crate) ledger: TokenLedger,
    history: Vec<Journal>,
}

/// A public mint whose effects are applied but whose payment is not yet settled.
#[derive(Debug)]
pub(crate) struct StagedMint {
    pub(crate) token_id: TokenId,
    pub(crate) fund_recipient: Address,
    pub(crate) journal: Journal,
}

impl CollectionState {
    pub(crate) fn new(deployer: Address) -> Self {
        Self {
            access: AccessRegistry::new(deployer),
            activation: ActivationState::default(),
            replay: ReplayLedger::default(),
            presale: PresaleAllowlist::default(),
            ledger: TokenLedger::default(),
            history: Vec::new(),
        }
    }

    // === Revisions ===

    /// Number of committed mutations.
    pub(crate) fn revision(&self) -> u64 {
        self.history.len() as u64
    }

    /// Keeps the effects of a finished operation. Empty journals leave the
    /// revision unchanged.
    pub(crate) fn commit(&mut self, journal: Journal) {
        if !journal.is_empty() {
            self.history.push(journal);
        }
    }

    /// Undoes committed mutations until `revision` is reached. Returns how many
    /// were undone.
    pub(crate) fn revert_to(&mut self, revision: u64) -> Result<u64, CollectionError> {
        let current = self.revision();
        if revision > current {
            return Err(CollectionError::UnknownRevision { requested: revision, current });
        }
        for _ in revision..current {
            if let Some(journal) = self.history.pop() {
                journal.revert(self);
            }
        }
        if revision < current {
            tracing::info!(target: "zbz::journal", from = current, to = revision, "rolled back");
        }
        Ok(current - revision)
    }

    // === Administration ===

    pub(crate) fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), CollectionError> {
        let previous = self.access.owner();
        self.access.transfer_ownership(caller, new_owner)?;
        if previous != new_owner {
            self.commit(Journal::single(JournalEntry::OwnerTransferred(previous)));
        }
        Ok(())
    }

    /// Records a role update that changed the set.
    pub(crate) fn record_role_change(&mut self, role: Role, account: Address, granted: bool) {
        let entry = if granted {
            JournalEntry::RoleGranted(role, account)
        } else {
            JournalEntry::RoleRevoked(role, account)
        };
        self.commit(Journal::single(entry));
    }

    pub(crate) fn activate(
        &mut self,
        caller: Address,
        config: ActivationConfig,
    ) -> Result<(), CollectionError> {
        self.access.ensure(Role::Admin, caller)?;
        self.activation.activate(config)?;
        self.commit(Journal::single(JournalEntry::Activated));
        Ok(())
    }

    pub(crate) fn set_presale_root(
        &mut self,
        caller: Address,
        root: B256,
    ) -> Result<(), CollectionError> {
        self.access.ensure(Role::Admin, caller)?;
        let previous = self.presale.root();
        if previous != root {
            self.presale.set_root(root);
            self.commit(Journal::single(JournalEntry::PresaleRootSet(previous)));
        }
        Ok(())
    }

    // === Minting ===

    /// Runs every public-mint check, then applies all effects together.
    ///
    /// Checks run in a fixed order and the first failure wins. Nothing is mutated
    /// unless every check passes.
    pub(crate) fn stage_public_mint(
        &mut self,
        params: &CollectionParams,
        minter: Address,
        request: &PublicMint,
        payment: U256,
    ) -> Result<StagedMint, CollectionError> {
        let fund_recipient = self.activation.config()?.fund_recipient;

        if payment < params.unit_price {
            return Err(CollectionError::InvalidAmount { paid: payment, price: params.unit_price });
        }

        self.activation.allocator()?.check_public(request.token_id)?;

        let authorizer = SignatureAuthorizer::new(&self.access, &self.replay);
        let authorization = authorizer.verify(&request.authorization(minter))?;

        let ticket = self.presale.check(minter, &request.proof, params.presale_cap)?;

        let mut journal = Journal::default();
        match self.apply_public_mint(minter, authorization, ticket, &mut journal) {
            Ok(token_id) => Ok(StagedMint { token_id, fund_recipient, journal }),
            Err(err) => {
                journal.revert(self);
                Err(err)
            }
        }
    }

    fn apply_public_mint(
        &mut self,
        minter: Address,
        authorization: Authorization,
        ticket: PresaleTicket,
        journal: &mut Journal,
    ) -> Result<TokenId, CollectionError> {
        self.replay.consume(authorization.fingerprint)?;
        journal.push(JournalEntry::SaltConsumed(authorization.fingerprint));

        self.presale.consume(ticket);
        if let PresaleTicket::Counted(account) = ticket {
            journal.push(JournalEntry::PresaleCounted(account));
        }

        let token_id = self.activation.allocator_mut()?.allocate_public()?;
        journal.push(JournalEntry::CursorAdvanced(token_id));

        self.ledger.mint(minter, token_id)?;
        journal.push(JournalEntry::TokenIssued(token_id));

        Ok(token_id)
    }

    /// Issues a reserved id to `to`. Admin only; no payment involved.
    pub(crate) fn mint_reserved(
        &mut self,
        caller: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), CollectionError> {
        self.access.ensure(Role::Admin, caller)?;
        self.activation.allocator()?.check_reserved(token_id, &self.ledger)?;
        self.ledger.mint(to, token_id)?;
        self.commit(Journal::single(JournalEntry::TokenIssued(token_id)));
        Ok(())
    }
}
