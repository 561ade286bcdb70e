//! Owner, admin and verifier roles.

use crate::error::CollectionError;
use alloy_primitives::Address;
use std::{collections::HashSet, fmt};

/// Capability a privileged operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Unique, transferable contract owner.
    Owner,
    /// Collection administrator.
    Admin,
    /// Off-chain signer whose signatures authorize public mints.
    Verifier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => f.write_str("owner"),
            Self::Admin => f.write_str("admin"),
            Self::Verifier => f.write_str("verifier"),
        }
    }
}

/// Role registry: one owner plus admin and verifier sets.
///
/// The owner is always treated as an admin, whether or not it appears in the
/// admin set.
#[derive(Clone, Debug)]
pub struct AccessRegistry {
    owner: Address,
    admins: HashSet<Address>,
    verifiers: HashSet<Address>,
}

impl AccessRegistry {
    /// Creates a registry where `deployer` holds every role.
    pub fn new(deployer: Address) -> Self {
        Self {
            owner: deployer,
            admins: HashSet::from([deployer]),
            verifiers: HashSet::from([deployer]),
        }
    }

    /// Current owner.
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Whether `account` may run admin operations.
    pub fn is_admin(&self, account: Address) -> bool {
        account == self.owner || self.admins.contains(&account)
    }

    /// Whether `account` is a registered verifier.
    pub fn is_verifier(&self, account: Address) -> bool {
        self.verifiers.contains(&account)
    }

    /// Whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        match role {
            Role::Owner => account == self.owner,
            Role::Admin => self.is_admin(account),
            Role::Verifier => self.is_verifier(account),
        }
    }

    /// Fails with `Unauthorized` unless `caller` holds `role`.
    pub fn ensure(&self, role: Role, caller: Address) -> Result<(), CollectionError> {
        if self.has_role(role, caller) {
            Ok(())
        } else {
            tracing::warn!(target: "zbz::access", ?caller, %role, "authorization denied");
            Err(CollectionError::unauthorized(role))
        }
    }

    /// Replaces the owner. Owner only.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), CollectionError> {
        self.ensure(Role::Owner, caller)?;
        if new_owner.is_zero() {
            return Err(CollectionError::ZeroAddress);
        }
        let previous = std::mem::replace(&mut self.owner, new_owner);
        tracing::info!(target: "zbz::access", ?previous, ?new_owner, "ownership transferred");
        Ok(())
    }

    /// Grants the admin role. Returns whether the set changed.
    pub fn grant_admin(
        &mut self,
        caller: Address,
        account: Address,
    ) -> Result<bool, CollectionError> {
        self.ensure(Role::Admin, caller)?;
        Ok(Self::update(&mut self.admins, Role::Admin, account, true))
    }

    /// Revokes the admin role. Returns whether the set changed.
    ///
    /// Revoking the owner only removes its explicit entry; ownership still
    /// implies admin rights.
    pub fn revoke_admin(
        &mut self,
        caller: Address,
        account: Address,
    ) -> Result<bool, CollectionError> {
        self.ensure(Role::Admin, caller)?;
        Ok(Self::update(&mut self.admins, Role::Admin, account, false))
    }

    /// Registers a verifier. Returns whether the set changed.
    pub fn set_verifier(
        &mut self,
        caller: Address,
        account: Address,
    ) -> Result<bool, CollectionError> {
        self.ensure(Role::Admin, caller)?;
        Ok(Self::update(&mut self.verifiers, Role::Verifier, account, true))
    }

    /// Removes a verifier. Returns whether the set changed.
    pub fn revoke_verifier(
        &mut self,
        caller: Address,
        account: Address,
    ) -> Result<bool, CollectionError> {
        self.ensure(Role::Admin, caller)?;
        Ok(Self::update(&mut self.verifiers, Role::Verifier, account, false))
    }

    /// Puts back a previous owner while a mutation is being rolled back.
    pub(crate) fn restore_owner(&mut self, owner: Address) {
        self.owner = owner;
    }

    /// Sets `account`'s membership in the `role` set without a caller check.
    pub(crate) fn restore_role(&mut self, role: Role, account: Address, present: bool) {
        let set = match role {
            Role::Owner => return,
            Role::Admin => &mut self.admins,
            Role::Verifier => &mut self.verifiers,
        };
        if present {
            set.insert(account);
        } else {
            set.remove(&account);
        }
    }

    fn update(set: &mut HashSet<Address>, role: Role, account: Address, grant: bool) -> bool {
        let changed = if grant { set.insert(account) } else { set.remove(&account) };
        if changed {
            tracing::info!(target: "zbz::access", ?account, %role, grant, "role updated");
        } else {
            tracing::debug!(target: "zbz::access", ?account, %role, grant, "role unchanged");
        }
        changed
    }
}
