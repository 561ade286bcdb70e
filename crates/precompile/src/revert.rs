//! Revert reasons reported by the precompile.
//!
//! Reasons match the strings the deployed Solidity collection reverts with, so
//! existing clients and test suites keep matching on them.

use alloy_primitives::{hex, Address, B256};
use zbz_collection::{CollectionError, Role};

/// Reason for a `tokenURI` query on an id that was never issued.
pub const URI_QUERY_FOR_NONEXISTENT_TOKEN: &str =
    "ERC721Metadata: URI query for nonexistent token";

/// Reason for an `ownerOf` query on an id that was never issued.
pub const OWNER_QUERY_FOR_NONEXISTENT_TOKEN: &str = "ERC721: owner query for nonexistent token";

/// Reason for value sent to a function other than `mint`.
pub const NON_PAYABLE: &str = "ZBZ: Function is not payable";

/// Maps an engine error to the revert reason returned for a call made by `caller`.
pub fn revert_reason(err: &CollectionError, caller: Address) -> String {
    let reason = match err {
        CollectionError::NotActivated => "ZBZ: Not activated",
        CollectionError::AlreadyActivated => "ZBZ: Already activated",
        CollectionError::InvalidConfiguration(_) => "ZBZ: Invalid configuration",
        CollectionError::Unauthorized { required: Role::Owner } => {
            "Ownable: caller is not the owner"
        }
        CollectionError::Unauthorized { required: Role::Admin } => {
            return format!(
                "AccessControl: account {} is missing role {}",
                hex::encode_prefixed(caller),
                B256::ZERO
            )
        }
        CollectionError::Unauthorized { required: Role::Verifier } => "ZBZ: Unauthorized",
        CollectionError::SaltUsed => "ZBZ: Salt used",
        CollectionError::NotAllowlisted | CollectionError::AllowlistCapExceeded { .. } => {
            "ZBZ: Can not mint"
        }
        CollectionError::InvalidTokenId | CollectionError::TokenOutOfRange { .. } => {
            "ZBZ: Invalid tokenId"
        }
        CollectionError::TokenReserved(_) => "ZBZ: Invalid tokenID, this tokenID is reserved",
        CollectionError::TokenOutOfReservedRange(_) => {
            "ZBZ: Invalid tokenId, must be index for reserving"
        }
        CollectionError::AlreadyMinted(_) => "ERC721: token already minted",
        CollectionError::SupplyExhausted => "ZBZ: This tokenID does not exits",
        CollectionError::UnknownToken(_) => OWNER_QUERY_FOR_NONEXISTENT_TOKEN,
        CollectionError::ZeroAddress => "ZBZ: Zero address",
        CollectionError::InvalidAmount { .. } => "ZBZ: Invalid amount",
        CollectionError::FundsForwarding(_) => "ZBZ: Transfer failed",
        CollectionError::Reentrant => "ReentrancyGuard: reentrant call",
        CollectionError::UnknownRevision { .. } => "ZBZ: State out of sync",
    };
    reason.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};

    #[test]
    fn access_failures_use_library_prefixes() {
        let caller = address!("0x00000000000000000000000000000000000000ff");
        assert!(revert_reason(&CollectionError::Unauthorized { required: Role::Owner }, caller)
            .starts_with("Ownable:"));
        assert_eq!(
            revert_reason(&CollectionError::Unauthorized { required: Role::Admin }, caller),
            "AccessControl: account 0x00000000000000000000000000000000000000ff is missing role \
             0x0000000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn allowlist_failures_share_a_reason() {
        let caller = Address::ZERO;
        assert_eq!(revert_reason(&CollectionError::NotAllowlisted, caller), "ZBZ: Can not mint");
        assert_eq!(
            revert_reason(&CollectionError::AllowlistCapExceeded { cap: 2 }, caller),
            "ZBZ: Can not mint"
        );
        assert_eq!(
            revert_reason(&CollectionError::TokenReserved(U256::from(1)), caller),
            "ZBZ: Invalid tokenID, this tokenID is reserved"
        );
    }
}
