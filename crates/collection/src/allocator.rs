//! Token id allocation across the reserved and public ranges.
//!
//! The reserved range `[1, reserved_range_end]` is issued by admins in any order.
//! The public range `(reserved_range_end, total_supply]` is issued strictly in
//! sequence through a cursor that only moves forward.

use crate::{error::CollectionError, ledger::TokenLedger, TokenId};
use alloy_primitives::U256;

/// Sequential allocator for the public range plus validation for the reserved one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenIndexAllocator {
    reserved_range_end: TokenId,
    total_supply: TokenId,
    next_public: TokenId,
}

impl TokenIndexAllocator {
    /// Creates an allocator whose cursor starts right after the reserved range.
    pub fn new(reserved_range_end: TokenId, total_supply: TokenId) -> Self {
        Self {
            reserved_range_end,
            total_supply,
            next_public: reserved_range_end + U256::from(1),
        }
    }

    /// Next id the public range will issue.
    pub const fn cursor(&self) -> TokenId {
        self.next_public
    }

    /// Last id of the reserved range.
    pub const fn reserved_range_end(&self) -> TokenId {
        self.reserved_range_end
    }

    /// Highest issuable id.
    pub const fn total_supply(&self) -> TokenId {
        self.total_supply
    }

    /// Whether `id` lies in the admin-reserved range.
    pub fn is_reserved(&self, id: TokenId) -> bool {
        !id.is_zero() && id <= self.reserved_range_end
    }

    /// Validates an admin request for a reserved id.
    pub fn check_reserved(&self, id: TokenId, ledger: &TokenLedger) -> Result<(), CollectionError> {
        if id.is_zero() {
            return Err(CollectionError::InvalidTokenId);
        }
        if id > self.reserved_range_end {
            return Err(CollectionError::TokenOutOfReservedRange(id));
        }
        if ledger.exists(id) {
            return Err(CollectionError::AlreadyMinted(id));
        }
        Ok(())
    }

    /// Validates the id a public minter expects to receive.
    ///
    /// The id must be the current cursor. Exhaustion is reported only once the
    /// cursor has moved past the total supply.
    pub fn check_public(&self, requested: TokenId) -> Result<(), CollectionError> {
        if requested.is_zero() {
            return Err(CollectionError::InvalidTokenId);
        }
        if self.is_reserved(requested) {
            return Err(CollectionError::TokenReserved(requested));
        }
        if self.is_exhausted() {
            return Err(CollectionError::SupplyExhausted);
        }
        if requested != self.next_public {
            return Err(CollectionError::TokenOutOfRange {
                requested,
                expected: self.next_public,
            });
        }
        Ok(())
    }

    /// Whether every public id has been issued.
    pub fn is_exhausted(&self) -> bool {
        self.next_public > self.total_supply
    }

    /// Issues the next public id and advances the cursor.
    pub fn allocate_public(&mut self) -> Result<TokenId, CollectionError> {
        if self.is_exhausted() {
            return Err(CollectionError::SupplyExhausted);
        }
        let id = self.next_public;
        self.next_public = id + U256::from(1);
        Ok(id)
    }

    /// Moves the cursor back onto `id`, undoing the allocation that issued it.
    pub(crate) fn rewind(&mut self, id: TokenId) {
        debug_assert_eq!(
            id + U256::from(1),
            self.next_public,
            "only the last public id can be rewound"
        );
        self.next_public = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn allocator(reserved: u64, supply: u64) -> TokenIndexAllocator {
        TokenIndexAllocator::new(U256::from(reserved), U256::from(supply))
    }

    #[test]
    fn cursor_starts_after_reserved_range() {
        assert_eq!(allocator(50, 1000).cursor(), U256::from(51));
        assert_eq!(allocator(0, 10).cursor(), U256::from(1));
    }

    #[test]
    fn public_allocation_is_gapless_until_exhausted() {
        let mut alloc = allocator(80, 83);
        let issued: Vec<_> = (0..3).map(|_| alloc.allocate_public().unwrap()).collect();
        assert_eq!(issued, vec![U256::from(81), U256::from(82), U256::from(83)]);
        assert_eq!(alloc.allocate_public(), Err(CollectionError::SupplyExhausted));
        assert_eq!(alloc.cursor(), U256::from(84));
    }

    #[test]
    fn public_request_must_match_cursor() {
        let alloc = allocator(50, 1000);
        assert_eq!(alloc.check_public(U256::from(51)), Ok(()));
        assert_eq!(
            alloc.check_public(U256::from(52)),
            Err(CollectionError::TokenOutOfRange {
                requested: U256::from(52),
                expected: U256::from(51),
            })
        );
        assert_eq!(alloc.check_public(U256::ZERO), Err(CollectionError::InvalidTokenId));
    }

    #[test]
    fn reserved_ids_are_refused_on_the_public_path() {
        let alloc = allocator(50, 1000);
        assert!(alloc.is_reserved(U256::from(1)));
        assert!(alloc.is_reserved(U256::from(50)));
        assert!(!alloc.is_reserved(U256::ZERO));
        assert!(!alloc.is_reserved(U256::from(51)));
        assert_eq!(
            alloc.check_public(U256::from(50)),
            Err(CollectionError::TokenReserved(U256::from(50)))
        );
    }

    #[test]
    fn id_above_supply_is_out_of_range_while_supply_remains() {
        let mut alloc = allocator(80, 83);
        assert_eq!(
            alloc.check_public(U256::from(5000)),
            Err(CollectionError::TokenOutOfRange {
                requested: U256::from(5000),
                expected: U256::from(81),
            })
        );
        assert!(!alloc.is_exhausted());

        for _ in 0..3 {
            alloc.allocate_public().unwrap();
        }
        assert!(alloc.is_exhausted());
        assert_eq!(alloc.check_public(U256::from(84)), Err(CollectionError::SupplyExhausted));
        assert_eq!(alloc.check_public(U256::from(5000)), Err(CollectionError::SupplyExhausted));
    }

    #[test]
    fn reserved_requests_are_validated() {
        let alloc = allocator(50, 1000);
        let mut ledger = TokenLedger::default();
        let holder = address!("0x00000000000000000000000000000000000000b1");

        assert_eq!(alloc.check_reserved(U256::ZERO, &ledger), Err(CollectionError::InvalidTokenId));
        assert_eq!(
            alloc.check_reserved(U256::from(51), &ledger),
            Err(CollectionError::TokenOutOfReservedRange(U256::from(51)))
        );
        assert_eq!(alloc.check_reserved(U256::from(50), &ledger), Ok(()));

        ledger.mint(holder, U256::from(7)).unwrap();
        assert_eq!(
            alloc.check_reserved(U256::from(7), &ledger),
            Err(CollectionError::AlreadyMinted(U256::from(7)))
        );
    }

    #[test]
    fn rewind_restores_cursor() {
        let mut alloc = allocator(5, 10);
        let id = alloc.allocate_public().unwrap();
        alloc.rewind(id);
        assert_eq!(alloc.cursor(), id);
    }
}
