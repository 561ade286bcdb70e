//! EIP-2981 royalty amounts.

use crate::TokenId;
use alloy_primitives::{Address, U256};

/// Basis-point denominator.
pub const ROYALTY_DENOMINATOR: u64 = 10_000;

/// Royalty owed on a sale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoyaltyInfo {
    /// Address receiving the royalty.
    pub receiver: Address,
    /// Royalty amount in the sale currency.
    pub amount: U256,
}

/// `sale_price * rate_bps / 10_000`, rounded down, without intermediate overflow.
pub fn royalty_amount(sale_price: U256, rate_bps: u64) -> U256 {
    let denominator = U256::from(ROYALTY_DENOMINATOR);
    let rate = U256::from(rate_bps);
    let (quotient, remainder) = sale_price.div_rem(denominator);
    quotient * rate + remainder * rate / denominator
}

/// Royalty for `_token_id`; every token pays the same rate to `receiver`.
///
/// `receiver` is `None` before activation, which yields a zero result.
pub fn royalty_info(
    receiver: Option<Address>,
    _token_id: TokenId,
    sale_price: U256,
    rate_bps: u64,
) -> RoyaltyInfo {
    match receiver {
        Some(receiver) => RoyaltyInfo { receiver, amount: royalty_amount(sale_price, rate_bps) },
        None => RoyaltyInfo::default(),
    }
}
