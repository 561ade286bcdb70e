//! Payment settlement seam.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Settlement failure reported by a [`FundsRail`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FundsError(pub String);

impl FundsError {
    /// Creates an error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Moves a mint payment to the fund recipient.
///
/// Implementations perform exactly one balance transfer. An error rolls back the
/// whole mint.
pub trait FundsRail {
    /// Transfers `amount` to `recipient`.
    fn forward(&mut self, recipient: Address, amount: U256) -> Result<(), FundsError>;
}

impl<F> FundsRail for F
where
    F: FnMut(Address, U256) -> Result<(), FundsError>,
{
    fn forward(&mut self, recipient: Address, amount: U256) -> Result<(), FundsError> {
        self(recipient, amount)
    }
}
