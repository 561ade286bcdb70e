//! Write-once activation state.

use crate::{
    allocator::TokenIndexAllocator,
    config::ActivationConfig,
    error::CollectionError,
};

/// Activation lifecycle: `Unconfigured` until the single successful
/// [`ActivationState::activate`], `Configured` forever after.
#[derive(Clone, Debug, Default)]
pub enum ActivationState {
    /// No configuration yet; every mint path is closed.
    #[default]
    Unconfigured,
    /// Activated collection with its public-range allocator.
    Configured {
        /// Immutable configuration.
        config: ActivationConfig,
        /// Public cursor, initialized to `reserved_range_end + 1`.
        allocator: TokenIndexAllocator,
    },
}

impl ActivationState {
    /// Stores `config` and opens minting.
    ///
    /// Fails with `AlreadyActivated` on any second call, whatever the parameters.
    pub fn activate(&mut self, config: ActivationConfig) -> Result<(), CollectionError> {
        if self.is_configured() {
            return Err(CollectionError::AlreadyActivated);
        }
        config.validate()?;

        let allocator = TokenIndexAllocator::new(config.reserved_range_end, config.total_supply);
        tracing::info!(
            target: "zbz::activation",
            reserved_range_end = %config.reserved_range_end,
            total_supply = %config.total_supply,
            base_uri = %config.base_uri,
            fund_recipient = ?config.fund_recipient,
            "collection activated"
        );
        *self = Self::Configured { config, allocator };
        Ok(())
    }

    /// Whether activation has happened.
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured { .. })
    }

    /// Activation configuration, or `NotActivated`.
    pub fn config(&self) -> Result<&ActivationConfig, CollectionError> {
        match self {
            Self::Configured { config, .. } => Ok(config),
            Self::Unconfigured => Err(CollectionError::NotActivated),
        }
    }

    /// Public-range allocator, or `NotActivated`.
    pub fn allocator(&self) -> Result<&TokenIndexAllocator, CollectionError> {
        match self {
            Self::Configured { allocator, .. } => Ok(allocator),
            Self::Unconfigured => Err(CollectionError::NotActivated),
        }
    }

    /// Returns to `Unconfigured` while an activation is being rolled back.
    pub(crate) fn reset(&mut self) {
        *self = Self::Unconfigured;
    }

    pub(crate) fn allocator_mut(&mut self) -> Result<&mut TokenIndexAllocator, CollectionError> {
        match self {
            Self::Configured { allocator, .. } => Ok(allocator),
            Self::Unconfigured => Err(CollectionError::NotActivated),
        }
    }
}
