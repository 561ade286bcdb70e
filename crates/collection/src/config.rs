//! Collection parameters and activation configuration.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::{env, fmt, str::FromStr};
use thiserror::Error;

/// Collection name.
pub const DEFAULT_NAME: &str = "Zombiezoo";

/// Collection symbol.
pub const DEFAULT_SYMBOL: &str = "ZBZ";

/// Unit price: 0.8 ether in wei.
pub const DEFAULT_UNIT_PRICE: U256 = U256::from_limbs([800_000_000_000_000_000, 0, 0, 0]);

/// Presale mints allowed per allowlisted address.
pub const DEFAULT_PRESALE_CAP: u64 = 2;

/// Royalty rate in basis points (10%).
pub const DEFAULT_ROYALTY_BPS: u64 = 1_000;

/// Environment variable holding the last reserved token id.
pub const RESERVED_RANGE_END_ENV: &str = "ZBZ_RESERVED_RANGE_END";
/// Environment variable holding the total supply.
pub const TOTAL_SUPPLY_ENV: &str = "ZBZ_TOTAL_SUPPLY";
/// Environment variable holding the base metadata URI.
pub const BASE_URI_ENV: &str = "ZBZ_BASE_URI";
/// Environment variable holding the fund recipient address.
pub const FUND_RECIPIENT_ENV: &str = "ZBZ_FUND_RECIPIENT";

/// Fixed, deploy-time parameters of a collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionParams {
    /// Collection name.
    pub name: String,
    /// Collection symbol.
    pub symbol: String,
    /// Minimum payment for one public mint, in wei.
    pub unit_price: U256,
    /// Presale mints allowed per allowlisted address.
    pub presale_cap: u64,
    /// Royalty rate in basis points of the sale price.
    pub royalty_bps: u64,
}

impl Default for CollectionParams {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            unit_price: DEFAULT_UNIT_PRICE,
            presale_cap: DEFAULT_PRESALE_CAP,
            royalty_bps: DEFAULT_ROYALTY_BPS,
        }
    }
}

/// Write-once collection configuration supplied at activation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationConfig {
    /// Last id of the admin-reserved range; `0` means no reserved range.
    pub reserved_range_end: U256,
    /// Highest id the collection will ever issue.
    pub total_supply: U256,
    /// Prefix for token metadata URIs.
    pub base_uri: String,
    /// Receives mint payments and royalties.
    pub fund_recipient: Address,
}

impl ActivationConfig {
    /// Creates a configuration without validating it.
    pub fn new(
        reserved_range_end: U256,
        total_supply: U256,
        base_uri: impl Into<String>,
        fund_recipient: Address,
    ) -> Self {
        Self { reserved_range_end, total_supply, base_uri: base_uri.into(), fund_recipient }
    }

    /// Checks the invariants activation relies on.
    pub fn validate(&self) -> Result<(), crate::CollectionError> {
        if self.total_supply <= self.reserved_range_end {
            return Err(crate::CollectionError::InvalidConfiguration(format!(
                "total supply {} must exceed reserved range end {}",
                self.total_supply, self.reserved_range_end
            )));
        }
        if self.fund_recipient.is_zero() {
            return Err(crate::CollectionError::InvalidConfiguration(
                "fund recipient cannot be the zero address".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads the configuration from `ZBZ_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            reserved_range_end: parse_env(RESERVED_RANGE_END_ENV)?,
            total_supply: parse_env(TOTAL_SUPPLY_ENV)?,
            base_uri: read_env(BASE_URI_ENV)?,
            fund_recipient: parse_env(FUND_RECIPIENT_ENV)?,
        })
    }

    /// Builds the metadata URI for `token_id`.
    ///
    /// The base and the decimal id are joined by exactly one `/`.
    pub fn token_uri(&self, token_id: U256) -> String {
        if self.base_uri.ends_with('/') {
            format!("{}{token_id}", self.base_uri)
        } else {
            format!("{}/{token_id}", self.base_uri)
        }
    }
}

/// Errors that can occur while loading an [`ActivationConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The environment variable was not set.
    #[error("environment variable {var} is not set")]
    MissingEnv {
        /// Name of the missing variable.
        var: String,
    },
    /// The environment variable was empty or whitespace.
    #[error("environment variable {var} is empty")]
    EmptyEnv {
        /// Name of the empty variable.
        var: String,
    },
    /// The value could not be parsed.
    #[error("invalid value for {var}: {reason}")]
    Invalid {
        /// Name of the offending variable.
        var: String,
        /// Parser message.
        reason: ParseDisplay,
    },
}

/// Wrapper for formatting parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDisplay(String);

impl fmt::Display for ParseDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn read_env(var: &str) -> Result<String, ConfigError> {
    let raw = env::var(var).map_err(|_| ConfigError::MissingEnv { var: var.into() })?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyEnv { var: var.into() });
    }
    Ok(trimmed.to_string())
}

fn parse_env<T>(var: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    parse_value(var, &read_env(var)?)
}

fn parse_value<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>().map_err(|err| ConfigError::Invalid {
        var: var.into(),
        reason: ParseDisplay(err.to_string()),
    })
}
