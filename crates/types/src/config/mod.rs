// Path: crates/types/src/config/mod.rs

//! Configuration structures for bootstrapping a tracking ledger.
use crate::app::{AccountId, DEFAULT_MAX_HISTORY_PER_BATCH};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Genesis configuration for a tracking ledger.
///
/// Principals are written as 64-character hex strings, optionally `0x`-prefixed.
///
/// ```toml
/// max_history_per_batch = 50
/// oracle = "0x0202020202020202020202020202020202020202020202020202020202020202"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Maximum number of history entries retained per batch.
    #[serde(default = "default_max_history_per_batch")]
    pub max_history_per_batch: u32,
    /// The trusted proof oracle. Write-once; may be left unset and configured later.
    #[serde(default)]
    pub oracle: Option<AccountId>,
    /// Reference to the user registry that assigns roles.
    #[serde(default)]
    pub user_registry: AccountId,
    /// Reference to the authoritative batch-metadata registry.
    #[serde(default)]
    pub batch_registry: AccountId,
}

fn default_max_history_per_batch() -> u32 {
    DEFAULT_MAX_HISTORY_PER_BATCH
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_history_per_batch: default_max_history_per_batch(),
            oracle: None,
            user_registry: AccountId::PLACEHOLDER,
            batch_registry: AccountId::PLACEHOLDER,
        }
    }
}

impl LedgerConfig {
    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Invalid(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Rejects values the ledger cannot run with: a zero ceiling or a placeholder oracle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history_per_batch == 0 {
            return Err(ConfigError::Invalid(
                "max_history_per_batch must be positive".into(),
            ));
        }
        if self.oracle.is_some_and(|o| o.is_placeholder()) {
            return Err(ConfigError::Invalid(
                "oracle must not be the placeholder principal".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.max_history_per_batch, 50);
        assert!(config.oracle.is_none());
    }

    #[test]
    fn parses_principals_from_hex() {
        let text = format!(
            "max_history_per_batch = 7\noracle = \"0x{}\"\nuser_registry = \"{}\"\n",
            hex::encode([2u8; 32]),
            hex::encode([3u8; 32]),
        );
        let config = LedgerConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.max_history_per_batch, 7);
        assert_eq!(config.oracle, Some(AccountId([2u8; 32])));
        assert_eq!(config.user_registry, AccountId([3u8; 32]));
        assert!(config.batch_registry.is_placeholder());
    }

    #[test]
    fn rejects_zero_ceiling() {
        let err = LedgerConfig::from_toml_str("max_history_per_batch = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_placeholder_oracle() {
        let text = format!("oracle = \"{}\"", hex::encode([0u8; 32]));
        assert!(LedgerConfig::from_toml_str(&text).is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = LedgerConfig::from_toml_str("max_history = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
