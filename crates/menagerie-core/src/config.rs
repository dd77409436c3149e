//! Protocol configuration for the registry and marketplace.
//!
//! Every numeric rule the creature protocol applies -- prices, cooldowns,
//! thresholds, durations -- lives here as a typed field with a canonical
//! default. A deployment can load overrides from a YAML file, but in the
//! reference protocol these values are fixed at construction time; only the
//! marketplace fee has a runtime mutation path, and even that is bounded by
//! `max_fee_basis_points`.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// The numeric rules of the creature protocol.
///
/// All fields default to the canonical protocol values, so an empty YAML
/// document (or [`ProtocolConfig::default`]) yields the reference
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProtocolConfig {
    /// Price of minting one creature, in minor units, paid to the
    /// registry's privileged owner.
    #[serde(default = "default_mint_price")]
    pub mint_price: u128,

    /// Ordinals that must elapse after a breeding event before either
    /// parent may breed again.
    #[serde(default = "default_breeding_cooldown")]
    pub breeding_cooldown_ordinals: u64,

    /// Interaction points at which a creature evolves one stage.
    #[serde(default = "default_evolution_threshold")]
    pub evolution_threshold: u64,

    /// Highest reachable evolution stage.
    #[serde(default = "default_max_evolution_stage")]
    pub max_evolution_stage: u32,

    /// Ordinals a listing remains purchasable after creation.
    #[serde(default = "default_listing_duration")]
    pub listing_duration_ordinals: u64,

    /// Lowest permitted listing price, in minor units.
    #[serde(default = "default_min_listing_price")]
    pub min_listing_price: u128,

    /// Starting marketplace fee, in basis points out of 1000 (25 = 2.5%).
    #[serde(default = "default_fee_basis_points")]
    pub fee_basis_points: u64,

    /// Upper bound the privileged owner can raise the fee to (100 = 10%).
    #[serde(default = "default_max_fee_basis_points")]
    pub max_fee_basis_points: u64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            mint_price: default_mint_price(),
            breeding_cooldown_ordinals: default_breeding_cooldown(),
            evolution_threshold: default_evolution_threshold(),
            max_evolution_stage: default_max_evolution_stage(),
            listing_duration_ordinals: default_listing_duration(),
            min_listing_price: default_min_listing_price(),
            fee_basis_points: default_fee_basis_points(),
            max_fee_basis_points: default_max_fee_basis_points(),
        }
    }
}

impl ProtocolConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

const fn default_mint_price() -> u128 {
    100_000_000
}

const fn default_breeding_cooldown() -> u64 {
    144
}

const fn default_evolution_threshold() -> u64 {
    100
}

const fn default_max_evolution_stage() -> u32 {
    4
}

const fn default_listing_duration() -> u64 {
    1440
}

const fn default_min_listing_price() -> u128 {
    1_000_000
}

const fn default_fee_basis_points() -> u64 {
    25
}

const fn default_max_fee_basis_points() -> u64 {
    100
}
