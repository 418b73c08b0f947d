//! # Authorization Configuration
//!
//! TTL window, typed-data domain, and admin capability. Read once at
//! process start and held immutable by the pipeline.

use crate::domain::canonical::TypedDomain;
use crate::domain::capability::AdminCapability;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use thiserror::Error;

/// Default freshness TTL: 5 minutes.
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Authorization subsystem configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Freshness window in milliseconds; also the replay record TTL.
    pub ttl_ms: u64,
    /// EIP-712 domain, fixed per deployment.
    pub domain: TypedDomain,
    /// Admin capability secret and feature flags.
    pub capability: AdminCapability,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            domain: TypedDomain {
                name: "MycelixMusic".to_string(),
                version: "1".to_string(),
                // Gnosis chain
                chain_id: 100,
                verifying_contract: Address::ZERO,
            },
            capability: AdminCapability::default(),
        }
    }
}

impl AuthConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_ms == 0 {
            return Err(ConfigError::InvalidTtl);
        }
        if self.domain.name.is_empty() {
            return Err(ConfigError::InvalidDomain("name cannot be empty".into()));
        }
        if self.domain.version.is_empty() {
            return Err(ConfigError::InvalidDomain("version cannot be empty".into()));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// TTL of zero would reject every request
    #[error("ttl_ms cannot be 0")]
    InvalidTtl,

    /// Typed-data domain is incomplete
    #[error("invalid typed-data domain: {0}")]
    InvalidDomain(String),

    /// Environment variable present but unparseable
    #[error("invalid environment value for {0}")]
    InvalidEnv(&'static str),
}
