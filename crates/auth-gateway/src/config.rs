//! Gateway configuration from the environment.
//!
//! Everything has a default suitable for local development; production
//! deployments set the variables explicitly.

use auth_guard::{AuthConfig, ConfigError};
use shared_types::Address;

/// Full gateway configuration.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// HTTP bind port.
    pub port: u16,
    /// Authorization subsystem configuration.
    pub auth: AuthConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 3100,
            auth: AuthConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Variables: `PORT`, `AUTH_TTL_MS`, `EIP712_NAME`, `EIP712_VERSION`,
    /// `EIP712_CHAIN_ID`, `EIP712_VERIFYING_CONTRACT`, `ADMIN_API_KEY`,
    /// `UPLOADS_ENABLED`, `ADMIN_READS_ENABLED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidEnv("PORT"))?;
        }
        if let Ok(ttl) = std::env::var("AUTH_TTL_MS") {
            config.auth.ttl_ms = ttl
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("AUTH_TTL_MS"))?;
        }
        if let Ok(name) = std::env::var("EIP712_NAME") {
            config.auth.domain.name = name;
        }
        if let Ok(version) = std::env::var("EIP712_VERSION") {
            config.auth.domain.version = version;
        }
        if let Ok(chain_id) = std::env::var("EIP712_CHAIN_ID") {
            config.auth.domain.chain_id = chain_id
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("EIP712_CHAIN_ID"))?;
        }
        if let Ok(contract) = std::env::var("EIP712_VERIFYING_CONTRACT") {
            config.auth.domain.verifying_contract = contract
                .parse::<Address>()
                .map_err(|_| ConfigError::InvalidEnv("EIP712_VERIFYING_CONTRACT"))?;
        }
        if let Ok(key) = std::env::var("ADMIN_API_KEY") {
            config.auth.capability.admin_key = Some(key);
        }
        if let Ok(flag) = std::env::var("UPLOADS_ENABLED") {
            config.auth.capability.uploads_enabled = parse_bool(&flag, "UPLOADS_ENABLED")?;
        }
        if let Ok(flag) = std::env::var("ADMIN_READS_ENABLED") {
            config.auth.capability.admin_reads_enabled = parse_bool(&flag, "ADMIN_READS_ENABLED")?;
        }

        config.auth.validate()?;
        Ok(config)
    }
}

fn parse_bool(value: &str, var: &'static str) -> Result<bool, ConfigError> {
    match value {
        "1" | "true" | "TRUE" | "yes" => Ok(true),
        "0" | "false" | "FALSE" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidEnv(var)),
    }
}
