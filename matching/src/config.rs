//! Configuration for the match engine

use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Chain id reported in decryption challenges
    pub chain_id: u64,

    /// Session configuration
    pub session: SessionConfig,

    /// Simulated score configuration
    pub scores: ScoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "matching".to_string(),
            chain_id: 1,
            session: SessionConfig::default(),
            scores: ScoreConfig::default(),
        }
    }
}

/// Decryption session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Challenge validity window (days)
    pub duration_days: u32,

    /// Artificial decryption latency (milliseconds)
    pub decrypt_latency_ms: u64,

    /// Length of the generated session public key (bytes before hex)
    pub session_key_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_days: 30,
            decrypt_latency_ms: 1_500,
            session_key_bytes: 1_000,
        }
    }
}

/// Simulated score bounds used at proposal time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Exclusive upper bound for simulated distance
    pub max_distance: u32,

    /// Exclusive upper bound for simulated compatibility
    pub max_compatibility: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            max_distance: 1_000,
            max_compatibility: 100,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(chain_id) = std::env::var("AURA_CHAIN_ID") {
            config.chain_id = chain_id
                .parse()
                .map_err(|_| crate::Error::Config(format!("Bad AURA_CHAIN_ID: {}", chain_id)))?;
        }

        if let Ok(days) = std::env::var("AURA_DURATION_DAYS") {
            config.session.duration_days = days
                .parse()
                .map_err(|_| crate::Error::Config(format!("Bad AURA_DURATION_DAYS: {}", days)))?;
        }

        if let Ok(latency) = std::env::var("AURA_DECRYPT_LATENCY_MS") {
            config.session.decrypt_latency_ms = latency.parse().map_err(|_| {
                crate::Error::Config(format!("Bad AURA_DECRYPT_LATENCY_MS: {}", latency))
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_name, "matching");
        assert_eq!(config.session.duration_days, 30);
        assert_eq!(config.session.decrypt_latency_ms, 1_500);
        assert_eq!(config.scores.max_compatibility, 100);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            service_name = "matching"
            chain_id = 11155111

            [session]
            duration_days = 7
            decrypt_latency_ms = 0
            session_key_bytes = 32

            [scores]
            max_distance = 500
            max_compatibility = 100
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.chain_id, 11_155_111);
        assert_eq!(config.session.duration_days, 7);
        assert_eq!(config.scores.max_distance, 500);
    }
}
