//! Configuration for the chart service and server.

use poolchart_data::{EventSourceConfig, LedgerConfig};
use poolchart_history::densify::DensifyConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Native XLM asset contract on mainnet.
pub const NATIVE_XLM_CONTRACT: &str = "CAS3J7GYLGXMF6TDJBBYYSE3HQ6BBSMLNUQ34T6TZMYMW2EVH34XOWMA";
/// Circle USDC asset contract on mainnet.
pub const USDC_CONTRACT: &str = "CCW67TSZV3SSS2HXMBQ5JFGCKJNXKZM7UQUWUZPUTHXSTZLEO7SJMI75";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Assets a token may be priced against, tried in order.
    pub quote_assets: Vec<String>,
    /// Decimals used when the ledger does not know a token.
    pub default_token_decimals: u32,
    pub densify: DensifyConfig,
    pub event_source: EventSourceConfig,
    pub ledger: LedgerConfig,
    pub server: ServerConfig,
    pub log_level: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            quote_assets: vec![NATIVE_XLM_CONTRACT.to_string(), USDC_CONTRACT.to_string()],
            default_token_decimals: 7,
            densify: DensifyConfig::default(),
            event_source: EventSourceConfig::default(),
            ledger: LedgerConfig::default(),
            server: ServerConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ChartConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// # Errors
    /// Returns an error if `contents` is not valid configuration.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ChartConfig::from_toml_str("").unwrap(), ChartConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
quote_assets = ["CXLM"]
default_token_decimals = 9

[densify]
min_candles = 10

[event_source]
type = "ledger_indexed"
endpoint = "http://indexer:3000"

[ledger]
type = "in_memory"

[[ledger.pools]]
address = "CPOOL"
token_a = "CTOKEN"
token_b = "CXLM"
reserves = ["1000", "2000"]
native_side = "b"
"#
        )
        .unwrap();

        let config = ChartConfig::load(file.path()).unwrap();

        assert_eq!(config.quote_assets, vec!["CXLM".to_string()]);
        assert_eq!(config.default_token_decimals, 9);
        assert_eq!(config.densify.min_candles, 10);
        assert_eq!(config.densify.target_count, 50);
        assert_eq!(
            config.event_source,
            EventSourceConfig::LedgerIndexed {
                endpoint: "http://indexer:3000".to_string()
            }
        );
        match config.ledger {
            LedgerConfig::InMemory { pools } => assert_eq!(pools[0].address, "CPOOL"),
            other => panic!("unexpected ledger config {other:?}"),
        }
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_unknown_source_type_rejected() {
        let err = ChartConfig::from_toml_str("[event_source]\ntype = \"carrier_pigeon\"\n");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }
}
