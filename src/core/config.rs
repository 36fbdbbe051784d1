use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EtherscanConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TronscanConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SolscanConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_etherscan")]
    pub etherscan: EtherscanConfig,
    #[serde(default = "default_tronscan")]
    pub tronscan: TronscanConfig,
    #[serde(default = "default_solscan")]
    pub solscan: SolscanConfig,
    #[serde(default = "default_coingecko")]
    pub coingecko: CoinGeckoConfig,
}

fn default_etherscan() -> EtherscanConfig {
    EtherscanConfig {
        base_url: "https://api.etherscan.io".to_string(),
        api_key: None,
    }
}

fn default_tronscan() -> TronscanConfig {
    TronscanConfig {
        base_url: "https://apilist.tronscanapi.com".to_string(),
    }
}

fn default_solscan() -> SolscanConfig {
    SolscanConfig {
        base_url: "https://public-api.solscan.io".to_string(),
        api_key: None,
    }
}

fn default_coingecko() -> CoinGeckoConfig {
    CoinGeckoConfig {
        base_url: "https://api.coingecko.com".to_string(),
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            etherscan: default_etherscan(),
            tronscan: default_tronscan(),
            solscan: default_solscan(),
            coingecko: default_coingecko(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FontConfig {
    pub regular: PathBuf,
    pub bold: PathBuf,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            regular: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
            bold: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_lookups() -> usize {
    8
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub network_names: HashMap<String, String>,
    #[serde(default)]
    pub fonts: FontConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "cryptoalert", "wallet-groups")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
database_path: "/var/lib/cryptoalert/bot.db"
timeout_secs: 5
max_concurrent_lookups: 4
providers:
  etherscan:
    base_url: "http://example.com/etherscan"
    api_key: "ETH-KEY"
  solscan:
    base_url: "http://example.com/solscan"
network_names:
  ethereum_sepolia: "Sepolia"
fonts:
  regular: "/opt/fonts/Inter.ttf"
  bold: "/opt/fonts/Inter-Bold.ttf"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/cryptoalert/bot.db")
        );
        assert_eq!(config.lookup_timeout(), Duration::from_secs(5));
        assert_eq!(config.max_concurrent_lookups, 4);
        assert_eq!(
            config.providers.etherscan.base_url,
            "http://example.com/etherscan"
        );
        assert_eq!(config.providers.etherscan.api_key.as_deref(), Some("ETH-KEY"));
        assert_eq!(config.providers.solscan.base_url, "http://example.com/solscan");
        assert!(config.providers.solscan.api_key.is_none());
        assert_eq!(
            config.providers.tronscan.base_url,
            "https://apilist.tronscanapi.com"
        );
        assert_eq!(
            config.providers.coingecko.base_url,
            "https://api.coingecko.com"
        );
        assert_eq!(
            config.network_names.get("ethereum_sepolia").map(String::as_str),
            Some("Sepolia")
        );
        assert_eq!(config.fonts.bold, PathBuf::from("/opt/fonts/Inter-Bold.ttf"));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("database_path: bot.db\n").expect("Failed to deserialize");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_concurrent_lookups, 8);
        assert!(config.network_names.is_empty());
        assert!(config.providers.etherscan.api_key.is_none());
        assert_eq!(
            config.fonts.regular,
            PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")
        );
    }

    #[test]
    fn test_missing_database_path_is_rejected() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("timeout_secs: 3\n");
        assert!(result.is_err());
    }
}
