use config::Source;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub network: NetworkSettings,
    pub wallet: WalletSettings,
    pub transaction: TransactionSettings,
    pub units: UnitSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    pub network_info_path: String,
    /// Chain used by routes that do not take a `chainId`.
    pub home_chain_id: u64,
    pub rpc_urls: BTreeMap<u64, String>,
    pub read_retries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSettings {
    #[serde(skip_serializing)]
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSettings {
    /// Native currency attached to deposit and mint calls, in whole units (e.g. "0.002").
    pub native_fee: String,
    pub gas_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSettings {
    pub mint_decimals: u8,
    pub value_decimals: u8,
    pub health_factor_decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api: ApiSettings::default(),
            network: NetworkSettings::default(),
            wallet: WalletSettings::default(),
            transaction: TransactionSettings::default(),
            units: UnitSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        NetworkSettings {
            network_info_path: "config/network_info.json".to_string(),
            home_chain_id: 31337,
            rpc_urls: BTreeMap::new(),
            read_retries: 2,
        }
    }
}

impl Default for WalletSettings {
    fn default() -> Self {
        WalletSettings { private_key: None }
    }
}

impl Default for TransactionSettings {
    fn default() -> Self {
        TransactionSettings {
            native_fee: "0.002".to_string(),
            gas_limit: 1_000_000,
        }
    }
}

impl Default for UnitSettings {
    fn default() -> Self {
        UnitSettings {
            mint_decimals: 18,
            value_decimals: 18,
            health_factor_decimals: 18,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
        }
    }
}

const RPC_URL_PREFIX: &str = "rpc_url_";

impl Settings {
    /// Loads settings from the process environment (after `.env`, if present).
    pub fn new() -> Result<Self, ConfigError> {
        let source = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        Self::from_config(&source)
    }

    pub fn from_config(source: &config::Config) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let home_chain_id = source
            .get_string("home_chain_id")
            .map_err(|_| ConfigError::Missing("HOME_CHAIN_ID".to_string()))
            .and_then(|raw| parse_value("HOME_CHAIN_ID", &raw))?;

        Ok(Settings {
            api: ApiSettings {
                host: string_or(source, "api_host", defaults.api.host),
                port: parse_or(source, "api_port", defaults.api.port)?,
            },
            network: NetworkSettings {
                network_info_path: string_or(
                    source,
                    "network_info_path",
                    defaults.network.network_info_path,
                ),
                home_chain_id,
                rpc_urls: collect_rpc_urls(source)?,
                read_retries: parse_or(source, "rpc_read_retries", defaults.network.read_retries)?,
            },
            wallet: WalletSettings {
                private_key: source
                    .get_string("private_key")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
            },
            transaction: TransactionSettings {
                native_fee: string_or(source, "deposit_native_fee", defaults.transaction.native_fee),
                gas_limit: parse_or(source, "deposit_gas_limit", defaults.transaction.gas_limit)?,
            },
            units: UnitSettings {
                mint_decimals: parse_or(source, "mint_decimals", defaults.units.mint_decimals)?,
                value_decimals: parse_or(source, "value_decimals", defaults.units.value_decimals)?,
                health_factor_decimals: parse_or(
                    source,
                    "health_factor_decimals",
                    defaults.units.health_factor_decimals,
                )?,
            },
            logging: LoggingSettings {
                level: string_or(source, "log_level", defaults.logging.level),
            },
        })
    }
}

fn string_or(source: &config::Config, key: &str, default: String) -> String {
    source.get_string(key).unwrap_or(default)
}

fn parse_or<T: FromStr>(source: &config::Config, key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match source.get_string(key) {
        Ok(raw) => parse_value(&key.to_uppercase(), &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// `RPC_URL_<chainId>` entries, keyed by chain id.
fn collect_rpc_urls(source: &config::Config) -> Result<BTreeMap<u64, String>, ConfigError> {
    let mut urls = BTreeMap::new();

    for (key, value) in source.collect()? {
        let Some(suffix) = key.strip_prefix(RPC_URL_PREFIX) else {
            continue;
        };
        let chain_id: u64 = parse_value(&key.to_uppercase(), suffix)?;
        let url = value.into_string()?;
        if !url.trim().is_empty() {
            urls.insert(chain_id, url);
        }
    }

    Ok(urls)
}
