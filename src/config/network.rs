use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::config::ConfigError;
use crate::error::AppError;

/// Static per-chain contract map, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkInfo {
    chains: BTreeMap<u64, ChainNetwork>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainNetwork {
    #[serde(rename = "DEPOSITOR_ADDRESS")]
    pub depositor_address: Address,
    #[serde(rename = "MINTER_ADDRESS", default, skip_serializing_if = "Option::is_none")]
    pub minter_address: Option<Address>,
    #[serde(rename = "TOKEN", default)]
    pub tokens: HashMap<String, TokenInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: Address,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_feed: Option<Address>,
}

impl NetworkInfo {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::NetworkInfo(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let info: NetworkInfo = serde_json::from_str(raw)
            .map_err(|e| ConfigError::NetworkInfo(format!("malformed network map: {}", e)))?;

        if info.chains.is_empty() {
            return Err(ConfigError::NetworkInfo("network map defines no chains".to_string()));
        }

        Ok(info)
    }

    pub fn from_chains(chains: impl IntoIterator<Item = (u64, ChainNetwork)>) -> Self {
        Self {
            chains: chains.into_iter().collect(),
        }
    }

    pub fn chain(&self, chain_id: u64) -> Result<&ChainNetwork, AppError> {
        self.chains
            .get(&chain_id)
            .ok_or_else(|| AppError::ConfigNotFound(format!("chain {} is not configured", chain_id)))
    }

    pub fn depositor_address(&self, chain_id: u64) -> Result<Address, AppError> {
        Ok(self.chain(chain_id)?.depositor_address)
    }

    pub fn minter_address(&self, chain_id: u64) -> Result<Address, AppError> {
        self.chain(chain_id)?.minter_address.ok_or_else(|| {
            AppError::ConfigNotFound(format!("chain {} has no minter contract", chain_id))
        })
    }

    pub fn token(&self, chain_id: u64, symbol: &str) -> Result<&TokenInfo, AppError> {
        self.chain(chain_id)?.tokens.get(symbol).ok_or_else(|| {
            AppError::ConfigNotFound(format!("token {} is not configured on chain {}", symbol, chain_id))
        })
    }

    /// Chain ids in ascending order.
    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.chains.keys().copied()
    }

    pub fn contains(&self, chain_id: u64) -> bool {
        self.chains.contains_key(&chain_id)
    }
}
