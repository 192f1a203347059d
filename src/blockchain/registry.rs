use std::collections::HashMap;
use std::sync::Arc;

use crate::blockchain::{connect, parse_signer, ChainClient};
use crate::config::{NetworkInfo, Settings};
use crate::error::AppError;

/// Per-chain clients, built once at startup and selected by explicit chain id.
#[derive(Clone, Default)]
pub struct ChainClients {
    clients: HashMap<u64, Arc<dyn ChainClient>>,
}

impl ChainClients {
    /// Connect every chain in the network map that has an `RPC_URL_<chainId>`.
    /// Chains without one stay unavailable and fail with `WalletInitError` on use.
    pub fn from_settings(settings: &Settings, network: &NetworkInfo) -> Result<Self, AppError> {
        let signer = settings
            .wallet
            .private_key
            .as_deref()
            .map(parse_signer)
            .transpose()?;

        let mut clients = HashMap::new();
        for chain_id in network.chain_ids() {
            let Some(rpc_url) = settings.network.rpc_urls.get(&chain_id) else {
                tracing::warn!(chain_id, "No RPC URL configured, chain unavailable");
                continue;
            };

            let client = connect(chain_id, rpc_url, signer.clone(), settings.network.read_retries)?;
            clients.insert(chain_id, client);
        }

        Ok(Self { clients })
    }

    pub fn from_clients(clients: impl IntoIterator<Item = Arc<dyn ChainClient>>) -> Self {
        Self {
            clients: clients
                .into_iter()
                .map(|client| (client.chain_id(), client))
                .collect(),
        }
    }

    pub fn get(&self, chain_id: u64) -> Result<Arc<dyn ChainClient>, AppError> {
        self.clients.get(&chain_id).cloned().ok_or_else(|| {
            AppError::WalletInitError(format!("RPC_URL_{} is not set", chain_id))
        })
    }

    pub fn chain_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.clients.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::MockChainClient;
    use std::collections::BTreeMap;

    fn network() -> NetworkInfo {
        NetworkInfo::from_json(
            r#"{
                "1": { "DEPOSITOR_ADDRESS": "0x5FbDB2315678afecb367f032d93F642f64180aa3" },
                "137": { "DEPOSITOR_ADDRESS": "0x5FbDB2315678afecb367f032d93F642f64180aa3" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_chain_without_rpc_url_is_wallet_init_error() {
        let mut settings = Settings::default();
        settings.network.rpc_urls = BTreeMap::from([(1, "http://127.0.0.1:8545".to_string())]);

        let clients = ChainClients::from_settings(&settings, &network()).unwrap();

        assert_eq!(clients.chain_ids(), vec![1]);
        assert!(clients.get(1).is_ok());
        assert!(matches!(clients.get(137), Err(AppError::WalletInitError(_))));
    }

    #[test]
    fn test_malformed_private_key_fails_startup() {
        let mut settings = Settings::default();
        settings.wallet.private_key = Some("not-a-key".to_string());

        let result = ChainClients::from_settings(&settings, &network());
        assert!(matches!(result, Err(AppError::WalletInitError(_))));
    }

    #[test]
    fn test_from_clients_keys_by_chain_id() {
        let clients = ChainClients::from_clients([
            Arc::new(MockChainClient::new(137)) as Arc<dyn ChainClient>,
            Arc::new(MockChainClient::new(1)) as Arc<dyn ChainClient>,
        ]);

        assert_eq!(clients.chain_ids(), vec![1, 137]);
        assert_eq!(clients.get(137).unwrap().chain_id(), 137);
    }
}
