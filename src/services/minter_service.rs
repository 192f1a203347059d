use alloy::primitives::{Address, U256};
use std::sync::Arc;
use tracing::debug;

use crate::blockchain::{ChainClient, ChainClients};
use crate::config::{NetworkInfo, UnitSettings};
use crate::error::AppError;
use crate::utils::format_base_units;

/// Position reads on a chain's minter contract for the service wallet.
pub struct MinterService {
    network: Arc<NetworkInfo>,
    clients: Arc<ChainClients>,
    units: UnitSettings,
}

impl MinterService {
    pub fn new(network: Arc<NetworkInfo>, clients: Arc<ChainClients>, units: UnitSettings) -> Self {
        Self {
            network,
            clients,
            units,
        }
    }

    pub async fn get_max_output(&self, chain_id: u64) -> Result<String, AppError> {
        let (minter, client, account) = self.resolve(chain_id)?;
        let max_output = client.max_output(minter, account).await?;
        debug!(chain_id, %account, %max_output, "Read max output");

        Ok(format_base_units(max_output, self.units.mint_decimals))
    }

    pub async fn get_minted(&self, chain_id: u64) -> Result<String, AppError> {
        let (minter, client, account) = self.resolve(chain_id)?;
        let minted = client.minted(minter, account).await?;
        debug!(chain_id, %account, %minted, "Read minted amount");

        Ok(format_base_units(minted, self.units.mint_decimals))
    }

    /// `None` when the contract reports `uint256.max`, i.e. there is no debt.
    pub async fn get_health_factor(&self, chain_id: u64) -> Result<Option<String>, AppError> {
        let (minter, client, account) = self.resolve(chain_id)?;
        let health_factor = client.health_factor(minter, account).await?;
        debug!(chain_id, %account, %health_factor, "Read health factor");

        if health_factor == U256::MAX {
            return Ok(None);
        }
        Ok(Some(format_base_units(health_factor, self.units.health_factor_decimals)))
    }

    fn resolve(&self, chain_id: u64) -> Result<(Address, Arc<dyn ChainClient>, Address), AppError> {
        let minter = self.network.minter_address(chain_id)?;
        let client = self.clients.get(chain_id)?;
        let account = client.account()?;
        Ok((minter, client, account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{MockChainClient, RecordedCall};
    use crate::services::test_support::{network, HOME_CHAIN, SIDE_CHAIN};

    fn service(mock: Arc<MockChainClient>) -> MinterService {
        MinterService::new(
            Arc::new(network()),
            Arc::new(ChainClients::from_clients([mock as Arc<dyn ChainClient>])),
            UnitSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_reads_use_wallet_account_and_never_write() {
        let mock = Arc::new(
            MockChainClient::new(HOME_CHAIN)
                .with_read_value(U256::from(1_250_000_000_000_000_000u128)),
        );
        let service = service(mock.clone());

        assert_eq!(service.get_max_output(HOME_CHAIN).await.unwrap(), "1.25");
        assert_eq!(service.get_minted(HOME_CHAIN).await.unwrap(), "1.25");
        assert_eq!(service.get_health_factor(HOME_CHAIN).await.unwrap().as_deref(), Some("1.25"));

        let account = mock.account().unwrap();
        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], RecordedCall::MaxOutput { account: a, .. } if a == account));
        assert!(matches!(calls[1], RecordedCall::Minted { .. }));
        assert!(matches!(calls[2], RecordedCall::HealthFactor { .. }));
        assert_eq!(mock.write_count(), 0);
    }

    #[tokio::test]
    async fn test_health_factor_without_debt_is_none() {
        let mock = Arc::new(MockChainClient::new(HOME_CHAIN).with_read_value(U256::MAX));

        assert_eq!(service(mock).get_health_factor(HOME_CHAIN).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_chain_without_minter() {
        let mock = Arc::new(MockChainClient::new(SIDE_CHAIN));

        let result = service(mock).get_minted(SIDE_CHAIN).await;

        assert!(matches!(result, Err(AppError::ConfigNotFound(_))));
    }

    #[tokio::test]
    async fn test_requires_wallet_account() {
        let mock = Arc::new(MockChainClient::new(HOME_CHAIN).without_account());

        let result = service(mock.clone()).get_minted(HOME_CHAIN).await;

        assert!(matches!(result, Err(AppError::WalletInitError(_))));
        assert!(mock.calls().is_empty());
    }
}
