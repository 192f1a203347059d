use alloy::primitives::U256;
use std::sync::Arc;
use tracing::{debug, info};

use crate::blockchain::ChainClients;
use crate::config::NetworkInfo;
use crate::error::AppError;
use crate::models::DepositedQuery;
use crate::utils::format_base_units;

/// Read-only views over the depositor contracts.
pub struct DepositedService {
    network: Arc<NetworkInfo>,
    clients: Arc<ChainClients>,
    value_decimals: u8,
}

impl DepositedService {
    pub fn new(network: Arc<NetworkInfo>, clients: Arc<ChainClients>, value_decimals: u8) -> Self {
        Self {
            network,
            clients,
            value_decimals,
        }
    }

    pub async fn get_deposited(&self, query: &DepositedQuery) -> Result<String, AppError> {
        if query.is_value {
            self.get_deposited_value(query.chain_id, &query.token_symbol).await
        } else {
            self.get_deposited_amount(query.chain_id, &query.token_symbol).await
        }
    }

    /// Deposited token balance, in token units.
    pub async fn get_deposited_amount(&self, chain_id: u64, token_symbol: &str) -> Result<String, AppError> {
        let depositor = self.network.depositor_address(chain_id)?;
        let token = self.network.token(chain_id, token_symbol)?;
        let client = self.clients.get(chain_id)?;

        let amount = client.deposited_amount(depositor, token.address).await?;
        debug!(chain_id, token = token_symbol, %amount, "Read deposited amount");

        Ok(format_base_units(amount, token.decimals))
    }

    pub async fn get_deposited_value(&self, chain_id: u64, token_symbol: &str) -> Result<String, AppError> {
        let depositor = self.network.depositor_address(chain_id)?;
        let token = self.network.token(chain_id, token_symbol)?;
        let client = self.clients.get(chain_id)?;

        let value = client.deposited_value(depositor, token.address).await?;
        debug!(chain_id, token = token_symbol, %value, "Read deposited value");

        Ok(format_base_units(value, self.value_decimals))
    }

    pub async fn get_total_deposited_value_on_chain(&self, chain_id: u64) -> Result<String, AppError> {
        let total = self.total_on_chain(chain_id).await?;
        Ok(format_base_units(total, self.value_decimals))
    }

    /// Sum of every configured chain's total, read one chain after another, so
    /// the figure is not a consistent snapshot across chains.
    pub async fn get_total_deposited_value_overall_chain(&self) -> Result<String, AppError> {
        let mut total = U256::ZERO;

        for chain_id in self.network.chain_ids() {
            let chain_total = self.total_on_chain(chain_id).await?;
            total = total.checked_add(chain_total).ok_or_else(|| {
                AppError::InternalError("total deposited value overflows uint256".to_string())
            })?;
        }

        info!(total = %total, "Aggregated deposited value across chains");
        Ok(format_base_units(total, self.value_decimals))
    }

    async fn total_on_chain(&self, chain_id: u64) -> Result<U256, AppError> {
        let depositor = self.network.depositor_address(chain_id)?;
        let client = self.clients.get(chain_id)?;

        let total = client.total_deposited_value(depositor).await?;
        debug!(chain_id, %total, "Read total deposited value");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{ChainClient, MockChainClient, RecordedCall};
    use crate::services::test_support::{network, HOME_CHAIN, SIDE_CHAIN};

    fn service(mocks: Vec<Arc<MockChainClient>>) -> DepositedService {
        let clients = ChainClients::from_clients(
            mocks.into_iter().map(|mock| mock as Arc<dyn ChainClient>),
        );
        DepositedService::new(Arc::new(network()), Arc::new(clients), 18)
    }

    #[tokio::test]
    async fn test_is_value_selects_distinct_calls() {
        let mock = Arc::new(MockChainClient::new(HOME_CHAIN).with_read_value(U256::from(2_500_000u64)));
        let service = service(vec![mock.clone()]);

        let amount = service
            .get_deposited(&DepositedQuery {
                chain_id: HOME_CHAIN,
                token_symbol: "USDC".to_string(),
                is_value: false,
            })
            .await
            .unwrap();
        service
            .get_deposited(&DepositedQuery {
                chain_id: HOME_CHAIN,
                token_symbol: "USDC".to_string(),
                is_value: true,
            })
            .await
            .unwrap();

        assert_eq!(amount, "2.5");
        let calls = mock.calls();
        assert!(matches!(calls[0], RecordedCall::DepositedAmount { .. }));
        assert!(matches!(calls[1], RecordedCall::DepositedValue { .. }));
        assert_eq!(mock.write_count(), 0);
    }

    #[tokio::test]
    async fn test_total_overall_chain_sums_every_chain() {
        let one = U256::from(10u64).pow(U256::from(18u64));
        let home = Arc::new(MockChainClient::new(HOME_CHAIN).with_read_value(one * U256::from(3u64)));
        let side = Arc::new(MockChainClient::new(SIDE_CHAIN).with_read_value(one / U256::from(2u64)));
        let service = service(vec![home.clone(), side.clone()]);

        let total = service.get_total_deposited_value_overall_chain().await.unwrap();

        assert_eq!(total, "3.5");
        assert_eq!(home.calls().len(), 1);
        assert_eq!(side.calls().len(), 1);
        assert_eq!(home.write_count() + side.write_count(), 0);
    }

    #[tokio::test]
    async fn test_total_overall_chain_fails_when_a_chain_is_unreachable() {
        let home = Arc::new(MockChainClient::new(HOME_CHAIN));
        let service = service(vec![home]);

        let result = service.get_total_deposited_value_overall_chain().await;

        assert!(matches!(result, Err(AppError::WalletInitError(_))));
    }

    #[tokio::test]
    async fn test_unknown_chain() {
        let service = service(vec![Arc::new(MockChainClient::new(HOME_CHAIN))]);

        let result = service.get_total_deposited_value_on_chain(1).await;

        assert!(matches!(result, Err(AppError::ConfigNotFound(_))));
    }
}
