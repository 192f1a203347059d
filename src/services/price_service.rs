use std::sync::Arc;
use tracing::debug;

use crate::blockchain::ChainClients;
use crate::config::NetworkInfo;
use crate::error::AppError;
use crate::utils::format_base_units;

/// Token prices from the Chainlink-style feeds in the network map.
pub struct PriceService {
    network: Arc<NetworkInfo>,
    clients: Arc<ChainClients>,
}

impl PriceService {
    pub fn new(network: Arc<NetworkInfo>, clients: Arc<ChainClients>) -> Self {
        Self { network, clients }
    }

    pub async fn get_token_price(&self, chain_id: u64, token_symbol: &str) -> Result<String, AppError> {
        let token = self.network.token(chain_id, token_symbol)?;
        let feed = token.price_feed.ok_or_else(|| {
            AppError::ConfigNotFound(format!(
                "token {} has no price feed on chain {}",
                token_symbol, chain_id
            ))
        })?;
        let client = self.clients.get(chain_id)?;

        let reading = client.latest_price(feed).await?;
        debug!(chain_id, token = token_symbol, answer = %reading.answer, decimals = reading.decimals, "Read price feed");

        Ok(format_base_units(reading.answer, reading.decimals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{ChainClient, MockChainClient, RecordedCall};
    use crate::services::test_support::{network, HOME_CHAIN};
    use alloy::primitives::U256;

    fn service(mock: Arc<MockChainClient>) -> PriceService {
        PriceService::new(
            Arc::new(network()),
            Arc::new(ChainClients::from_clients([mock as Arc<dyn ChainClient>])),
        )
    }

    #[tokio::test]
    async fn test_price_is_scaled_by_feed_decimals() {
        let mock = Arc::new(MockChainClient::new(HOME_CHAIN).with_price(U256::from(99_985_000u64), 8));
        let feed = network().token(HOME_CHAIN, "USDC").unwrap().price_feed.unwrap();

        let price = service(mock.clone()).get_token_price(HOME_CHAIN, "USDC").await.unwrap();

        assert_eq!(price, "0.99985");
        assert_eq!(mock.calls(), vec![RecordedCall::LatestPrice { feed }]);
        assert_eq!(mock.write_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_symbol_or_missing_feed() {
        let mock = Arc::new(MockChainClient::new(HOME_CHAIN));
        let service = service(mock.clone());

        let unknown = service.get_token_price(HOME_CHAIN, "UNKNOWN").await;
        let no_feed = service.get_token_price(HOME_CHAIN, "WETH").await;

        assert!(matches!(unknown, Err(AppError::ConfigNotFound(_))));
        assert!(matches!(no_feed, Err(AppError::ConfigNotFound(_))));
        assert!(mock.calls().is_empty());
    }
}
