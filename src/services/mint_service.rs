use alloy::primitives::TxHash;
use std::sync::Arc;
use tracing::info;

use crate::blockchain::{ChainClients, TxOptions};
use crate::config::NetworkInfo;
use crate::error::AppError;
use crate::models::MintRequest;
use crate::utils::to_base_units;

pub struct MintService {
    network: Arc<NetworkInfo>,
    clients: Arc<ChainClients>,
    options: TxOptions,
    mint_decimals: u8,
}

impl MintService {
    pub fn new(
        network: Arc<NetworkInfo>,
        clients: Arc<ChainClients>,
        options: TxOptions,
        mint_decimals: u8,
    ) -> Self {
        Self {
            network,
            clients,
            options,
            mint_decimals,
        }
    }

    /// Calls `mint(amountOut)` on the chain's depositor and waits for the receipt.
    pub async fn mint(&self, request: &MintRequest) -> Result<TxHash, AppError> {
        let depositor = self.network.depositor_address(request.chain_id)?;
        let amount_out = to_base_units(&request.amount_out, self.mint_decimals)?;
        let client = self.clients.get(request.chain_id)?;

        info!(
            chain_id = request.chain_id,
            amount_out = %request.amount_out,
            "Starting mint"
        );

        let tx_hash = client.mint(depositor, amount_out, self.options).await?;
        info!(chain_id = request.chain_id, tx_hash = %tx_hash, "Mint confirmed");

        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{ChainClient, MockChainClient, RecordedCall};
    use crate::services::test_support::{network, HOME_CHAIN};
    use alloy::primitives::U256;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn service(mock: Arc<MockChainClient>) -> MintService {
        MintService::new(
            Arc::new(network()),
            Arc::new(ChainClients::from_clients([mock as Arc<dyn ChainClient>])),
            TxOptions::from_native_fee("0.002", 1_000_000).unwrap(),
            18,
        )
    }

    #[tokio::test]
    async fn test_mint_converts_amount_out() {
        let mock = Arc::new(MockChainClient::new(HOME_CHAIN));
        let request = MintRequest {
            chain_id: HOME_CHAIN,
            amount_out: BigDecimal::from_str("2.5").unwrap(),
        };

        service(mock.clone()).mint(&request).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            RecordedCall::Mint { amount_out, options, .. } => {
                assert_eq!(*amount_out, U256::from(2_500_000_000_000_000_000u128));
                assert_eq!(options.gas_limit, 1_000_000);
            }
            other => panic!("expected mint, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mint_on_unconfigured_chain() {
        let mock = Arc::new(MockChainClient::new(HOME_CHAIN));
        let request = MintRequest {
            chain_id: 5,
            amount_out: BigDecimal::from(1),
        };

        let result = service(mock.clone()).mint(&request).await;

        assert!(matches!(result, Err(AppError::ConfigNotFound(_))));
        assert_eq!(mock.write_count(), 0);
    }
}
