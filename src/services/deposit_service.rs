use alloy::primitives::TxHash;
use std::sync::Arc;
use tracing::info;

use crate::blockchain::{ChainClients, TxOptions};
use crate::config::NetworkInfo;
use crate::error::AppError;
use crate::models::DepositRequest;
use crate::utils::to_base_units;

/// Approve-then-deposit flow against a chain's depositor contract.
pub struct DepositService {
    network: Arc<NetworkInfo>,
    clients: Arc<ChainClients>,
    options: TxOptions,
}

impl DepositService {
    pub fn new(network: Arc<NetworkInfo>, clients: Arc<ChainClients>, options: TxOptions) -> Self {
        Self {
            network,
            clients,
            options,
        }
    }

    /// Submits two transactions (approve, deposit) and returns the confirmed
    /// deposit hash. Replaying the request spends again.
    pub async fn deposit(&self, request: &DepositRequest) -> Result<TxHash, AppError> {
        let depositor = self.network.depositor_address(request.chain_id)?;
        let token = self.network.token(request.chain_id, &request.token_symbol)?;
        let amount = to_base_units(&request.amount_in, token.decimals)?;
        let client = self.clients.get(request.chain_id)?;

        info!(
            chain_id = request.chain_id,
            token = %request.token_symbol,
            amount_in = %request.amount_in,
            amount_base_units = %amount,
            "Starting deposit"
        );

        let approve_tx = client.approve(token.address, depositor, amount).await?;
        info!(chain_id = request.chain_id, tx_hash = %approve_tx, "Depositor approved");

        let deposit_tx = client
            .deposit(depositor, token.address, amount, self.options)
            .await?;
        info!(chain_id = request.chain_id, tx_hash = %deposit_tx, "Deposit confirmed");

        Ok(deposit_tx)
    }
}
