pub mod blockchain;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use error::types::*;

use std::sync::Arc;

use crate::blockchain::{ChainClients, TxOptions};
use crate::config::{NetworkInfo, Settings};
use crate::services::{DepositService, DepositedService, MintService, MinterService, PriceService};

/// Shared, read-only state. Chain ids travel with each request; nothing here
/// tracks a "current" chain.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub network: Arc<NetworkInfo>,
    pub clients: Arc<ChainClients>,
    pub deposit_service: Arc<DepositService>,
    pub mint_service: Arc<MintService>,
    pub deposited_service: Arc<DepositedService>,
    pub minter_service: Arc<MinterService>,
    pub price_service: Arc<PriceService>,
}

impl AppState {
    pub fn new(settings: Settings, network: NetworkInfo, clients: ChainClients) -> Result<Self, AppError> {
        let home_chain_id = settings.network.home_chain_id;
        if !network.contains(home_chain_id) {
            return Err(AppError::ConfigNotFound(format!(
                "HOME_CHAIN_ID {} is not in the network map",
                home_chain_id
            )));
        }

        let options = TxOptions::from_native_fee(
            &settings.transaction.native_fee,
            settings.transaction.gas_limit,
        )?;
        let network = Arc::new(network);
        let clients = Arc::new(clients);

        Ok(Self {
            deposit_service: Arc::new(DepositService::new(network.clone(), clients.clone(), options)),
            mint_service: Arc::new(MintService::new(
                network.clone(),
                clients.clone(),
                options,
                settings.units.mint_decimals,
            )),
            deposited_service: Arc::new(DepositedService::new(
                network.clone(),
                clients.clone(),
                settings.units.value_decimals,
            )),
            minter_service: Arc::new(MinterService::new(
                network.clone(),
                clients.clone(),
                settings.units.clone(),
            )),
            price_service: Arc::new(PriceService::new(network.clone(), clients.clone())),
            settings: Arc::new(settings),
            network,
            clients,
        })
    }

    pub fn home_chain_id(&self) -> u64 {
        self.settings.network.home_chain_id
    }
}
