use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::error::AppError;
use crate::utils::{parse_amount, to_base_units};

/// Parameters attached to payable depositor calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    /// Native currency attached, in wei.
    pub value: U256,
    pub gas_limit: u64,
}

impl TxOptions {
    /// `native_fee` is in whole native units, e.g. `"0.002"`.
    pub fn from_native_fee(native_fee: &str, gas_limit: u64) -> Result<Self, AppError> {
        let value = to_base_units(&parse_amount(native_fee)?, 18)?;
        Ok(Self { value, gas_limit })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceReading {
    pub answer: U256,
    pub decimals: u8,
}

/// One chain's provider plus optional signing wallet.
///
/// Write methods wait for the receipt and fail with `TransactionReverted` when
/// the receipt status is unsuccessful.
#[async_trait]
pub trait ChainClient: Send + Sync {
    fn chain_id(&self) -> u64;

    /// Address of the signing wallet.
    fn account(&self) -> Result<Address, AppError>;

    async fn block_number(&self) -> Result<u64, AppError>;

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash, AppError>;

    async fn deposit(
        &self,
        depositor: Address,
        token: Address,
        amount: U256,
        options: TxOptions,
    ) -> Result<TxHash, AppError>;

    async fn mint(&self, depositor: Address, amount_out: U256, options: TxOptions) -> Result<TxHash, AppError>;

    async fn deposited_amount(&self, depositor: Address, token: Address) -> Result<U256, AppError>;

    async fn deposited_value(&self, depositor: Address, token: Address) -> Result<U256, AppError>;

    async fn total_deposited_value(&self, depositor: Address) -> Result<U256, AppError>;

    async fn max_output(&self, minter: Address, account: Address) -> Result<U256, AppError>;

    async fn minted(&self, minter: Address, account: Address) -> Result<U256, AppError>;

    async fn health_factor(&self, minter: Address, account: Address) -> Result<U256, AppError>;

    async fn latest_price(&self, feed: Address) -> Result<PriceReading, AppError>;
}
