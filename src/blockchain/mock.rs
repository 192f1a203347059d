// In-memory ChainClient used by the service and router tests.
use alloy::primitives::{keccak256, Address, TxHash, U256};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::blockchain::{ChainClient, PriceReading, TxOptions};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Approve { token: Address, spender: Address, amount: U256 },
    Deposit { depositor: Address, token: Address, amount: U256, options: TxOptions },
    Mint { depositor: Address, amount_out: U256, options: TxOptions },
    DepositedAmount { depositor: Address, token: Address },
    DepositedValue { depositor: Address, token: Address },
    TotalDepositedValue { depositor: Address },
    MaxOutput { minter: Address, account: Address },
    Minted { minter: Address, account: Address },
    HealthFactor { minter: Address, account: Address },
    LatestPrice { feed: Address },
}

impl RecordedCall {
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            RecordedCall::Approve { .. } | RecordedCall::Deposit { .. } | RecordedCall::Mint { .. }
        )
    }
}

/// Records every call and answers reads with a fixed value.
#[derive(Debug)]
pub struct MockChainClient {
    chain_id: u64,
    account: Option<Address>,
    read_value: U256,
    price: PriceReading,
    failure: Option<AppError>,
    block_delay: Option<Duration>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockChainClient {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            account: Some(Address::repeat_byte(0xAA)),
            read_value: U256::ZERO,
            price: PriceReading {
                answer: U256::from(100_000_000u64),
                decimals: 8,
            },
            failure: None,
            block_delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_read_value(mut self, value: U256) -> Self {
        self.read_value = value;
        self
    }

    pub fn with_price(mut self, answer: U256, decimals: u8) -> Self {
        self.price = PriceReading { answer, decimals };
        self
    }

    pub fn without_account(mut self) -> Self {
        self.account = None;
        self
    }

    /// Every call records itself and then fails with `error`.
    pub fn failing_with(mut self, error: AppError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Makes `block_number` stall, standing in for an unresponsive node.
    pub fn with_block_delay(mut self, delay: Duration) -> Self {
        self.block_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.calls().iter().filter(|call| call.is_write()).count()
    }

    fn record(&self, call: RecordedCall) -> Result<usize, AppError> {
        let mut calls = self
            .calls
            .lock()
            .map_err(|_| AppError::InternalError("mock call log poisoned".to_string()))?;
        calls.push(call);
        let index = calls.len();
        drop(calls);

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(index),
        }
    }

    fn write(&self, call: RecordedCall) -> Result<TxHash, AppError> {
        if self.account.is_none() {
            return Err(AppError::WalletInitError("mock client has no signer".to_string()));
        }
        let index = self.record(call)?;
        Ok(keccak256(format!("{}:{}", self.chain_id, index)))
    }

    fn read(&self, call: RecordedCall) -> Result<U256, AppError> {
        self.record(call)?;
        Ok(self.read_value)
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn account(&self) -> Result<Address, AppError> {
        self.account
            .ok_or_else(|| AppError::WalletInitError("mock client has no signer".to_string()))
    }

    async fn block_number(&self) -> Result<u64, AppError> {
        if let Some(delay) = self.block_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(1),
        }
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash, AppError> {
        self.write(RecordedCall::Approve { token, spender, amount })
    }

    async fn deposit(
        &self,
        depositor: Address,
        token: Address,
        amount: U256,
        options: TxOptions,
    ) -> Result<TxHash, AppError> {
        self.write(RecordedCall::Deposit { depositor, token, amount, options })
    }

    async fn mint(&self, depositor: Address, amount_out: U256, options: TxOptions) -> Result<TxHash, AppError> {
        self.write(RecordedCall::Mint { depositor, amount_out, options })
    }

    async fn deposited_amount(&self, depositor: Address, token: Address) -> Result<U256, AppError> {
        self.read(RecordedCall::DepositedAmount { depositor, token })
    }

    async fn deposited_value(&self, depositor: Address, token: Address) -> Result<U256, AppError> {
        self.read(RecordedCall::DepositedValue { depositor, token })
    }

    async fn total_deposited_value(&self, depositor: Address) -> Result<U256, AppError> {
        self.read(RecordedCall::TotalDepositedValue { depositor })
    }

    async fn max_output(&self, minter: Address, account: Address) -> Result<U256, AppError> {
        self.read(RecordedCall::MaxOutput { minter, account })
    }

    async fn minted(&self, minter: Address, account: Address) -> Result<U256, AppError> {
        self.read(RecordedCall::Minted { minter, account })
    }

    async fn health_factor(&self, minter: Address, account: Address) -> Result<U256, AppError> {
        self.read(RecordedCall::HealthFactor { minter, account })
    }

    async fn latest_price(&self, feed: Address) -> Result<PriceReading, AppError> {
        self.record(RecordedCall::LatestPrice { feed })?;
        Ok(self.price)
    }
}
