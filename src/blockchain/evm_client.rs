use alloy::{
    network::{EthereumWallet, ReceiptResponse},
    primitives::{Address, TxHash, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use async_trait::async_trait;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use tokio::time::Duration;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use url::Url;

use crate::blockchain::contracts::{IAggregatorV3, IDepositor, IMinter, IERC20};
use crate::blockchain::{ChainClient, PriceReading, TxOptions};
use crate::error::AppError;

/// `ChainClient` backed by an alloy HTTP provider.
///
/// `P` is either a bare `RootProvider` (read-only) or a filler stack carrying
/// the signing wallet.
#[derive(Debug, Clone)]
pub struct EvmChainClient<P> {
    chain_id: u64,
    provider: P,
    signer: Option<Address>,
    read_retries: usize,
}

/// Build a client for one chain. Without a signer only view calls succeed.
pub fn connect(
    chain_id: u64,
    rpc_url: &str,
    signer: Option<PrivateKeySigner>,
    read_retries: usize,
) -> Result<Arc<dyn ChainClient>, AppError> {
    let url: Url = rpc_url.parse().map_err(|e| {
        AppError::WalletInitError(format!("Invalid RPC URL for chain {}: {}", chain_id, e))
    })?;

    match signer {
        Some(signer) => {
            let account = signer.address();
            let provider = ProviderBuilder::new()
                .with_recommended_fillers()
                .wallet(EthereumWallet::from(signer))
                .on_http(url);

            tracing::info!(chain_id, account = %account, "Signing client configured");
            Ok(Arc::new(EvmChainClient {
                chain_id,
                provider,
                signer: Some(account),
                read_retries,
            }))
        }
        None => {
            let provider: RootProvider<Http<Client>> = ProviderBuilder::new().on_http(url);

            tracing::warn!(chain_id, "No private key configured, client is read-only");
            Ok(Arc::new(EvmChainClient {
                chain_id,
                provider,
                signer: None,
                read_retries,
            }))
        }
    }
}

/// Parse the wallet secret, with or without the `0x` prefix.
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner, AppError> {
    PrivateKeySigner::from_str(private_key.trim())
        .map_err(|e| AppError::WalletInitError(format!("Invalid private key: {}", e)))
}

/// Runs `call` once plus up to `retries` more times while it fails with a
/// transient error. Anything else is returned after the first attempt.
pub(crate) async fn retry_read<T, F, Fut>(
    chain_id: u64,
    method: &'static str,
    retries: usize,
    mut call: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(retries);

    RetryIf::spawn(
        strategy,
        || {
            let pending = call();
            async move {
                pending.await.map_err(|err| {
                    tracing::warn!(chain_id, method, error = %err, "Contract read failed");
                    err
                })
            }
        },
        AppError::is_transient,
    )
    .await
}

impl<P> EvmChainClient<P>
where
    P: Provider<Http<Client>> + Clone + 'static,
{
    fn require_signer(&self) -> Result<Address, AppError> {
        self.signer.ok_or_else(|| {
            AppError::WalletInitError(format!(
                "PRIVATE_KEY is not set, chain {} is read-only",
                self.chain_id
            ))
        })
    }

    fn confirm(
        &self,
        method: &'static str,
        tx_hash: TxHash,
        receipt: Result<TransactionReceipt, impl std::fmt::Display>,
    ) -> Result<TxHash, AppError> {
        let receipt = receipt.map_err(|e| {
            AppError::ChainRpcError(format!("Failed to confirm {} ({}): {}", method, tx_hash, e))
        })?;

        if !receipt.status() {
            return Err(AppError::TransactionReverted(format!(
                "{} transaction {} reverted on chain {}",
                method, receipt.transaction_hash, self.chain_id
            )));
        }

        tracing::info!(
            chain_id = self.chain_id,
            method,
            tx_hash = %receipt.transaction_hash,
            block_number = ?receipt.block_number,
            "Transaction confirmed"
        );
        Ok(receipt.transaction_hash)
    }

    /// View call with retry on transient RPC failures.
    async fn read<T, F, Fut>(&self, method: &'static str, mut call: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, alloy::contract::Error>> + Send,
        T: Send,
    {
        retry_read(self.chain_id, method, self.read_retries, || {
            let pending = call();
            async move { pending.await.map_err(AppError::from) }
        })
        .await
    }

    fn token(&self, address: Address) -> IERC20::IERC20Instance<Http<Client>, P> {
        IERC20::new(address, self.provider.clone())
    }

    fn depositor(&self, address: Address) -> IDepositor::IDepositorInstance<Http<Client>, P> {
        IDepositor::new(address, self.provider.clone())
    }

    fn minter(&self, address: Address) -> IMinter::IMinterInstance<Http<Client>, P> {
        IMinter::new(address, self.provider.clone())
    }

    fn price_feed(&self, address: Address) -> IAggregatorV3::IAggregatorV3Instance<Http<Client>, P> {
        IAggregatorV3::new(address, self.provider.clone())
    }
}

#[async_trait]
impl<P> ChainClient for EvmChainClient<P>
where
    P: Provider<Http<Client>> + Clone + 'static,
{
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn account(&self) -> Result<Address, AppError> {
        self.require_signer()
    }

    async fn block_number(&self) -> Result<u64, AppError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| AppError::ChainRpcError(format!("Failed to get block number: {}", e)))
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash, AppError> {
        self.require_signer()?;
        let token = self.token(token);

        let call = token.approve(spender, amount);
        let pending = call.send().await.map_err(AppError::from)?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(chain_id = self.chain_id, tx_hash = %tx_hash, %spender, %amount, "approve submitted");

        self.confirm("approve", tx_hash, pending.get_receipt().await)
    }

    async fn deposit(
        &self,
        depositor: Address,
        token: Address,
        amount: U256,
        options: TxOptions,
    ) -> Result<TxHash, AppError> {
        self.require_signer()?;
        let depositor = self.depositor(depositor);

        let call = depositor
            .deposit(token, amount)
            .value(options.value)
            .gas(options.gas_limit.into());
        let pending = call.send().await.map_err(AppError::from)?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(chain_id = self.chain_id, tx_hash = %tx_hash, %token, %amount, "deposit submitted");

        self.confirm("deposit", tx_hash, pending.get_receipt().await)
    }

    async fn mint(&self, depositor: Address, amount_out: U256, options: TxOptions) -> Result<TxHash, AppError> {
        self.require_signer()?;
        let depositor = self.depositor(depositor);

        let call = depositor
            .mint(amount_out)
            .value(options.value)
            .gas(options.gas_limit.into());
        let pending = call.send().await.map_err(AppError::from)?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(chain_id = self.chain_id, tx_hash = %tx_hash, %amount_out, "mint submitted");

        self.confirm("mint", tx_hash, pending.get_receipt().await)
    }

    async fn deposited_amount(&self, depositor: Address, token: Address) -> Result<U256, AppError> {
        let depositor = self.depositor(depositor);
        self.read("getDepositedAmount", || {
            let depositor = depositor.clone();
            async move { depositor.getDepositedAmount(token).call().await.map(|r| r._0) }
        })
        .await
    }

    async fn deposited_value(&self, depositor: Address, token: Address) -> Result<U256, AppError> {
        let depositor = self.depositor(depositor);
        self.read("getDepositedValue", || {
            let depositor = depositor.clone();
            async move { depositor.getDepositedValue(token).call().await.map(|r| r._0) }
        })
        .await
    }

    async fn total_deposited_value(&self, depositor: Address) -> Result<U256, AppError> {
        let depositor = self.depositor(depositor);
        self.read("getTotalDepositedValue", || {
            let depositor = depositor.clone();
            async move { depositor.getTotalDepositedValue().call().await.map(|r| r._0) }
        })
        .await
    }

    async fn max_output(&self, minter: Address, account: Address) -> Result<U256, AppError> {
        let minter = self.minter(minter);
        self.read("getMaxOutput", || {
            let minter = minter.clone();
            async move { minter.getMaxOutput(account).call().await.map(|r| r._0) }
        })
        .await
    }

    async fn minted(&self, minter: Address, account: Address) -> Result<U256, AppError> {
        let minter = self.minter(minter);
        self.read("getMinted", || {
            let minter = minter.clone();
            async move { minter.getMinted(account).call().await.map(|r| r._0) }
        })
        .await
    }

    async fn health_factor(&self, minter: Address, account: Address) -> Result<U256, AppError> {
        let minter = self.minter(minter);
        self.read("getHealthFactor", || {
            let minter = minter.clone();
            async move { minter.getHealthFactor(account).call().await.map(|r| r._0) }
        })
        .await
    }

    async fn latest_price(&self, feed: Address) -> Result<PriceReading, AppError> {
        let feed = self.price_feed(feed);

        let decimals = self
            .read("decimals", || {
                let feed = feed.clone();
                async move { feed.decimals().call().await.map(|r| r._0) }
            })
            .await?;
        let answer = self
            .read("latestRoundData", || {
                let feed = feed.clone();
                async move { feed.latestRoundData().call().await.map(|r| r.answer) }
            })
            .await?;

        if !answer.is_positive() {
            return Err(AppError::ChainRpcError(format!(
                "Price feed returned non-positive answer {} on chain {}",
                answer, self.chain_id
            )));
        }

        Ok(PriceReading {
            answer: answer.into_raw(),
            decimals,
        })
    }
}
