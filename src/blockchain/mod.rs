pub mod chain_client;
pub mod contracts;
pub mod evm_client;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod registry;

pub use chain_client::*;
pub use evm_client::{connect, parse_signer, EvmChainClient};
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockChainClient, RecordedCall};
pub use registry::ChainClients;
