use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::time::{timeout, Duration};

use crate::blockchain::ChainClient;
use crate::error::AppError;
use crate::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub home_chain_id: u64,
    pub chains: Vec<ChainStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChainStatus {
    pub chain_id: u64,
    pub connected: bool,
    pub block_number: Option<u64>,
    pub error: Option<String>,
}

/// Probes every configured chain; reports `degraded` if any is unreachable.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut chains = Vec::new();

    for chain_id in state.network.chain_ids() {
        chains.push(probe_chain(chain_id, state.clients.get(chain_id), PROBE_TIMEOUT).await);
    }

    let status = if chains.iter().all(|chain| chain.connected) {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        home_chain_id: state.home_chain_id(),
        chains,
    })
}

async fn probe_chain(
    chain_id: u64,
    client: Result<Arc<dyn ChainClient>, AppError>,
    limit: Duration,
) -> ChainStatus {
    let probe = match client {
        Ok(client) => match timeout(limit, client.block_number()).await {
            Ok(result) => result,
            Err(_) => Err(AppError::ChainRpcError(format!(
                "block number probe timed out after {}ms",
                limit.as_millis()
            ))),
        },
        Err(e) => Err(e),
    };

    match probe {
        Ok(block_number) => ChainStatus {
            chain_id,
            connected: true,
            block_number: Some(block_number),
            error: None,
        },
        Err(e) => {
            tracing::warn!(chain_id, error = %e, "Chain health probe failed");
            ChainStatus {
                chain_id,
                connected: false,
                block_number: None,
                error: Some(e.to_string()),
            }
        }
    }
}
