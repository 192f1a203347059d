use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("Configuration not found: {0}")]
    ConfigNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Wallet initialization failed: {0}")]
    WalletInitError(String),

    #[error("Chain RPC error: {0}")]
    ChainRpcError(String),

    #[error("Transaction reverted: {0}")]
    TransactionReverted(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConfigNotFound(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::ChainRpcError(_) | AppError::TransactionReverted(_) => StatusCode::BAD_GATEWAY,
            AppError::WalletInitError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Only provider/network failures are worth retrying; reverts are deterministic.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::ChainRpcError(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<alloy::contract::Error> for AppError {
    fn from(err: alloy::contract::Error) -> Self {
        classify_chain_error(&err.to_string())
    }
}

const REVERT_PATTERNS: &[&str] = &[
    "execution reverted",
    "revert",
    "insufficient allowance",
    "insufficient balance",
    "insufficient funds",
    "exceeds allowance",
    "exceeds balance",
];

/// Node error payloads only carry the revert reason as text, so classification
/// is done on the lowercased message.
pub fn classify_chain_error(message: &str) -> AppError {
    let lowered = message.to_lowercase();
    if REVERT_PATTERNS.iter().any(|pattern| lowered.contains(pattern)) {
        AppError::TransactionReverted(message.to_string())
    } else {
        AppError::ChainRpcError(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::ConfigNotFound("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::ChainRpcError("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::TransactionReverted("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::WalletInitError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_revert_classification() {
        let err = classify_chain_error("server returned an error response: execution reverted: ERC20: insufficient allowance");
        assert!(matches!(err, AppError::TransactionReverted(_)));

        let err = classify_chain_error("ERC20: transfer amount exceeds balance");
        assert!(matches!(err, AppError::TransactionReverted(_)));

        let err = classify_chain_error("error sending request for url (http://localhost:8545/)");
        assert!(matches!(err, AppError::ChainRpcError(_)));
        assert!(err.is_transient());
    }
}
