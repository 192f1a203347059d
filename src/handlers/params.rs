use serde::Deserialize;

use crate::error::AppError;
use crate::models::{DepositRequest, DepositedQuery, MintRequest};
use crate::utils::parse_amount;

// Query parameters arrive as raw strings so that missing and malformed values
// surface as `InvalidInput` with a JSON body instead of the extractor's plain-text rejection.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositParams {
    pub token_symbol: Option<String>,
    pub amount_in: Option<String>,
    pub chain_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintParams {
    pub chain_id: Option<String>,
    pub amount_out: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositedEachTokenParams {
    pub chain_id: Option<String>,
    pub token_symbol: Option<String>,
    pub is_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainParams {
    pub chain_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPriceParams {
    pub token_symbol: Option<String>,
    pub chain_id: Option<String>,
}

impl DepositParams {
    pub fn validate(&self, home_chain_id: u64) -> Result<DepositRequest, AppError> {
        Ok(DepositRequest {
            chain_id: chain_id_or(&self.chain_id, home_chain_id)?,
            token_symbol: required(&self.token_symbol, "tokenSymbol")?.to_string(),
            amount_in: parse_amount(required(&self.amount_in, "amountIn")?)?,
        })
    }
}

impl MintParams {
    pub fn validate(&self) -> Result<MintRequest, AppError> {
        Ok(MintRequest {
            chain_id: parse_chain_id(required(&self.chain_id, "chainId")?)?,
            amount_out: parse_amount(required(&self.amount_out, "amountOut")?)?,
        })
    }
}

impl DepositedEachTokenParams {
    pub fn validate(&self) -> Result<DepositedQuery, AppError> {
        Ok(DepositedQuery {
            chain_id: parse_chain_id(required(&self.chain_id, "chainId")?)?,
            token_symbol: required(&self.token_symbol, "tokenSymbol")?.to_string(),
            is_value: parse_flag(&self.is_value, "isValue")?,
        })
    }
}

impl ChainParams {
    pub fn required(&self) -> Result<u64, AppError> {
        parse_chain_id(required(&self.chain_id, "chainId")?)
    }

    pub fn or_home(&self, home_chain_id: u64) -> Result<u64, AppError> {
        chain_id_or(&self.chain_id, home_chain_id)
    }
}

impl TokenPriceParams {
    pub fn validate(&self, home_chain_id: u64) -> Result<(u64, String), AppError> {
        Ok((
            chain_id_or(&self.chain_id, home_chain_id)?,
            required(&self.token_symbol, "tokenSymbol")?.to_string(),
        ))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::InvalidInput(format!("missing query parameter '{}'", name)))
}

fn parse_chain_id(raw: &str) -> Result<u64, AppError> {
    raw.parse()
        .map_err(|_| AppError::InvalidInput(format!("chainId must be an unsigned integer, got '{}'", raw)))
}

fn chain_id_or(value: &Option<String>, default: u64) -> Result<u64, AppError> {
    match value.as_deref().map(str::trim).filter(|value| !value.is_empty()) {
        Some(raw) => parse_chain_id(raw),
        None => Ok(default),
    }
}

/// Absent means `false`; anything other than `true`/`false` is rejected.
fn parse_flag(value: &Option<String>, name: &str) -> Result<bool, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("{} must be 'true' or 'false', got '{}'", name, raw))),
    }
}
