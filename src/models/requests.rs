use bigdecimal::BigDecimal;

/// Typed inputs for the write invokers, produced by the query validators.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositRequest {
    pub chain_id: u64,
    pub token_symbol: String,
    /// Human units, e.g. `100` USDC.
    pub amount_in: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MintRequest {
    pub chain_id: u64,
    /// Human units of the minted asset.
    pub amount_out: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositedQuery {
    pub chain_id: u64,
    pub token_symbol: String,
    /// `true` reads the deposited value instead of the raw token amount.
    pub is_value: bool,
}
