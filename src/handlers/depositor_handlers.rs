use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use tracing::info;

use crate::error::AppError;
use crate::handlers::params::{
    ChainParams, DepositParams, DepositedEachTokenParams, MintParams, TokenPriceParams,
};
use crate::AppState;

pub async fn deposit(
    State(state): State<AppState>,
    Query(params): Query<DepositParams>,
) -> Result<Json<&'static str>, AppError> {
    let request = params.validate(state.home_chain_id())?;
    let tx_hash = state.deposit_service.deposit(&request).await?;

    info!(chain_id = request.chain_id, tx_hash = %tx_hash, "deposit request completed");
    Ok(Json("deposited"))
}

pub async fn mint(
    State(state): State<AppState>,
    Query(params): Query<MintParams>,
) -> Result<Json<&'static str>, AppError> {
    let request = params.validate()?;
    let tx_hash = state.mint_service.mint(&request).await?;

    info!(chain_id = request.chain_id, tx_hash = %tx_hash, "mint request completed");
    Ok(Json("minted"))
}

pub async fn get_deposited_each_token(
    State(state): State<AppState>,
    Query(params): Query<DepositedEachTokenParams>,
) -> Result<Json<String>, AppError> {
    let query = params.validate()?;
    let deposited = state.deposited_service.get_deposited(&query).await?;
    Ok(Json(deposited))
}

pub async fn get_total_deposited_on_chain(
    State(state): State<AppState>,
    Query(params): Query<ChainParams>,
) -> Result<Json<String>, AppError> {
    let chain_id = params.required()?;
    let total = state
        .deposited_service
        .get_total_deposited_value_on_chain(chain_id)
        .await?;
    Ok(Json(total))
}

pub async fn get_total_deposited_overall_chain(
    State(state): State<AppState>,
) -> Result<Json<String>, AppError> {
    let total = state
        .deposited_service
        .get_total_deposited_value_overall_chain()
        .await?;
    Ok(Json(total))
}

pub async fn get_max_output(
    State(state): State<AppState>,
    Query(params): Query<ChainParams>,
) -> Result<Json<String>, AppError> {
    let chain_id = params.or_home(state.home_chain_id())?;
    Ok(Json(state.minter_service.get_max_output(chain_id).await?))
}

pub async fn get_minted(
    State(state): State<AppState>,
    Query(params): Query<ChainParams>,
) -> Result<Json<String>, AppError> {
    let chain_id = params.or_home(state.home_chain_id())?;
    Ok(Json(state.minter_service.get_minted(chain_id).await?))
}

pub async fn get_health_factor(
    State(state): State<AppState>,
    Query(params): Query<ChainParams>,
) -> Result<Json<Option<String>>, AppError> {
    let chain_id = params.or_home(state.home_chain_id())?;
    Ok(Json(state.minter_service.get_health_factor(chain_id).await?))
}

pub async fn get_token_price(
    State(state): State<AppState>,
    Query(params): Query<TokenPriceParams>,
) -> Result<Json<String>, AppError> {
    let (chain_id, token_symbol) = params.validate(state.home_chain_id())?;
    let price = state
        .price_service
        .get_token_price(chain_id, &token_symbol)
        .await?;
    Ok(Json(price))
}

pub fn create_depositor_routes() -> Router<AppState> {
    Router::new()
        .route("/deposit", get(deposit))
        .route("/mint", get(mint))
        .route("/getDepositedEachToken", get(get_deposited_each_token))
        .route("/getTotalDepositedOnChain", get(get_total_deposited_on_chain))
        // Route name kept as published, including the spelling.
        .route("/getTotalDepositedOverralChain", get(get_total_deposited_overall_chain))
        .route("/getMaxOutput", get(get_max_output))
        .route("/getMinted", get(get_minted))
        .route("/getHealthFactor", get(get_health_factor))
        .route("/getTokenPrice", get(get_token_price))
}
