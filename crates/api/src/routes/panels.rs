//! One endpoint per dashboard panel.

use api_types::{
    BridgeFlowsResponse, BridgeVolumeResponse, DepositDistributionResponse, DepositStatsResponse,
    DepositorCohortsResponse, DepositorGrowthResponse, ErrorResponse, TotalDepositorsResponse,
};
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    helpers::database_error,
    state::ApiState,
    validation::{DashboardQuery, resolve_params},
};

#[utoipa::path(
    get,
    path = "/bridge-flows",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Daily net flow and TVL per bridged token", body = BridgeFlowsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "bridgescope"
)]
/// Daily TVL per bridged token, with the bridge's share of total host-chain
/// stablecoin supply where known
pub async fn bridge_flows(
    State(state): State<ApiState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<BridgeFlowsResponse>, ErrorResponse> {
    let params = resolve_params(&query)?;
    let flows =
        state.bridge_flows(params).await.map_err(|e| database_error("get bridge flows", e))?;
    Ok(Json(BridgeFlowsResponse { flows: (*flows).clone() }))
}

#[utoipa::path(
    get,
    path = "/bridge-volume",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Deposit and withdrawal volume per period", body = BridgeVolumeResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "bridgescope"
)]
/// Deposit and withdrawal volume, user and event counts, bucketed by the
/// selected timeframe
pub async fn bridge_volume(
    State(state): State<ApiState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<BridgeVolumeResponse>, ErrorResponse> {
    let params = resolve_params(&query)?;
    let periods =
        state.bridge_volume(params).await.map_err(|e| database_error("get bridge volume", e))?;
    Ok(Json(BridgeVolumeResponse { periods: (*periods).clone() }))
}

#[utoipa::path(
    get,
    path = "/deposit-stats",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Average, median and count of deposits", body = DepositStatsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "bridgescope"
)]
/// Headline deposit statistics; `stats` is null when no deposits fall in range
pub async fn deposit_stats(
    State(state): State<ApiState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DepositStatsResponse>, ErrorResponse> {
    let params = resolve_params(&query)?;
    let stats =
        state.deposit_stats(params).await.map_err(|e| database_error("get deposit stats", e))?;
    Ok(Json(DepositStatsResponse { stats: *stats }))
}

#[utoipa::path(
    get,
    path = "/deposit-distribution",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Deposit counts per size bucket", body = DepositDistributionResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "bridgescope"
)]
/// Deposit counts per size bucket
pub async fn deposit_distribution(
    State(state): State<ApiState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DepositDistributionResponse>, ErrorResponse> {
    let params = resolve_params(&query)?;
    let buckets = state
        .deposit_distribution(params)
        .await
        .map_err(|e| database_error("get deposit distribution", e))?;
    Ok(Json(DepositDistributionResponse { buckets: (*buckets).clone() }))
}

#[utoipa::path(
    get,
    path = "/depositor-growth",
    params(DashboardQuery),
    responses(
        (status = 200, description = "New and cumulative depositors per day", body = DepositorGrowthResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "bridgescope"
)]
/// New depositors per first-deposit day with a running total
pub async fn depositor_growth(
    State(state): State<ApiState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DepositorGrowthResponse>, ErrorResponse> {
    let params = resolve_params(&query)?;
    let days = state
        .depositor_growth(params)
        .await
        .map_err(|e| database_error("get depositor growth", e))?;
    Ok(Json(DepositorGrowthResponse { days: (*days).clone() }))
}

#[utoipa::path(
    get,
    path = "/depositor-cohorts",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Recent depositor cohorts by wallet age", body = DepositorCohortsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "bridgescope"
)]
/// Wallets that first deposited in the trailing 30 days, split by whether
/// they existed on Arbitrum before bridging
pub async fn depositor_cohorts(
    State(state): State<ApiState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DepositorCohortsResponse>, ErrorResponse> {
    let params = resolve_params(&query)?;
    let cohorts = state
        .depositor_cohorts(params)
        .await
        .map_err(|e| database_error("get depositor cohorts", e))?;
    Ok(Json(DepositorCohortsResponse { cohorts: (*cohorts).clone() }))
}

#[utoipa::path(
    get,
    path = "/total-depositors",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Distinct depositor count over the range", body = TotalDepositorsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "bridgescope"
)]
/// Distinct depositing wallets over the selected range
pub async fn total_depositors(
    State(state): State<ApiState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<TotalDepositorsResponse>, ErrorResponse> {
    let params = resolve_params(&query)?;
    let total = state
        .total_depositors(params)
        .await
        .map_err(|e| database_error("get total depositors", e))?;
    Ok(Json(TotalDepositorsResponse { total_depositors: *total }))
}
