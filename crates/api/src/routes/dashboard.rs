//! Aggregated endpoint backing the dashboard landing page.

use api_types::{DashboardDataResponse, ErrorResponse};
use axum::{
    Json,
    extract::{Query, State},
};
use tracing::warn;

use crate::{
    state::ApiState,
    validation::{DashboardQuery, resolve_params},
};

fn panel_ok<T>(panel: &str, result: eyre::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(panel, error = %e, "Dashboard panel failed to load");
            None
        }
    }
}

#[utoipa::path(
    get,
    path = "/dashboard-data",
    params(DashboardQuery),
    responses(
        (status = 200, description = "All dashboard panels in one payload", body = DashboardDataResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "bridgescope"
)]
/// Fetch every panel concurrently. A failing panel is returned as null
/// instead of failing the whole response
pub async fn dashboard_data(
    State(state): State<ApiState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardDataResponse>, ErrorResponse> {
    let params = resolve_params(&query)?;

    let (flows, volume, stats, distribution, growth, cohorts, total) = tokio::join!(
        state.bridge_flows(params),
        state.bridge_volume(params),
        state.deposit_stats(params),
        state.deposit_distribution(params),
        state.depositor_growth(params),
        state.depositor_cohorts(params),
        state.total_depositors(params),
    );

    Ok(Json(DashboardDataResponse {
        flows: panel_ok("bridge-flows", flows).map(|rows| (*rows).clone()),
        volume: panel_ok("bridge-volume", volume).map(|rows| (*rows).clone()),
        deposit_stats: panel_ok("deposit-stats", stats).and_then(|stats| *stats),
        deposit_distribution: panel_ok("deposit-distribution", distribution)
            .map(|rows| (*rows).clone()),
        depositor_growth: panel_ok("depositor-growth", growth).map(|rows| (*rows).clone()),
        depositor_cohorts: panel_ok("depositor-cohorts", cohorts).map(|rows| (*rows).clone()),
        total_depositors: panel_ok("total-depositors", total).and_then(|total| *total),
    }))
}
