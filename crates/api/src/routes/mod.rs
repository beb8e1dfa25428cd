//! API route definitions

pub mod dashboard;
pub mod panels;

use crate::{ApiDoc, state::ApiState};
use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dashboard::dashboard_data;
use panels::{
    bridge_flows, bridge_volume, deposit_distribution, deposit_stats, depositor_cohorts,
    depositor_growth, total_depositors,
};

/// Build the router with all API endpoints.
pub fn router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .route("/bridge-flows", get(bridge_flows))
        .route("/bridge-volume", get(bridge_volume))
        .route("/deposit-stats", get(deposit_stats))
        .route("/deposit-distribution", get(deposit_distribution))
        .route("/depositor-growth", get(depositor_growth))
        .route("/depositor-cohorts", get(depositor_cohorts))
        .route("/total-depositors", get(total_depositors))
        .route("/dashboard-data", get(dashboard_data));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .with_state(state)
}
