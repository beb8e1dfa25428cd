//! Thin HTTP API over the bridge warehouse.
//!
//! Every endpoint maps to one [`warehouse::WarehouseReader`] method, with
//! results memoized per parameter tuple so repeated dashboard loads do not
//! re-run the aggregations.

mod cache;
pub mod helpers;
pub mod routes;
pub mod state;
pub mod validation;

pub use api_types::ErrorResponse;
pub use routes::router;
pub use state::{ApiState, DEFAULT_MAX_REQUESTS, DEFAULT_RATE_PERIOD};

use utoipa::OpenApi;

/// `OpenAPI` documentation structure
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        routes::panels::bridge_flows,
        routes::panels::bridge_volume,
        routes::panels::deposit_stats,
        routes::panels::deposit_distribution,
        routes::panels::depositor_growth,
        routes::panels::depositor_cohorts,
        routes::panels::total_depositors,
        routes::dashboard::dashboard_data
    ),
    components(
        schemas(
            validation::DashboardQuery,
            api_types::BridgeFlowsResponse,
            api_types::BridgeVolumeResponse,
            api_types::DepositStatsResponse,
            api_types::DepositDistributionResponse,
            api_types::DepositorGrowthResponse,
            api_types::DepositorCohortsResponse,
            api_types::TotalDepositorsResponse,
            api_types::DashboardDataResponse,
            api_types::HealthResponse,
            api_types::ErrorResponse,
            warehouse::BridgeFlowRow,
            warehouse::BridgeVolumeRow,
            warehouse::DepositStatsRow,
            warehouse::DepositBucketRow,
            warehouse::DepositorGrowthRow,
            warehouse::WalletCohortRow
        )
    ),
    tags(
        (name = "bridgescope", description = "Bridgescope API endpoints")
    )
)]
pub struct ApiDoc;
