//! Data types for the Bridgescope API.
//!
//! These structs define the JSON responses returned by the API server. They
//! are provided in a separate crate so that consumers such as the dashboard can
//! depend on them without pulling in the rest of the server implementation.

#![allow(missing_docs)]

use warehouse::{
    BridgeFlowRow, BridgeVolumeRow, DepositBucketRow, DepositStatsRow, DepositorGrowthRow,
    WalletCohortRow,
};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BridgeFlowsResponse {
    pub flows: Vec<BridgeFlowRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BridgeVolumeResponse {
    pub periods: Vec<BridgeVolumeRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositStatsResponse {
    pub stats: Option<DepositStatsRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositDistributionResponse {
    pub buckets: Vec<DepositBucketRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositorGrowthResponse {
    pub days: Vec<DepositorGrowthRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositorCohortsResponse {
    pub cohorts: Vec<WalletCohortRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TotalDepositorsResponse {
    pub total_depositors: Option<u64>,
}

/// Aggregated payload for the dashboard landing page. Panels that failed to
/// load are `None` so the rest of the page still renders.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardDataResponse {
    pub flows: Option<Vec<BridgeFlowRow>>,
    pub volume: Option<Vec<BridgeVolumeRow>>,
    pub deposit_stats: Option<DepositStatsRow>,
    pub deposit_distribution: Option<Vec<DepositBucketRow>>,
    pub depositor_growth: Option<Vec<DepositorGrowthRow>>,
    pub depositor_cohorts: Option<Vec<WalletCohortRow>>,
    pub total_depositors: Option<u64>,
}

/// RFC 7807 style problem document returned on any API error.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    #[serde(skip)]
    #[schema(ignore)]
    pub status: StatusCode,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(
        error_type: impl Into<String>,
        title: impl Into<String>,
        status: StatusCode,
        detail: impl Into<String>,
    ) -> Self {
        Self { error_type: error_type.into(), title: title.into(), status, detail: detail.into() }
    }

    /// Generic 500 for failures whose detail should not leak to clients.
    pub fn database_error() -> Self {
        Self::new(
            "database-error",
            "Internal Server Error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to query the database",
        )
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_serializes_problem_fields() {
        let err = ErrorResponse::new(
            "invalid-params",
            "Bad Request",
            StatusCode::BAD_REQUEST,
            "start must not be after end",
        );
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["type"], "invalid-params");
        assert_eq!(value["title"], "Bad Request");
        assert_eq!(value["detail"], "start must not be after end");
        assert!(value.get("status").is_none());
    }

    #[test]
    fn database_error_hides_detail() {
        let err = ErrorResponse::database_error();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type, "database-error");
        assert_eq!(err.detail, "Failed to query the database");
    }
}
