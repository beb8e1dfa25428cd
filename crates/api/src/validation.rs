//! Validation for dashboard query parameters.

use api_types::ErrorResponse;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use warehouse::{QueryParams, Timeframe};

/// Query parameters accepted by every panel endpoint.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct DashboardQuery {
    /// Aggregation granularity: `day`, `week` or `month`. Defaults to `week`.
    pub timeframe: Option<String>,
    /// First day included, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// Last day included, `YYYY-MM-DD`.
    pub end: Option<String>,
}

fn invalid_params(detail: impl Into<String>) -> ErrorResponse {
    ErrorResponse::new("invalid-params", "Bad Request", StatusCode::BAD_REQUEST, detail)
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ErrorResponse> {
    value
        .parse::<NaiveDate>()
        .map_err(|e| invalid_params(format!("Invalid {field} date '{value}': {e}")))
}

/// Resolve raw query strings into a validated parameter tuple.
pub fn resolve_params(query: &DashboardQuery) -> Result<QueryParams, ErrorResponse> {
    let timeframe = match query.timeframe.as_deref() {
        Some(s) => Timeframe::parse(s).ok_or_else(|| {
            invalid_params(format!("Unknown timeframe '{s}', expected day, week or month"))
        })?,
        None => Timeframe::default(),
    };
    let start = match query.start.as_deref() {
        Some(s) => parse_date("start", s)?,
        None => QueryParams::default_start(),
    };
    let end = match query.end.as_deref() {
        Some(s) => parse_date("end", s)?,
        None => QueryParams::default_end(),
    };
    if start > end {
        return Err(invalid_params(format!("start {start} must not be after end {end}")));
    }
    Ok(QueryParams::new(timeframe, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_resolves_to_defaults() {
        let params = resolve_params(&DashboardQuery::default()).unwrap();
        assert_eq!(params, QueryParams::default());
    }

    #[test]
    fn explicit_values_are_parsed() {
        let query = DashboardQuery {
            timeframe: Some("month".to_owned()),
            start: Some("2024-01-01".to_owned()),
            end: Some("2024-06-30".to_owned()),
        };
        let params = resolve_params(&query).unwrap();
        assert_eq!(params.timeframe, Timeframe::Month);
        assert_eq!(params.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(params.end, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn unknown_timeframe_is_rejected() {
        let query = DashboardQuery { timeframe: Some("year".to_owned()), ..Default::default() };
        let err = resolve_params(&query).unwrap_err();
        assert_eq!(err.error_type, "invalid-params");
        assert!(err.detail.contains("year"));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let query = DashboardQuery { start: Some("01/01/2024".to_owned()), ..Default::default() };
        let err = resolve_params(&query).unwrap_err();
        assert_eq!(err.error_type, "invalid-params");
        assert!(err.detail.contains("start"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let query = DashboardQuery {
            start: Some("2024-06-30".to_owned()),
            end: Some("2024-01-01".to_owned()),
            ..Default::default()
        };
        let err = resolve_params(&query).unwrap_err();
        assert_eq!(err.error_type, "invalid-params");
        assert!(err.detail.contains("must not be after"));
    }
}
