//! Dashboard query parameters.

use chrono::NaiveDate;

/// Truncation granularity for time-bucketed panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    /// Calendar day.
    Day,
    /// Calendar week, Monday start.
    #[default]
    Week,
    /// Calendar month.
    Month,
}

impl Timeframe {
    /// Parse a user-supplied timeframe string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    /// Canonical name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// `ClickHouse` expression truncating a `Date` column to the period start.
    pub fn trunc_expr(&self, col: &str) -> String {
        match self {
            Self::Day => col.to_owned(),
            Self::Week => format!("toMonday({col})"),
            Self::Month => format!("toStartOfMonth({col})"),
        }
    }
}

/// Parameter tuple shared by every panel query. Hashable so it can key the
/// per-panel memoization cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryParams {
    /// Truncation granularity.
    pub timeframe: Timeframe,
    /// First day included (UTC).
    pub start: NaiveDate,
    /// Last day included (UTC).
    pub end: NaiveDate,
}

impl QueryParams {
    /// Create a parameter tuple. `start <= end` is the caller's contract and
    /// is validated at the API boundary.
    pub const fn new(timeframe: Timeframe, start: NaiveDate, end: NaiveDate) -> Self {
        Self { timeframe, start, end }
    }

    /// Default start of the dashboard range (bridge launch era).
    pub fn default_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 2, 26).expect("valid date")
    }

    /// Default end of the dashboard range.
    pub fn default_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 31).expect("valid date")
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::new(Timeframe::default(), Self::default_start(), Self::default_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_timeframes() {
        assert_eq!(Timeframe::parse("day"), Some(Timeframe::Day));
        assert_eq!(Timeframe::parse("Week"), Some(Timeframe::Week));
        assert_eq!(Timeframe::parse("MONTH"), Some(Timeframe::Month));
        assert_eq!(Timeframe::parse("year"), None);
    }

    #[test]
    fn trunc_expr_per_timeframe() {
        assert_eq!(Timeframe::Day.trunc_expr("day"), "day");
        assert_eq!(Timeframe::Week.trunc_expr("day"), "toMonday(day)");
        assert_eq!(Timeframe::Month.trunc_expr("day"), "toStartOfMonth(day)");
    }

    #[test]
    fn identical_params_hash_equal() {
        use std::collections::HashMap;
        let a = QueryParams::default();
        let b = QueryParams::default();
        let mut map = HashMap::new();
        map.insert(a, 1);
        assert_eq!(map.get(&b), Some(&1));
    }
}
