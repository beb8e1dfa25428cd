//! Bridgescope configuration
use clap::Parser;
use url::Url;

/// Origins allowed to query the API when none are configured explicitly.
pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "https://bridgescope.xyz,https://www.bridgescope.xyz";

/// Clickhouse database configuration options
#[derive(Debug, Clone, Parser)]
pub struct ClickhouseOpts {
    /// Clickhouse URL
    #[clap(long, env = "CLICKHOUSE_URL")]
    pub url: Url,
    /// Clickhouse database
    #[clap(long, env = "CLICKHOUSE_DB")]
    pub db: String,
    /// Clickhouse username
    #[clap(long, env = "CLICKHOUSE_USERNAME")]
    pub username: String,
    /// Clickhouse password
    #[clap(long, env = "CLICKHOUSE_PASSWORD")]
    pub password: String,
}

/// API server configuration options
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// Host the API server binds to
    #[clap(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Port the API server binds to
    #[clap(long, env = "API_PORT", default_value = "3000")]
    pub port: u16,
    /// Comma-separated list of allowed CORS origins
    #[clap(long, env = "API_ALLOWED_ORIGINS", default_value = DEFAULT_ALLOWED_ORIGINS)]
    pub allowed_origins: String,
    /// Maximum number of requests per rate limiting period
    #[clap(long, env = "API_MAX_REQUESTS", default_value_t = u64::MAX)]
    pub max_requests: u64,
    /// Rate limiting period in seconds
    #[clap(long, env = "API_RATE_PERIOD_SECS", default_value = "1")]
    pub rate_period_secs: u64,
}

impl ApiOpts {
    /// Allowed CORS origins as a list.
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins.split(',').map(|s| s.trim().to_owned()).collect()
    }
}

/// CLI options for bridgescope
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Clickhouse database configuration
    #[clap(flatten)]
    pub clickhouse: ClickhouseOpts,

    /// API server configuration
    #[clap(flatten)]
    pub api: ApiOpts,
}

#[cfg(test)]
mod tests {
    use super::{ApiOpts, Opts};

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Opts::command().debug_assert()
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let opts = ApiOpts {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            allowed_origins: "https://a.example, https://b.example".to_owned(),
            max_requests: u64::MAX,
            rate_period_secs: 1,
        };
        assert_eq!(opts.origins(), vec!["https://a.example", "https://b.example"]);
    }
}
