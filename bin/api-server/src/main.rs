//! API server binary

use std::{net::SocketAddr, time::Duration};

use clap::Parser;
use config::Opts;
use dotenvy::dotenv;
use tracing_subscriber::filter::EnvFilter;
use warehouse::WarehouseReader;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = WarehouseReader::new(
        opts.clickhouse.url,
        opts.clickhouse.db,
        opts.clickhouse.username,
        opts.clickhouse.password,
    )?;

    let addr: SocketAddr = format!("{}:{}", opts.api.host, opts.api.port).parse()?;
    server::run(
        addr,
        client,
        opts.api.origins(),
        opts.api.max_requests,
        Duration::from_secs(opts.api.rate_period_secs),
    )
    .await
}
