//! `ClickHouse` reader for the dashboard panels.
//! Each method runs one fixed aggregation template against the warehouse.

use alloy_primitives::Address;
use chrono::{NaiveDate, TimeZone, Utc};
use clickhouse::{Client, Row};
use derive_more::Debug;
use eyre::{Context, Result};
use hex::encode;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, error};
use url::Url;

use crate::{
    models::{
        BridgeFlowRow, BridgeVolumeRow, DepositBucketRow, DepositStatsRow, DepositorGrowthRow,
        WalletCohortRow,
    },
    params::QueryParams,
};
use primitives::{BRIDGE_PAIRS, DepositSizeBucket, NULL_ADDRESS, STABLECOIN_CONTRACTS};

/// Transfer events table.
const TRANSFERS_TABLE: &str = "token_transfers";
/// Raw transaction table (first-activity lookups only).
const TRANSACTIONS_TABLE: &str = "transactions";

/// Days of history considered for the new-depositor cohort panel.
const COHORT_WINDOW_DAYS: u32 = 30;
/// Gap between first chain activity and first deposit below which a wallet
/// counts as created for bridging.
const DEPOSIT_WALLET_MAX_GAP_HOURS: u32 = 24;

/// `ClickHouse` reader client for the API (read-only operations)
#[derive(Clone, Debug)]
pub struct WarehouseReader {
    /// Base client
    #[debug(skip)]
    base: Client,
    /// Database name
    db_name: String,
}

fn addr_hex(addr: Address) -> String {
    encode(addr)
}

fn sql_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn date_from_ts(ts: u64) -> Option<NaiveDate> {
    Utc.timestamp_opt(ts as i64, 0).single().map(|dt| dt.date_naive())
}

impl WarehouseReader {
    /// Create a new warehouse reader client. The connection is lazy: auth and
    /// reachability problems surface on the first query.
    pub fn new(url: Url, db_name: String, username: String, password: String) -> Result<Self> {
        let client = Client::default().with_url(url).with_user(username).with_password(password);

        Ok(Self { base: client, db_name })
    }

    async fn execute<R>(&self, query: &str) -> Result<Vec<R>>
    where
        R: Row + for<'b> Deserialize<'b>,
    {
        let client = self.base.clone();
        let start = Instant::now();

        let result = client.query(query).fetch_all::<R>().await;

        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok(rows) => {
                debug!(query = %query, duration_ms, rows = rows.len(), "ClickHouse query executed")
            }
            Err(e) => error!(query = %query, duration_ms, error = %e, "ClickHouse query failed"),
        }
        result.map_err(Into::into)
    }

    /// Restrict `alias` rows to days within the requested range.
    fn date_filter(&self, alias: &str, params: &QueryParams) -> String {
        format!(
            "toDate(toDateTime({alias}.block_ts)) BETWEEN toDate('{start}') AND toDate('{end}')",
            start = sql_date(params.start),
            end = sql_date(params.end),
        )
    }

    /// Predicate matching deposits into either bridge contract, paired with
    /// the token each one accepts.
    fn deposit_filter(&self, alias: &str) -> String {
        let legs: Vec<String> = BRIDGE_PAIRS
            .iter()
            .map(|pair| {
                format!(
                    "({alias}.to_address = unhex('{bridge}') \
                      AND {alias}.contract_address = unhex('{token}'))",
                    bridge = addr_hex(pair.bridge_address),
                    token = addr_hex(pair.token_contract),
                )
            })
            .collect();
        format!("({})", legs.join(" OR "))
    }

    pub(super) fn bridge_flows_query(&self, params: &QueryParams) -> String {
        let legs: Vec<String> = BRIDGE_PAIRS
            .iter()
            .map(|pair| {
                format!(
                    "SELECT toDate(toDateTime(t.block_ts)) AS day, \
                            '{symbol}' AS token, \
                            sum(multiIf(t.to_address = unhex('{bridge}'), t.amount, \
                                        t.from_address = unhex('{bridge}'), -t.amount, 0)) AS net_deposit \
                     FROM {db}.{table} t \
                     WHERE (t.to_address = unhex('{bridge}') OR t.from_address = unhex('{bridge}')) \
                       AND t.contract_address = unhex('{token_contract}') \
                       AND {dates} \
                     GROUP BY day",
                    symbol = pair.symbol,
                    bridge = addr_hex(pair.bridge_address),
                    token_contract = addr_hex(pair.token_contract),
                    dates = self.date_filter("t", params),
                    db = self.db_name,
                    table = TRANSFERS_TABLE,
                )
            })
            .collect();

        let stables: Vec<String> = STABLECOIN_CONTRACTS
            .iter()
            .map(|addr| format!("unhex('{}')", addr_hex(*addr)))
            .collect();

        // LEFT JOIN misses materialize as the Date default (epoch), which the
        // outer select turns into NULL measures.
        format!(
            "WITH flows AS ({legs}), \
             tvl AS ( \
                 SELECT day, token, net_deposit, \
                        sum(net_deposit) OVER (PARTITION BY token ORDER BY day ASC) AS tvl \
                 FROM flows \
             ), \
             supply AS ( \
                 SELECT day, sum(running) AS total_supply \
                 FROM ( \
                     SELECT day, symbol, \
                            sum(net_mint) OVER (PARTITION BY symbol ORDER BY day ASC) AS running \
                     FROM ( \
                         SELECT toDate(toDateTime(t.block_ts)) AS day, \
                                t.symbol AS symbol, \
                                sum(multiIf(t.from_address = unhex('{zero}'), t.amount, \
                                            t.to_address = unhex('{zero}'), -t.amount, 0)) AS net_mint \
                         FROM {db}.{table} t \
                         WHERE t.contract_address IN ({stables}) \
                           AND {dates} \
                         GROUP BY day, symbol \
                     ) \
                 ) \
                 GROUP BY day \
             ) \
             SELECT toUInt64(toUnixTimestamp(toDateTime(f.day))) AS day, \
                    f.token AS token, \
                    f.net_deposit AS net_deposit, \
                    f.tvl AS tvl, \
                    if(s.day = toDate(0) OR s.total_supply = 0, NULL, s.total_supply) AS stablecoin_supply, \
                    if(s.day = toDate(0) OR s.total_supply = 0, NULL, 100 * f.tvl / s.total_supply) AS pct_of_stablecoin_supply \
             FROM tvl f \
             LEFT JOIN supply s ON f.day = s.day \
             ORDER BY day ASC, token ASC",
            legs = legs.join(" UNION ALL "),
            zero = addr_hex(NULL_ADDRESS),
            stables = stables.join(", "),
            dates = self.date_filter("t", params),
            db = self.db_name,
            table = TRANSFERS_TABLE,
        )
    }

    /// Daily TVL per token joined against total host-chain stablecoin supply.
    pub async fn get_bridge_flows(&self, params: QueryParams) -> Result<Vec<BridgeFlowRow>> {
        #[derive(Row, Deserialize)]
        struct RawRow {
            day: u64,
            token: String,
            net_deposit: f64,
            tvl: f64,
            stablecoin_supply: Option<f64>,
            pct_of_stablecoin_supply: Option<f64>,
        }

        let query = self.bridge_flows_query(&params);
        let rows = self.execute::<RawRow>(&query).await.context("fetching bridge flows failed")?;
        Ok(rows
            .into_iter()
            .filter_map(|r| {
                let day = date_from_ts(r.day)?;
                Some(BridgeFlowRow {
                    day,
                    token: r.token,
                    net_deposit: r.net_deposit,
                    tvl: r.tvl,
                    stablecoin_supply: r.stablecoin_supply,
                    pct_of_stablecoin_supply: r.pct_of_stablecoin_supply,
                })
            })
            .collect())
    }

    /// Deposit and withdrawal volume grouped by timeframe-truncated period
    /// and action type.
    pub async fn get_bridge_volume(&self, params: QueryParams) -> Result<Vec<BridgeVolumeRow>> {
        #[derive(Row, Deserialize)]
        struct RawRow {
            period: u64,
            action: String,
            users: u64,
            events: u64,
            volume: f64,
        }

        let legs: Vec<String> = BRIDGE_PAIRS
            .iter()
            .map(|pair| {
                format!(
                    "SELECT toDate(toDateTime(t.block_ts)) AS day, \
                            if(t.to_address = unhex('{bridge}'), 'Deposit', 'Withdrawal') AS action, \
                            t.tx_hash AS tx_hash, \
                            if(t.to_address = unhex('{bridge}'), t.from_address, t.to_address) AS user, \
                            t.amount AS amount \
                     FROM {db}.{table} t \
                     WHERE (t.to_address = unhex('{bridge}') OR t.from_address = unhex('{bridge}')) \
                       AND t.contract_address = unhex('{token_contract}') \
                       AND {dates}",
                    bridge = addr_hex(pair.bridge_address),
                    token_contract = addr_hex(pair.token_contract),
                    dates = self.date_filter("t", &params),
                    db = self.db_name,
                    table = TRANSFERS_TABLE,
                )
            })
            .collect();

        let query = format!(
            "SELECT toUInt64(toUnixTimestamp(toDateTime({trunc}))) AS period, \
                    action, \
                    toUInt64(count(DISTINCT user)) AS users, \
                    toUInt64(count(DISTINCT tx_hash)) AS events, \
                    sum(amount) AS volume \
             FROM ({legs}) \
             GROUP BY period, action \
             ORDER BY period ASC, action ASC",
            trunc = params.timeframe.trunc_expr("day"),
            legs = legs.join(" UNION ALL "),
        );

        let rows = self.execute::<RawRow>(&query).await.context("fetching bridge volume failed")?;
        Ok(rows
            .into_iter()
            .filter_map(|r| {
                let period = date_from_ts(r.period)?;
                Some(BridgeVolumeRow {
                    period,
                    action: r.action,
                    users: r.users,
                    events: r.events,
                    volume: r.volume,
                })
            })
            .collect())
    }

    /// Average, median and count over all deposits in range. `None` when the
    /// range holds no deposits.
    pub async fn get_deposit_stats(&self, params: QueryParams) -> Result<Option<DepositStatsRow>> {
        #[derive(Row, Deserialize)]
        struct RawRow {
            avg_amount: f64,
            median_amount: f64,
            total_deposits: u64,
        }

        let query = format!(
            "SELECT round(avg(t.amount)) AS avg_amount, \
                    round(median(t.amount)) AS median_amount, \
                    toUInt64(count()) AS total_deposits \
             FROM {db}.{table} t \
             WHERE {deposits} \
               AND {dates}",
            deposits = self.deposit_filter("t"),
            dates = self.date_filter("t", &params),
            db = self.db_name,
            table = TRANSFERS_TABLE,
        );

        let rows = self.execute::<RawRow>(&query).await.context("fetching deposit stats failed")?;
        let row = match rows.into_iter().next() {
            Some(r) => r,
            None => return Ok(None),
        };
        if row.total_deposits == 0 {
            return Ok(None);
        }
        Ok(Some(DepositStatsRow {
            avg_amount: row.avg_amount,
            median_amount: row.median_amount,
            total_deposits: row.total_deposits,
        }))
    }

    /// Deposit counts per size bucket, ordered by bucket label.
    pub async fn get_deposit_distribution(
        &self,
        params: QueryParams,
    ) -> Result<Vec<DepositBucketRow>> {
        #[derive(Row, Deserialize)]
        struct RawRow {
            bucket: String,
            deposits: u64,
        }

        let query = format!(
            "SELECT {case} AS bucket, \
                    toUInt64(count()) AS deposits \
             FROM {db}.{table} t \
             WHERE {deposits} \
               AND {dates} \
             GROUP BY bucket \
             ORDER BY bucket ASC",
            case = bucket_case_expr("t.amount"),
            deposits = self.deposit_filter("t"),
            dates = self.date_filter("t", &params),
            db = self.db_name,
            table = TRANSFERS_TABLE,
        );

        let rows =
            self.execute::<RawRow>(&query).await.context("fetching deposit distribution failed")?;
        Ok(rows
            .into_iter()
            .map(|r| DepositBucketRow { bucket: r.bucket, deposits: r.deposits })
            .collect())
    }

    /// New depositors per first-deposit day with a running total.
    pub async fn get_depositor_growth(
        &self,
        params: QueryParams,
    ) -> Result<Vec<DepositorGrowthRow>> {
        #[derive(Row, Deserialize)]
        struct RawRow {
            day: u64,
            new_depositors: u64,
            total_depositors: u64,
        }

        let query = format!(
            "SELECT toUInt64(toUnixTimestamp(toDateTime(day))) AS day, \
                    new_depositors, \
                    toUInt64(sum(new_depositors) OVER (ORDER BY day ASC)) AS total_depositors \
             FROM ( \
                 SELECT day, toUInt64(count()) AS new_depositors \
                 FROM ( \
                     SELECT t.from_address AS depositor, \
                            min(toDate(toDateTime(t.block_ts))) AS day \
                     FROM {db}.{table} t \
                     WHERE {deposits} \
                       AND {dates} \
                     GROUP BY depositor \
                 ) \
                 GROUP BY day \
             ) \
             ORDER BY day ASC",
            deposits = self.deposit_filter("t"),
            dates = self.date_filter("t", &params),
            db = self.db_name,
            table = TRANSFERS_TABLE,
        );

        let rows =
            self.execute::<RawRow>(&query).await.context("fetching depositor growth failed")?;
        Ok(rows
            .into_iter()
            .filter_map(|r| {
                let day = date_from_ts(r.day)?;
                Some(DepositorGrowthRow {
                    day,
                    new_depositors: r.new_depositors,
                    total_depositors: r.total_depositors,
                })
            })
            .collect())
    }

    /// Distinct depositor count over the range (headline KPI).
    pub async fn get_total_depositors(&self, params: QueryParams) -> Result<Option<u64>> {
        #[derive(Row, Deserialize)]
        struct RawRow {
            total_depositors: u64,
        }

        let query = format!(
            "SELECT toUInt64(count(DISTINCT t.from_address)) AS total_depositors \
             FROM {db}.{table} t \
             WHERE {deposits} \
               AND {dates}",
            deposits = self.deposit_filter("t"),
            dates = self.date_filter("t", &params),
            db = self.db_name,
            table = TRANSFERS_TABLE,
        );

        let rows =
            self.execute::<RawRow>(&query).await.context("fetching total depositors failed")?;
        Ok(rows.into_iter().next().map(|r| r.total_depositors))
    }

    pub(super) fn depositor_cohorts_query(&self, params: &QueryParams) -> String {
        format!(
            "WITH firsts AS ( \
                 SELECT t.from_address AS depositor, \
                        min(toDate(toDateTime(t.block_ts))) AS first_deposit_day, \
                        sum(t.amount) AS deposit_volume \
                 FROM {db}.{transfers} t \
                 WHERE {deposits} \
                   AND {dates} \
                 GROUP BY depositor \
                 HAVING first_deposit_day >= toDate('{end}') - {window} \
             ), \
             first_txs AS ( \
                 SELECT x.from_address AS sender, \
                        min(x.block_ts) AS first_tx_ts \
                 FROM {db}.{transactions} x \
                 WHERE x.from_address IN (SELECT depositor FROM firsts) \
                 GROUP BY sender \
             ) \
             SELECT if(abs(dateDiff('hour', toDateTime(x.first_tx_ts), toDateTime(f.first_deposit_day))) <= {max_gap}, \
                       'Deposit Wallet', 'Arbitrum User Wallet') AS wallet_type, \
                    toUInt64(count()) AS wallets, \
                    avg(f.deposit_volume) AS avg_deposit_volume, \
                    median(f.deposit_volume) AS median_deposit_volume \
             FROM firsts f \
             LEFT JOIN first_txs x ON f.depositor = x.sender \
             GROUP BY wallet_type \
             ORDER BY wallet_type ASC",
            deposits = self.deposit_filter("t"),
            dates = self.date_filter("t", params),
            end = sql_date(params.end),
            window = COHORT_WINDOW_DAYS,
            max_gap = DEPOSIT_WALLET_MAX_GAP_HOURS,
            db = self.db_name,
            transfers = TRANSFERS_TABLE,
            transactions = TRANSACTIONS_TABLE,
        )
    }

    /// Classify wallets that first deposited within the trailing cohort
    /// window by whether they existed on the chain before bridging. Wallets
    /// with no prior transaction record fall into the pre-existing class, as
    /// an unknown epoch-distant first activity.
    pub async fn get_depositor_cohorts(&self, params: QueryParams) -> Result<Vec<WalletCohortRow>> {
        #[derive(Row, Deserialize)]
        struct RawRow {
            wallet_type: String,
            wallets: u64,
            avg_deposit_volume: f64,
            median_deposit_volume: f64,
        }

        let query = self.depositor_cohorts_query(&params);
        let rows =
            self.execute::<RawRow>(&query).await.context("fetching depositor cohorts failed")?;
        Ok(rows
            .into_iter()
            .map(|r| WalletCohortRow {
                wallet_type: r.wallet_type,
                wallets: r.wallets,
                avg_deposit_volume: r.avg_deposit_volume,
                median_deposit_volume: r.median_deposit_volume,
            })
            .collect())
    }
}

/// `multiIf` expression classifying an amount column into size buckets.
fn bucket_case_expr(col: &str) -> String {
    let mut parts = Vec::new();
    for bucket in DepositSizeBucket::ALL {
        match bucket.upper_bound() {
            Some(limit) => parts.push(format!("{col} < {limit}, '{}'", bucket.label())),
            None => parts.push(format!("'{}'", bucket.label())),
        }
    }
    format!("multiIf({})", parts.join(", "))
}
