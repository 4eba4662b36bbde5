use clap::{Parser, ValueEnum};
use coinsnap_shared_models::Granularity;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Top coins by total trading volume
    Volume,
    /// Coins with the highest current price
    Price,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Snapshot historical cryptocurrency prices into a CSV file", long_about = None)]
pub struct Args {
    /// Quote currency every series is priced in
    #[arg(long, default_value = "USD")]
    pub to_symbol: String,

    /// Number of coins to snapshot
    #[arg(long, default_value_t = 100)]
    pub limit: u32,

    /// Bucket size of the series: minute, hour or day
    #[arg(long, default_value = "day")]
    pub interval: Granularity,

    /// Exchange label used in the output file name
    #[arg(long, default_value = "default")]
    pub exchange: String,

    /// Leading part of the output file name
    #[arg(long, default_value = "Cryptocurrencies_to")]
    pub prefix: String,

    /// Buckets requested per coin
    #[arg(long, default_value_t = coinsnap_cryptocompare::histo::DEFAULT_LIMIT)]
    pub histo_limit: u32,

    /// Buckets merged into one by the API
    #[arg(long, default_value_t = coinsnap_cryptocompare::histo::DEFAULT_AGGREGATE)]
    pub aggregate: u32,

    /// How the coins are chosen
    #[arg(long, value_enum, default_value_t = Selection::Volume)]
    pub selection: Selection,

    /// Drop buckets whose prices and volumes are all zero
    #[arg(long)]
    pub filter_empty: bool,

    /// Directory the CSV file is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Series requests kept in flight at once
    #[arg(long, default_value = "1")]
    pub concurrency: NonZeroUsize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, default_value = coinsnap_cryptocompare::BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "CRYPTOCOMPARE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
