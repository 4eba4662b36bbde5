use crate::config::{Args, Selection};
use crate::data_fetcher::{
    Listed, SeriesQuery, fetch_series, top_coins_by_price, top_coins_by_volume,
};
use anyhow::Context;
use chrono::Local;
use coinsnap_cryptocompare::{CryptocompareClient, MalformedEntry};
use coinsnap_dataset::{Aggregator, NormalizeOptions, SnapshotName, write_snapshot};
use coinsnap_shared_models::CoinInfo;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Summary {
    pub path: PathBuf,
    pub rows: usize,
    pub coins: usize,
    pub skipped: Vec<String>,
}

enum Fetched<'a, E> {
    Series(&'a CoinInfo, Result<Value, E>),
    Unlisted(&'a MalformedEntry),
}

/// Fetches the series of every listed coin, at most `concurrency` at a time,
/// and feeds the results to `aggregator` in listing order.
pub async fn collect_series<'a, F, Fut, E>(
    listed: &'a [Listed],
    concurrency: usize,
    aggregator: &mut Aggregator,
    fetch: F,
) where
    F: Fn(&'a CoinInfo) -> Fut,
    Fut: Future<Output = Result<Value, E>>,
    E: Display,
{
    // `buffered` yields in input order, so rows keep the ranking order
    // whatever the concurrency.
    let mut fetches = std::pin::pin!(
        stream::iter(listed)
            .map(|entry| {
                let fetch = &fetch;
                async move {
                    match entry {
                        Ok(coin) => Fetched::Series(coin, fetch(coin).await),
                        Err(malformed) => Fetched::Unlisted(malformed),
                    }
                }
            })
            .buffered(concurrency)
    );

    let total = listed.len();
    let mut done = 0;
    while let Some(fetched) = fetches.next().await {
        done += 1;
        let outcome = match fetched {
            Fetched::Series(coin, result) => aggregator.record(coin, result),
            Fetched::Unlisted(malformed) => aggregator.record_malformed(malformed),
        };
        tracing::info!(?outcome, "[{}/{}]", done, total);
    }
}

pub async fn run(args: &Args) -> anyhow::Result<Summary> {
    let client = CryptocompareClient::builder()
        .base_url(args.base_url.as_str())
        .maybe_api_key(args.api_key.clone())
        .timeout(args.timeout())
        .build()
        .context("Failed to build CryptoCompare client")?;

    let listed = match args.selection {
        Selection::Volume => top_coins_by_volume(&client, &args.to_symbol, args.limit)
            .await
            .context("Failed to list top coins by volume")?,
        Selection::Price => top_coins_by_price(&client, &args.to_symbol, args.limit)
            .await
            .context("Failed to list top coins by price")?,
    };
    tracing::info!("Getting data about {} currencies", listed.len());

    let mut aggregator = Aggregator::new(NormalizeOptions {
        filter_empty: args.filter_empty,
    });

    let client = &client;
    collect_series(&listed, args.concurrency.get(), &mut aggregator, |coin| {
        fetch_series(
            client,
            SeriesQuery {
                from_symbol: &coin.internal_symbol,
                to_symbol: &args.to_symbol,
                exchange: &args.exchange,
                granularity: args.interval,
                limit: args.histo_limit,
                aggregate: args.aggregate,
            },
        )
    })
    .await;

    let (rows, skipped) = aggregator.into_parts();
    let interval = args.interval.to_string();
    let name = SnapshotName {
        prefix: &args.prefix,
        to_symbol: &args.to_symbol,
        exchange: &args.exchange,
        interval: &interval,
        date: Local::now().date_naive(),
    };

    let path = write_snapshot(&args.output_dir, &name, &rows).context("Failed to write snapshot")?;

    Ok(Summary {
        path,
        rows: rows.len(),
        coins: listed.len(),
        skipped,
    })
}
