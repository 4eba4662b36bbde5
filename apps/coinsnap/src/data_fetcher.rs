use coinsnap_cryptocompare::coinlist::{CoinList, CoinListParams};
use coinsnap_cryptocompare::histo::HistoParams;
use coinsnap_cryptocompare::price::{
    MAX_FSYMS_LEN, PriceMulti, PriceMultiParams, PriceMultiResponse, join_symbols,
};
use coinsnap_cryptocompare::toplist::{TopListParams, TopTotalVolFull, TopTotalVolFullResponse};
use coinsnap_cryptocompare::{CryptocompareClient, CryptocompareError, MalformedEntry};
use coinsnap_shared_models::{CoinInfo, Granularity};
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;

/// Image paths returned by the API are relative to this host.
pub const IMAGE_BASE_URL: &str = "https://www.cryptocompare.com";

/// Symbols per `pricemulti` call.
pub const PRICE_CHUNK_SYMBOLS: usize = 50;

/// One listed coin, or the entry that could not be read as one.
pub type Listed = Result<CoinInfo, MalformedEntry>;

pub fn coin_info(internal_symbol: &str, full_name: &str, image_path: &str) -> CoinInfo {
    CoinInfo {
        internal_symbol: internal_symbol.to_string(),
        full_name: full_name.to_string(),
        image_url: format!("{IMAGE_BASE_URL}{image_path}"),
    }
}

pub fn coins_from_toplist(response: TopTotalVolFullResponse) -> Vec<Listed> {
    response
        .coin_infos()
        .into_iter()
        .map(|info| info.map(|info| coin_info(&info.internal, &info.full_name, &info.image_url)))
        .collect()
}

pub async fn top_coins_by_volume(
    client: &CryptocompareClient,
    to_symbol: &str,
    limit: u32,
) -> Result<Vec<Listed>, CryptocompareError> {
    let response = client
        .call::<TopTotalVolFull>(
            TopListParams::builder()
                .limit(limit)
                .target_sym(to_symbol)
                .build(),
        )
        .await?;

    Ok(coins_from_toplist(response))
}

/// Splits symbols into `pricemulti` batches bounded both in count and in the
/// length of the joined `fsyms` value. A symbol that alone exceeds `max_len`
/// cannot be priced and is dropped.
pub fn price_chunks<'a>(symbols: &[&'a str], max_symbols: usize, max_len: usize) -> Vec<Vec<&'a str>> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut len = 0;

    for &symbol in symbols {
        if symbol.len() > max_len {
            tracing::warn!("Not pricing {}: symbol is longer than {} characters", symbol, max_len);
            continue;
        }

        let full = current.len() == max_symbols || len + 1 + symbol.len() > max_len;
        if !current.is_empty() && full {
            chunks.push(std::mem::take(&mut current));
            len = 0;
        }

        len += if current.is_empty() {
            symbol.len()
        } else {
            symbol.len() + 1
        };
        current.push(symbol);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Prices every chunk in turn. A chunk whose call fails is logged and left
/// out; the others still count.
pub async fn collect_prices<F, Fut, E>(
    chunks: Vec<Vec<&str>>,
    to_symbol: &str,
    price: F,
) -> Vec<(String, f64)>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<PriceMultiResponse, E>>,
    E: Display,
{
    let mut prices = Vec::new();
    for chunk in chunks {
        let count = chunk.len();
        match price(join_symbols(chunk)).await {
            Ok(response) => prices.extend(response.into_iter().filter_map(|(symbol, quotes)| {
                quotes.get(to_symbol).map(|price| (symbol, *price))
            })),
            Err(e) => tracing::warn!("Failed to price a batch of {} coins: {}", count, e),
        }
    }
    prices
}

/// The `limit` most expensive symbols, cheapest of them first.
pub fn highest_priced(mut prices: Vec<(String, f64)>, limit: usize) -> Vec<String> {
    prices.sort_by(|a, b| a.1.total_cmp(&b.1));
    let start = prices.len().saturating_sub(limit);
    prices.drain(start..).map(|(symbol, _)| symbol).collect()
}

/// Alternative selection: every listed coin is priced and the most expensive
/// ones are kept.
pub async fn top_coins_by_price(
    client: &CryptocompareClient,
    to_symbol: &str,
    limit: u32,
) -> Result<Vec<Listed>, CryptocompareError> {
    let mut coins = client.call::<CoinList>(CoinListParams::default()).await?;
    let symbols = coins.data.keys().cloned().collect::<Vec<_>>();
    let symbols = symbols.iter().map(String::as_str).collect::<Vec<_>>();
    let chunks = price_chunks(&symbols, PRICE_CHUNK_SYMBOLS, MAX_FSYMS_LEN);

    tracing::info!(
        "Getting cryptocurrency prices for {} coins in {} batches",
        symbols.len(),
        chunks.len()
    );

    let prices = collect_prices(chunks, to_symbol, |fsyms| {
        client.call::<PriceMulti>(PriceMultiParams::builder().fsyms(fsyms).tsyms(to_symbol).build())
    })
    .await;

    Ok(highest_priced(prices, limit as usize)
        .into_iter()
        .filter_map(|symbol| coins.take_entry(&symbol))
        .map(|entry| entry.map(|e| coin_info(&e.symbol, &e.full_name, &e.image_url)))
        .collect())
}

#[derive(Debug, Clone)]
pub struct SeriesQuery<'a> {
    pub from_symbol: &'a str,
    pub to_symbol: &'a str,
    /// Only reported; the API aggregates across exchanges.
    pub exchange: &'a str,
    pub granularity: Granularity,
    pub limit: u32,
    pub aggregate: u32,
}

impl SeriesQuery<'_> {
    pub fn params(&self) -> HistoParams {
        HistoParams::builder()
            .source_sym(self.from_symbol)
            .target_sym(self.to_symbol)
            .limit(self.limit)
            .aggregate(self.aggregate)
            .build()
    }
}

pub async fn fetch_series(
    client: &CryptocompareClient,
    query: SeriesQuery<'_>,
) -> Result<Value, CryptocompareError> {
    tracing::info!(
        "Downloading {} trading data for {} {} from {}",
        query.granularity,
        query.from_symbol,
        query.to_symbol,
        query.exchange
    );

    client.histo(query.granularity, query.params()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn image_path_is_made_absolute() {
        let coin = coin_info("BTC", "Bitcoin", "/media/37746251/btc.png");
        assert_eq!(
            coin.image_url,
            "https://www.cryptocompare.com/media/37746251/btc.png"
        );
    }

    #[test]
    fn toplist_keeps_ranking_order() {
        let response: TopTotalVolFullResponse = coinsnap_cryptocompare::decode(json!({
            "Message": "Success",
            "Type": 100,
            "Data": [
                { "CoinInfo": { "Internal": "BTC", "FullName": "Bitcoin", "ImageUrl": "/media/btc.png" } },
                { "CoinInfo": { "Internal": "ETH", "FullName": "Ethereum", "ImageUrl": "/media/eth.png" } },
                { "CoinInfo": { "Internal": "USDT", "FullName": "Tether", "ImageUrl": "/media/usdt.png" } }
            ]
        }))
        .unwrap();

        let coins = coins_from_toplist(response)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(
            coins.iter().map(|c| c.full_name.as_str()).collect::<Vec<_>>(),
            vec!["Bitcoin", "Ethereum", "Tether"]
        );
        assert_eq!(coins[1].internal_symbol, "ETH");
        assert_eq!(coins[1].image_url, "https://www.cryptocompare.com/media/eth.png");
    }

    #[test]
    fn coin_without_image_is_not_listed() {
        let response: TopTotalVolFullResponse = coinsnap_cryptocompare::decode(json!({
            "Data": [
                { "CoinInfo": { "Internal": "BTC", "FullName": "Bitcoin", "ImageUrl": "/media/btc.png" } },
                { "CoinInfo": { "Internal": "NEW", "FullName": "Newcoin" } },
                { "CoinInfo": { "Internal": "ODD", "FullName": null, "ImageUrl": "/media/odd.png" } }
            ]
        }))
        .unwrap();

        let listed = coins_from_toplist(response);

        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].as_ref().unwrap().internal_symbol, "BTC");
        assert_eq!(listed[1].as_ref().unwrap_err().label, "Newcoin");
        assert_eq!(listed[2].as_ref().unwrap_err().label, "ODD");
    }

    #[test]
    fn price_chunks_respect_count_limit() {
        let symbols = ["A", "B", "C", "D", "E"];
        let chunks = price_chunks(&symbols, 2, MAX_FSYMS_LEN);

        assert_eq!(chunks, vec![vec!["A", "B"], vec!["C", "D"], vec!["E"]]);
    }

    #[test]
    fn price_chunks_respect_length_limit() {
        let symbols = ["AAAA", "BBBB", "CCCC", "DD"];
        let chunks = price_chunks(&symbols, 50, 10);

        for chunk in &chunks {
            assert!(chunk.join(",").len() <= 10);
        }
        assert_eq!(chunks, vec![vec!["AAAA", "BBBB"], vec!["CCCC", "DD"]]);
        assert!(price_chunks(&[], 50, 10).is_empty());
    }

    #[test]
    fn overlong_symbol_is_dropped() {
        let symbols = ["AAAA", "TOOLONGSYMBOL", "BB"];
        let chunks = price_chunks(&symbols, 50, 10);

        assert_eq!(chunks, vec![vec!["AAAA", "BB"]]);
        assert!(price_chunks(&["TOOLONGSYMBOL"], 50, 10).is_empty());
    }

    #[tokio::test]
    async fn failed_price_batch_is_left_out() {
        let chunks = vec![vec!["BTC", "ETH"], vec!["BAD", "WORSE"], vec!["SOL"]];

        let prices = collect_prices(chunks, "USD", |fsyms| async move {
            if fsyms.contains("BAD") {
                return Err(CryptocompareError::Api("fsyms rejected".to_string()));
            }
            Ok(fsyms
                .split(',')
                .map(|symbol| {
                    let quotes = BTreeMap::from([("USD".to_string(), symbol.len() as f64)]);
                    (symbol.to_string(), quotes)
                })
                .collect::<PriceMultiResponse>())
        })
        .await;

        assert_eq!(
            prices,
            vec![
                ("BTC".to_string(), 3.0),
                ("ETH".to_string(), 3.0),
                ("SOL".to_string(), 3.0)
            ]
        );
    }

    #[tokio::test]
    async fn quotes_in_other_currencies_are_ignored() {
        let prices = collect_prices(vec![vec!["BTC"]], "EUR", |_| async {
            let quotes = BTreeMap::from([("USD".to_string(), 97000.0)]);
            Ok::<_, CryptocompareError>(PriceMultiResponse::from([("BTC".to_string(), quotes)]))
        })
        .await;

        assert!(prices.is_empty());
    }

    #[test]
    fn keeps_most_expensive_cheapest_first() {
        let prices = vec![
            ("BTC".to_string(), 97000.0),
            ("DOGE".to_string(), 0.3),
            ("ETH".to_string(), 3500.0),
            ("SOL".to_string(), 180.0),
        ];

        assert_eq!(highest_priced(prices.clone(), 2), vec!["ETH", "BTC"]);
        assert_eq!(highest_priced(prices, 10).len(), 4);
    }

    #[test]
    fn series_query_builds_histo_params() {
        let query = SeriesQuery {
            from_symbol: "BTC",
            to_symbol: "USD",
            exchange: "default",
            granularity: Granularity::Hour,
            limit: 400,
            aggregate: 1,
        };
        let client = CryptocompareClient::builder().build().unwrap();
        let request = client.histo_request(query.granularity, &query.params()).unwrap();

        assert_eq!(request.url().path(), "/data/histohour");
        assert_eq!(
            request.url().query(),
            Some("fsym=BTC&tsym=USD&limit=400&aggregate=1")
        );
    }
}
