use crate::error::DatasetError;
use crate::row::Row;
use chrono::{DateTime, Utc};
use coinsnap_cryptocompare::histo::HistoPayload;
use coinsnap_shared_models::CoinInfo;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Drop buckets whose prices and volumes are all zero.
    pub filter_empty: bool,
}

pub fn to_datetime(unix_seconds: i64) -> Result<DateTime<Utc>, DatasetError> {
    DateTime::from_timestamp(unix_seconds, 0).ok_or(DatasetError::InvalidTimestamp(unix_seconds))
}

/// Turns one raw histo body into rows for `coin`, keeping bucket order.
pub fn normalize(body: Value, coin: &CoinInfo) -> Result<Vec<Row>, DatasetError> {
    let payload: HistoPayload =
        serde_json::from_value(body).map_err(|source| DatasetError::MalformedResponse {
            symbol: coin.internal_symbol.clone(),
            source,
        })?;

    payload
        .data
        .into_iter()
        .map(|bucket| -> Result<Row, DatasetError> {
            Ok(Row {
                datetime: to_datetime(bucket.time)?,
                low: bucket.low,
                high: bucket.high,
                open: bucket.open,
                close: bucket.close,
                volumefrom: bucket.volumefrom,
                volumeto: bucket.volumeto,
                cryptocurrency: coin.internal_symbol.clone(),
                image_url: coin.image_url.clone(),
                coin_name: coin.full_name.clone(),
            })
        })
        .collect()
}

/// Removes empty buckets in place and returns how many were dropped.
pub fn filter_empty_rows(rows: &mut Vec<Row>) -> usize {
    let before = rows.len();
    rows.retain(|row| !row.is_empty());
    let dropped = before - rows.len();
    tracing::info!("Filtering {} empty datapoints", dropped);
    dropped
}
