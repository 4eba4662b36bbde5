use crate::normalize::{NormalizeOptions, filter_empty_rows, normalize};
use crate::row::Row;
use coinsnap_cryptocompare::MalformedEntry;
use coinsnap_shared_models::CoinInfo;
use serde_json::Value;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinOutcome {
    Appended(usize),
    Skipped,
}

/// Combined table of every coin processed so far, plus the display names of
/// the coins that could not be fetched or normalized.
#[derive(Debug, Default)]
pub struct Aggregator {
    options: NormalizeOptions,
    rows: Vec<Row>,
    skipped: Vec<String>,
}

impl Aggregator {
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Normalizes the fetched body for `coin` and appends its rows. Any
    /// failure, from the fetch or from normalization, skips the coin.
    pub fn record<E: Display>(&mut self, coin: &CoinInfo, fetched: Result<Value, E>) -> CoinOutcome {
        let body = match fetched {
            Ok(body) => body,
            Err(e) => return self.skip(coin, e),
        };

        let mut rows = match normalize(body, coin) {
            Ok(rows) => rows,
            Err(e) => return self.skip(coin, e),
        };

        if self.options.filter_empty {
            filter_empty_rows(&mut rows);
        }

        let appended = rows.len();
        self.rows.append(&mut rows);
        tracing::debug!(symbol = %coin.internal_symbol, rows = appended, "coin appended");

        CoinOutcome::Appended(appended)
    }

    /// A ranking entry that never became a `CoinInfo` is skipped under the
    /// best name it carried.
    pub fn record_malformed(&mut self, entry: &MalformedEntry) -> CoinOutcome {
        tracing::warn!("Skipping {}: {}", entry.label, entry.source);
        self.skipped.push(entry.label.clone());
        CoinOutcome::Skipped
    }

    fn skip(&mut self, coin: &CoinInfo, error: impl Display) -> CoinOutcome {
        tracing::warn!(symbol = %coin.internal_symbol, "Skipping {}: {}", coin.full_name, error);
        self.skipped.push(coin.full_name.clone());
        CoinOutcome::Skipped
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[cfg(test)]
    pub(crate) fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn into_parts(self) -> (Vec<Row>, Vec<String>) {
        (self.rows, self.skipped)
    }
}
