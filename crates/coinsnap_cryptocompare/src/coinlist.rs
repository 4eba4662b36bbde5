use crate::method::Method;
use crate::{MalformedEntry, decode_entry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CoinListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<bool>,
}

impl Default for CoinListParams {
    fn default() -> Self {
        Self {
            summary: Some(true),
        }
    }
}

/// Entries stay raw until one is picked, so a coin with missing fields only
/// fails when it is actually used.
#[derive(Serialize, Deserialize, Debug)]
pub struct CoinListResponse {
    #[serde(rename = "Data")]
    pub data: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CoinListEntry {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "ImageUrl")]
    pub image_url: String,
}

impl CoinListResponse {
    pub fn take_entry(&mut self, symbol: &str) -> Option<Result<CoinListEntry, MalformedEntry>> {
        let entry = self.data.remove(symbol)?;
        let label = entry
            .get("FullName")
            .and_then(Value::as_str)
            .unwrap_or(symbol)
            .to_string();
        Some(decode_entry(entry, label))
    }
}

/// Every coin CryptoCompare knows about, keyed by symbol.
pub struct CoinList;

impl Method for CoinList {
    const PATH: &'static str = "data/all/coinlist";

    type Response = CoinListResponse;
    type Params = CoinListParams;
}
