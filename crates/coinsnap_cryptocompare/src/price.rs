use crate::method::Method;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CryptoCompare rejects `fsyms` lists longer than this many characters.
pub const MAX_FSYMS_LEN: usize = 300;

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
pub struct PriceMultiParams {
    /// Comma separated source symbols.
    pub fsyms: String,
    /// Comma separated quote symbols.
    #[builder(into)]
    pub tsyms: String,
}

pub fn join_symbols<I, T>(symbols: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    symbols
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// `{ "BTC": { "USD": 97000.1 }, ... }`
pub type PriceMultiResponse = BTreeMap<String, BTreeMap<String, f64>>;

pub struct PriceMulti;

impl Method for PriceMulti {
    const PATH: &'static str = "data/pricemulti";

    type Response = PriceMultiResponse;
    type Params = PriceMultiParams;
}
