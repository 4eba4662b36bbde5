use crate::method::Method;
use crate::{MalformedEntry, decode_entry};
use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct TopListParams {
    #[builder(default = 100)]
    pub limit: u32,

    #[serde(rename = "tsym")]
    pub target_sym: String,
}

/// Only the `Data` array is required here; entries are decoded one by one
/// with [`TopTotalVolFullResponse::coin_infos`].
#[derive(Serialize, Deserialize, Debug)]
pub struct TopTotalVolFullResponse {
    #[serde(rename = "Data")]
    pub data: Vec<Value>,
}

#[derive(Deserialize, Debug)]
struct TopListEntry {
    #[serde(rename = "CoinInfo")]
    coin_info: TopListCoinInfo,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TopListCoinInfo {
    #[serde(rename = "Internal")]
    pub internal: String,
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "ImageUrl")]
    pub image_url: String,
}

fn entry_label(entry: &Value, index: usize) -> String {
    ["/CoinInfo/FullName", "/CoinInfo/Internal"]
        .iter()
        .find_map(|pointer| entry.pointer(pointer).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("entry #{}", index + 1))
}

impl TopTotalVolFullResponse {
    /// Ranking order is kept; an entry missing any coin field comes back as
    /// an error labelled with whatever name it does carry.
    pub fn coin_infos(self) -> Vec<Result<TopListCoinInfo, MalformedEntry>> {
        self.data
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let label = entry_label(&entry, index);
                decode_entry::<TopListEntry>(entry, label).map(|e| e.coin_info)
            })
            .collect()
    }
}

/// Top coins ranked by total trading volume across all markets.
pub struct TopTotalVolFull;

impl Method for TopTotalVolFull {
    const PATH: &'static str = "data/top/totalvolfull";

    type Response = TopTotalVolFullResponse;
    type Params = TopListParams;
}
