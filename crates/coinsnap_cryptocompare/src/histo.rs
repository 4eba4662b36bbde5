use crate::method::Method;
use crate::{CryptocompareClient, CryptocompareError};
use bon::Builder;
use coinsnap_shared_models::Granularity;
use reqwest::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_LIMIT: u32 = 400;
pub const DEFAULT_AGGREGATE: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct HistoParams {
    #[serde(rename = "fsym")]
    pub source_sym: String,

    #[serde(rename = "tsym")]
    pub target_sym: String,
    #[builder(default = DEFAULT_LIMIT)]
    pub limit: u32,
    #[builder(default = DEFAULT_AGGREGATE)]
    pub aggregate: u32,
}

/// Body of a successful histo call. Only the bucket list is read; the
/// `TimeFrom`/`TimeTo`/`ConversionType` siblings are ignored.
#[derive(Serialize, Deserialize, Debug)]
pub struct HistoPayload {
    #[serde(rename = "Data")]
    pub data: Vec<HistoBucket>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoBucket {
    pub time: i64,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    pub volumefrom: f64,
    pub volumeto: f64,
}

pub struct Histominute;
pub struct Histohour;
pub struct Histoday;

// Histo bodies stay raw here; turning them into rows is the dataset's job.
impl Method for Histominute {
    const PATH: &'static str = "data/histominute";

    type Response = Value;
    type Params = HistoParams;
}

impl Method for Histohour {
    const PATH: &'static str = "data/histohour";

    type Response = Value;
    type Params = HistoParams;
}

impl Method for Histoday {
    const PATH: &'static str = "data/histoday";

    type Response = Value;
    type Params = HistoParams;
}

impl CryptocompareClient {
    pub fn histo_request(
        &self,
        granularity: Granularity,
        params: &HistoParams,
    ) -> Result<Request, CryptocompareError> {
        match granularity {
            Granularity::Minute => self.request::<Histominute>(params),
            Granularity::Hour => self.request::<Histohour>(params),
            Granularity::Day => self.request::<Histoday>(params),
        }
    }

    pub async fn histo(
        &self,
        granularity: Granularity,
        params: HistoParams,
    ) -> Result<Value, CryptocompareError> {
        match granularity {
            Granularity::Minute => self.call::<Histominute>(params).await,
            Granularity::Hour => self.call::<Histohour>(params).await,
            Granularity::Day => self.call::<Histoday>(params).await,
        }
    }
}
