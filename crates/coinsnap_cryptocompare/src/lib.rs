pub mod coinlist;
pub mod histo;
pub mod method;
pub mod price;
pub mod toplist;

use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, ClientBuilder, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const BASE_URL: &str = "https://min-api.cryptocompare.com";

#[derive(Error, Debug)]
pub enum CryptocompareError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("Error decoding response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid API key: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),
}

/// One entry of a listing response that does not carry the coin fields.
/// Only that coin is affected; the rest of the listing stays usable.
#[derive(Error, Debug)]
#[error("Malformed entry for {label}: {source}")]
pub struct MalformedEntry {
    pub label: String,
    #[source]
    pub source: serde_json::Error,
}

pub struct CryptocompareClient {
    reqwest: Client,
    base_url: String,
}

#[bon::bon]
impl CryptocompareClient {
    #[builder]
    pub fn new(
        #[builder(into)] api_key: Option<String>,
        #[builder(into, default = BASE_URL.to_string())] base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, CryptocompareError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = api_key {
            headers.insert(
                "Authorization",
                HeaderValue::from_str(format!("Apikey {api_key}").as_str())?,
            );
        }

        let mut builder = ClientBuilder::new().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            reqwest: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl CryptocompareClient {
    /// Builds the GET request for `M` without sending it.
    pub fn request<M: method::Method>(
        &self,
        params: &M::Params,
    ) -> Result<Request, CryptocompareError> {
        let url = format!("{}/{}", self.base_url, M::PATH);
        Ok(self.reqwest.get(url).query(params).build()?)
    }

    pub async fn call<M: method::Method>(
        &self,
        params: M::Params,
    ) -> Result<M::Response, CryptocompareError> {
        let request = self.request::<M>(&params)?;
        tracing::debug!(url = %request.url(), "cryptocompare request");

        let body = self
            .reqwest
            .execute(request)
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        decode(body)
    }
}

/// CryptoCompare answers most failures with HTTP 200 and an
/// `"Response": "Error"` envelope, so that is checked before decoding.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, CryptocompareError> {
    if body.get("Response").and_then(Value::as_str) == Some("Error") {
        let message = body
            .get("Message")
            .and_then(Value::as_str)
            .unwrap_or("no message")
            .to_string();
        return Err(CryptocompareError::Api(message));
    }

    Ok(serde_json::from_value(body)?)
}

pub fn decode_entry<T: DeserializeOwned>(entry: Value, label: String) -> Result<T, MalformedEntry> {
    serde_json::from_value(entry).map_err(|source| MalformedEntry { label, source })
}
