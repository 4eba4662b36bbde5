use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Malformed series payload for {symbol}: {source}")]
    MalformedResponse {
        symbol: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
