use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header of the snapshot, in the order the fields of [`Row`] serialize.
pub const COLUMNS: [&str; 10] = [
    "datetime",
    "low",
    "high",
    "open",
    "close",
    "volumefrom",
    "volumeto",
    "cryptocurrency",
    "image_url",
    "coin_name",
];

/// One bucket of one coin, joined with that coin's metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    #[serde(serialize_with = "serialize_datetime")]
    pub datetime: DateTime<Utc>,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    pub volumefrom: f64,
    pub volumeto: f64,
    pub cryptocurrency: String,
    pub image_url: String,
    pub coin_name: String,
}

impl Row {
    /// True when every price and volume field is zero, which is how the API
    /// pads buckets from before a coin started trading.
    pub fn is_empty(&self) -> bool {
        [
            self.low,
            self.high,
            self.open,
            self.close,
            self.volumefrom,
            self.volumeto,
        ]
        .iter()
        .all(|v| *v == 0.0)
    }
}

fn serialize_datetime<S: Serializer>(datetime: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&datetime.format(DATETIME_FORMAT))
}
