pub mod aggregate;
pub mod error;
pub mod normalize;
pub mod row;
pub mod writer;

pub use aggregate::{Aggregator, CoinOutcome};
pub use error::DatasetError;
pub use normalize::{NormalizeOptions, filter_empty_rows, normalize, to_datetime};
pub use row::{COLUMNS, Row};
pub use writer::{SnapshotName, write_csv, write_snapshot};
