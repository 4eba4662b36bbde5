use serde::Serialize;

/// A CryptoCompare endpoint: its path relative to the API root, the query it
/// takes and the body it answers with.
pub trait Method {
    const PATH: &'static str;

    type Response: serde::de::DeserializeOwned;
    type Params: Serialize;
}
