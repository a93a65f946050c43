use serde::{Deserialize, Serialize};

/// An active position: a symbol whose aggregate share count is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub shares: i64,
}
