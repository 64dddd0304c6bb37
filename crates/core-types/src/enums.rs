use serde::{Deserialize, Serialize};

/// The listing type of an instrument in the stock collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    #[default]
    Equity,
    Etf,
    Reit,
}
