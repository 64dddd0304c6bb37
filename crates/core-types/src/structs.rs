use crate::enums::AssetType;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single listed instrument as supplied by the external data provider.
///
/// The engine only ever reads stocks. `change_percent` is the statistics input and is
/// kept as `f64`; `price` and `market_cap` are money and stay in `Decimal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: String,
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    pub sector: String,
    pub industry: String,
    #[serde(default, rename = "type")]
    pub asset_type: AssetType,
    pub price: Decimal,
    pub change_percent: f64,
    pub market_cap: Decimal,
    #[serde(default)]
    pub volume: u64,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Stock {
    /// Reduces the stock to a correlatable entity keyed by its id and labelled by its ticker.
    pub fn to_entity(&self) -> Entity {
        Entity::new(self.id.clone(), self.ticker.clone(), self.change_percent)
    }
}

/// Anything that can be correlated: a sector, an industry, or a stock.
///
/// Entities are never mutated. They are re-derived from the stock collection whenever
/// the active drill-down level changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Unique within the active entity set.
    pub id: String,
    pub label: String,
    /// The real (non-simulated) performance figure the synthetic series is seeded with.
    pub reference_performance: f64,
    /// Stocks behind the entity: 1 for a stock, the member count for a sector or industry.
    /// An entity with none has no performance to simulate.
    #[serde(default = "default_constituents")]
    pub constituents: usize,
}

fn default_constituents() -> usize {
    1
}

impl Entity {
    pub fn new(id: impl Into<String>, label: impl Into<String>, reference_performance: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            reference_performance,
            constituents: default_constituents(),
        }
    }

    /// An entity whose id doubles as its display label (sectors and industries).
    pub fn named(name: impl Into<String>, reference_performance: f64) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, reference_performance)
    }

    pub fn with_constituents(mut self, constituents: usize) -> Self {
        self.constituents = constituents;
        self
    }

    pub fn has_constituents(&self) -> bool {
        self.constituents > 0
    }
}
