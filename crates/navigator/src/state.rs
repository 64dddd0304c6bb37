use core_types::Stock;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MAX_CUSTOM_STOCKS: usize = 4;

/// The granularity of analysis, without the selections that go with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Sectors,
    Industries,
    Stocks,
    Custom,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Sectors => "sectors",
            Level::Industries => "industries",
            Level::Stocks => "stocks",
            Level::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// The active level together with exactly the selections that level requires.
///
/// An industry can only be selected while a sector is, and only at the stocks level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ViewLevel {
    #[default]
    Sectors,
    Industries {
        sector: String,
    },
    Stocks {
        sector: String,
        industry: String,
    },
    Custom,
}

impl ViewLevel {
    pub fn level(&self) -> Level {
        match self {
            ViewLevel::Sectors => Level::Sectors,
            ViewLevel::Industries { .. } => Level::Industries,
            ViewLevel::Stocks { .. } => Level::Stocks,
            ViewLevel::Custom => Level::Custom,
        }
    }
}

/// The navigation state. Only `DrillDownNavigator` mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillDownState {
    pub(crate) view: ViewLevel,
    pub(crate) custom_stocks: Vec<Stock>,
    pub(crate) max_custom_stocks: usize,
}

impl DrillDownState {
    pub(crate) fn new(max_custom_stocks: usize) -> Self {
        Self {
            view: ViewLevel::Sectors,
            custom_stocks: Vec::new(),
            max_custom_stocks,
        }
    }

    pub fn view(&self) -> &ViewLevel {
        &self.view
    }

    pub fn level(&self) -> Level {
        self.view.level()
    }

    pub fn selected_sector(&self) -> Option<&str> {
        match &self.view {
            ViewLevel::Industries { sector } | ViewLevel::Stocks { sector, .. } => {
                Some(sector.as_str())
            }
            _ => None,
        }
    }

    pub fn selected_industry(&self) -> Option<&str> {
        match &self.view {
            ViewLevel::Stocks { industry, .. } => Some(industry.as_str()),
            _ => None,
        }
    }

    /// Custom selection in insertion order, unique by stock id.
    pub fn custom_stocks(&self) -> &[Stock] {
        &self.custom_stocks
    }

    pub fn max_custom_stocks(&self) -> usize {
        self.max_custom_stocks
    }

    /// A flat, serializable copy for breadcrumb rendering.
    pub fn snapshot(&self) -> DrillDownSnapshot {
        DrillDownSnapshot {
            level: self.level(),
            selected_sector: self.selected_sector().map(str::to_string),
            selected_industry: self.selected_industry().map(str::to_string),
            custom_stock_ids: self.custom_stocks.iter().map(|s| s.id.clone()).collect(),
            max_custom_stocks: self.max_custom_stocks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillDownSnapshot {
    pub level: Level,
    pub selected_sector: Option<String>,
    pub selected_industry: Option<String>,
    pub custom_stock_ids: Vec<String>,
    pub max_custom_stocks: usize,
}
