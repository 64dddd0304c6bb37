use core_types::{Entity, Stock, StockUniverse};
use rust_decimal::Decimal;
use serde::Serialize;

/// How many stocks each side of the stocks-level matrix shows.
pub const PERFORMERS_PER_SIDE: usize = 10;

/// Best and worst performers of an industry.
///
/// `top` is ordered best first, `worst` is ordered worst first. The two lists never
/// share a stock; with fewer than `2 * PERFORMERS_PER_SIDE` stocks they partition the
/// whole industry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopAndWorst {
    pub top: Vec<Stock>,
    pub worst: Vec<Stock>,
}

impl TopAndWorst {
    pub fn from_stocks<'a>(stocks: impl IntoIterator<Item = &'a Stock>) -> Self {
        let mut sorted: Vec<&Stock> = stocks.into_iter().collect();
        // Stable, so ties keep collection order.
        sorted.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));

        let n = sorted.len();
        let top_len = PERFORMERS_PER_SIDE.min(n);
        let worst_len = PERFORMERS_PER_SIDE.min(n - top_len);

        let top = sorted[..top_len].iter().map(|s| (*s).clone()).collect();
        let worst = sorted[n - worst_len..]
            .iter()
            .rev()
            .map(|s| (*s).clone())
            .collect();

        Self { top, worst }
    }

    /// Matrix order: the top list followed by the worst list.
    pub fn entities(&self) -> Vec<Entity> {
        self.top
            .iter()
            .chain(&self.worst)
            .map(Stock::to_entity)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.worst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Headline figures for the selected industry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustrySummary {
    pub total_companies: usize,
    /// Mean `change_percent`; `0.0` for an empty industry.
    pub average_change: f64,
    pub total_market_cap: Decimal,
    /// Stocks with a strictly positive change.
    pub gainers: usize,
}

impl IndustrySummary {
    pub fn from_stocks<'a>(stocks: impl IntoIterator<Item = &'a Stock>) -> Self {
        let mut summary = Self {
            total_companies: 0,
            average_change: 0.0,
            total_market_cap: Decimal::ZERO,
            gainers: 0,
        };
        let mut change_sum = 0.0;

        for stock in stocks {
            summary.total_companies += 1;
            summary.total_market_cap += stock.market_cap;
            change_sum += stock.change_percent;
            if stock.change_percent > 0.0 {
                summary.gainers += 1;
            }
        }

        if summary.total_companies > 0 {
            summary.average_change = change_sum / summary.total_companies as f64;
        }
        summary
    }
}

/// One entity per sector shown at the sector level, seeded with the sector's mean change.
///
/// A canonical sector with no stocks keeps zero constituents.
pub(crate) fn sector_entities(universe: &StockUniverse) -> Vec<Entity> {
    universe
        .sector_names()
        .into_iter()
        .map(|sector| {
            let (performance, count) = mean_change(universe.stocks_in_sector(&sector));
            Entity::named(sector, performance).with_constituents(count)
        })
        .collect()
}

/// One entity per industry of `sector`, alphabetically, seeded with the industry's mean change.
pub(crate) fn industry_entities(universe: &StockUniverse, sector: &str) -> Vec<Entity> {
    universe
        .industries_in_sector(sector)
        .into_iter()
        .map(|industry| {
            let (performance, count) = mean_change(universe.stocks_in_industry(sector, &industry));
            Entity::named(industry, performance).with_constituents(count)
        })
        .collect()
}

/// Mean change and member count. The mean is `0.0` for no stocks.
fn mean_change<'a>(stocks: impl Iterator<Item = &'a Stock>) -> (f64, usize) {
    let (sum, count) = stocks.fold((0.0, 0usize), |(sum, count), s| {
        (sum + s.change_percent, count + 1)
    });
    let mean = if count == 0 { 0.0 } else { sum / count as f64 };
    (mean, count)
}
