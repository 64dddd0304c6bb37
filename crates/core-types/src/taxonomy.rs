use crate::error::CoreError;
use crate::structs::Stock;
use std::collections::HashSet;

/// The externally defined sector list used to seed the sector level, even when a
/// sector currently has no stocks.
pub const CANONICAL_SECTORS: [&str; 11] = [
    "Technology",
    "Healthcare",
    "Financial Services",
    "Consumer Discretionary",
    "Consumer Staples",
    "Communication Services",
    "Industrials",
    "Energy",
    "Materials",
    "Real Estate",
    "Utilities",
];

/// A read-only view over the provider's stock collection plus the canonical sector list.
#[derive(Debug, Clone, Default)]
pub struct StockUniverse {
    stocks: Vec<Stock>,
    canonical_sectors: Vec<String>,
}

impl StockUniverse {
    /// Builds a universe seeded with [`CANONICAL_SECTORS`].
    pub fn new(stocks: Vec<Stock>) -> Result<Self, CoreError> {
        let sectors = CANONICAL_SECTORS.iter().map(|s| s.to_string()).collect();
        Self::with_sectors(stocks, sectors)
    }

    /// Builds a universe with a caller-supplied canonical sector list.
    ///
    /// Stock ids must be unique and every `change_percent` must be finite.
    pub fn with_sectors(stocks: Vec<Stock>, canonical_sectors: Vec<String>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(stocks.len());
        for stock in &stocks {
            if !seen.insert(stock.id.as_str()) {
                return Err(CoreError::DuplicateStock(stock.id.clone()));
            }
            if !stock.change_percent.is_finite() {
                return Err(CoreError::InvalidInput(
                    format!("stock '{}'", stock.id),
                    "change_percent must be finite".to_string(),
                ));
            }
        }

        let mut unique_sectors = Vec::with_capacity(canonical_sectors.len());
        for sector in canonical_sectors {
            if !unique_sectors.contains(&sector) {
                unique_sectors.push(sector);
            }
        }

        Ok(Self {
            stocks,
            canonical_sectors: unique_sectors,
        })
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn canonical_sectors(&self) -> &[String] {
        &self.canonical_sectors
    }

    pub fn find(&self, stock_id: &str) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.id == stock_id)
    }

    /// Every sector the sector level shows: the canonical list first, then any sector
    /// that only appears in the collection, in first-seen order.
    pub fn sector_names(&self) -> Vec<String> {
        let mut names = self.canonical_sectors.clone();
        for stock in &self.stocks {
            if !names.contains(&stock.sector) {
                names.push(stock.sector.clone());
            }
        }
        names
    }

    pub fn has_sector(&self, sector: &str) -> bool {
        self.canonical_sectors.iter().any(|s| s == sector)
            || self.stocks.iter().any(|s| s.sector == sector)
    }

    pub fn stocks_in_sector<'a>(&'a self, sector: &'a str) -> impl Iterator<Item = &'a Stock> + 'a {
        self.stocks.iter().filter(move |s| s.sector == sector)
    }

    pub fn stocks_in_industry<'a>(
        &'a self,
        sector: &'a str,
        industry: &'a str,
    ) -> impl Iterator<Item = &'a Stock> + 'a {
        self.stocks
            .iter()
            .filter(move |s| s.sector == sector && s.industry == industry)
    }

    /// Distinct industries within a sector, sorted alphabetically.
    pub fn industries_in_sector(&self, sector: &str) -> Vec<String> {
        let mut industries: Vec<String> = self
            .stocks_in_sector(sector)
            .map(|s| s.industry.clone())
            .collect();
        industries.sort();
        industries.dedup();
        industries
    }

    pub fn has_industry(&self, sector: &str, industry: &str) -> bool {
        self.stocks_in_industry(sector, industry).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::AssetType;
    use rust_decimal_macros::dec;

    fn stock(id: &str, sector: &str, industry: &str, change: f64) -> Stock {
        Stock {
            id: id.to_string(),
            ticker: id.to_uppercase(),
            name: String::new(),
            sector: sector.to_string(),
            industry: industry.to_string(),
            asset_type: AssetType::Equity,
            price: dec!(10),
            change_percent: change,
            market_cap: dec!(1000),
            volume: 0,
            last_updated: None,
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = StockUniverse::new(vec![
            stock("a", "Energy", "Oil", 1.0),
            stock("a", "Energy", "Gas", 2.0),
        ]);
        assert_eq!(result.unwrap_err(), CoreError::DuplicateStock("a".to_string()));
    }

    #[test]
    fn rejects_non_finite_change() {
        let result = StockUniverse::new(vec![stock("a", "Energy", "Oil", f64::NAN)]);
        assert!(matches!(result, Err(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn sector_names_append_unknown_sectors_after_canonical_list() {
        let universe = StockUniverse::new(vec![
            stock("a", "Crypto", "Miners", 1.0),
            stock("b", "Energy", "Oil", 1.0),
        ])
        .unwrap();

        let names = universe.sector_names();
        assert_eq!(names.len(), CANONICAL_SECTORS.len() + 1);
        assert_eq!(names[0], "Technology");
        assert_eq!(names.last().map(String::as_str), Some("Crypto"));
        assert!(universe.has_sector("Utilities"));
        assert!(!universe.has_sector("Nope"));
    }

    #[test]
    fn industries_are_sorted_and_distinct() {
        let universe = StockUniverse::new(vec![
            stock("a", "Healthcare", "Pharmaceuticals", 1.0),
            stock("b", "Healthcare", "Biotechnology", 1.0),
            stock("c", "Healthcare", "Pharmaceuticals", 1.0),
            stock("d", "Energy", "Oil", 1.0),
        ])
        .unwrap();

        assert_eq!(
            universe.industries_in_sector("Healthcare"),
            vec!["Biotechnology".to_string(), "Pharmaceuticals".to_string()]
        );
        assert!(universe.has_industry("Healthcare", "Biotechnology"));
        assert!(!universe.has_industry("Energy", "Biotechnology"));
    }
}
