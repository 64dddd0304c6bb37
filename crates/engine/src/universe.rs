use crate::error::PipelineError;
use core_types::{Stock, StockUniverse};
use std::path::Path;

/// Reads a JSON array of stocks (camelCase keys) into a [`StockUniverse`].
///
/// `sectors` replaces the canonical sector list when given.
pub fn load_universe(path: &Path, sectors: Option<&[String]>) -> Result<StockUniverse, PipelineError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PipelineError::UniverseFile {
        path: path.to_path_buf(),
        source,
    })?;
    let universe = parse_universe(&raw, sectors)?;
    tracing::info!(
        path = %path.display(),
        stocks = universe.stocks().len(),
        "Loaded stock universe."
    );
    Ok(universe)
}

pub fn parse_universe(json: &str, sectors: Option<&[String]>) -> Result<StockUniverse, PipelineError> {
    let stocks: Vec<Stock> = serde_json::from_str(json)?;
    let universe = match sectors {
        Some(sectors) => StockUniverse::with_sectors(stocks, sectors.to_vec())?,
        None => StockUniverse::new(stocks)?,
    };
    Ok(universe)
}
