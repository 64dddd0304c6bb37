use crate::breadcrumb::{self, Breadcrumb};
use crate::entities::{self, IndustrySummary, TopAndWorst};
use crate::error::NavigationError;
use crate::state::{DrillDownState, Level, ViewLevel};
use core_types::{Entity, Stock, StockUniverse};
use serde::{Deserialize, Serialize};

/// Every navigation transition as a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    SelectSector { sector: String },
    SelectIndustry { industry: String },
    Back,
    /// Breadcrumb click on the sector crumb.
    JumpToSector,
    SelectStockForCustom { stock: Stock },
    RemoveCustomStock { stock_id: String },
    ClearCustom,
    Reset,
}

/// Outcome of adding a stock to the custom selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomSelection {
    Added,
    AlreadySelected,
    AtCapacity,
}

/// The drill-down state machine.
///
/// It is the only writer of [`DrillDownState`]. Transitions that make no sense from the
/// current level return `NavigationError::InvalidTransition` and leave the state
/// untouched.
#[derive(Debug, Clone)]
pub struct DrillDownNavigator {
    state: DrillDownState,
}

impl Default for DrillDownNavigator {
    fn default() -> Self {
        Self::new(crate::state::DEFAULT_MAX_CUSTOM_STOCKS)
    }
}

impl DrillDownNavigator {
    /// Starts at the sector level with an empty custom selection.
    pub fn new(max_custom_stocks: usize) -> Self {
        Self {
            state: DrillDownState::new(max_custom_stocks),
        }
    }

    pub fn state(&self) -> &DrillDownState {
        &self.state
    }

    pub fn level(&self) -> Level {
        self.state.level()
    }

    /// Drills from the sector level into one sector's industries.
    pub fn select_sector(
        &mut self,
        universe: &StockUniverse,
        sector: &str,
    ) -> Result<(), NavigationError> {
        const EVENT: &str = "select_sector";

        if self.level() != Level::Sectors {
            return Err(self.invalid(EVENT, "a sector can only be selected from the sector level"));
        }
        if !universe.has_sector(sector) {
            return Err(self.invalid(EVENT, format!("unknown sector '{sector}'")));
        }

        self.state.view = ViewLevel::Industries {
            sector: sector.to_string(),
        };
        tracing::debug!(sector, "Drilled into sector.");
        Ok(())
    }

    /// Drills from a sector's industries into one industry's stocks.
    pub fn select_industry(
        &mut self,
        universe: &StockUniverse,
        industry: &str,
    ) -> Result<(), NavigationError> {
        const EVENT: &str = "select_industry";

        let sector = match &self.state.view {
            ViewLevel::Industries { sector } => sector.clone(),
            _ => {
                return Err(self.invalid(
                    EVENT,
                    "an industry can only be selected while a sector's industries are shown",
                ));
            }
        };
        if !universe.has_industry(&sector, industry) {
            return Err(self.invalid(
                EVENT,
                format!("industry '{industry}' does not exist in sector '{sector}'"),
            ));
        }

        tracing::debug!(sector = %sector, industry, "Drilled into industry.");
        self.state.view = ViewLevel::Stocks {
            sector,
            industry: industry.to_string(),
        };
        Ok(())
    }

    /// Moves one level up. A no-op at the sector level.
    ///
    /// Leaving the custom level keeps the custom selection.
    pub fn back(&mut self) {
        let previous = std::mem::take(&mut self.state.view);
        self.state.view = match previous {
            ViewLevel::Stocks { sector, .. } => ViewLevel::Industries { sector },
            ViewLevel::Industries { .. } | ViewLevel::Sectors | ViewLevel::Custom => {
                ViewLevel::Sectors
            }
        };
        tracing::debug!(level = %self.level(), "Navigated back.");
    }

    /// Returns to the selected sector's industries, clearing the industry.
    pub fn jump_to_sector(&mut self) -> Result<(), NavigationError> {
        let sector = match &self.state.view {
            ViewLevel::Industries { sector } | ViewLevel::Stocks { sector, .. } => sector.clone(),
            _ => return Err(self.invalid("jump_to_sector", "no sector is selected")),
        };
        self.state.view = ViewLevel::Industries { sector };
        Ok(())
    }

    /// Appends a stock to the custom selection.
    ///
    /// The first stock of an empty selection switches to the custom level. Later stocks
    /// only extend the list, so a drill-down entered after backing out of the custom view
    /// stays where it is. A stock already selected, or a selection already at capacity,
    /// leaves the state untouched, including the level.
    pub fn select_stock_for_custom(&mut self, stock: Stock) -> CustomSelection {
        if self.state.custom_stocks.iter().any(|s| s.id == stock.id) {
            return CustomSelection::AlreadySelected;
        }
        if self.state.custom_stocks.len() >= self.state.max_custom_stocks {
            tracing::warn!(
                stock_id = %stock.id,
                max = self.state.max_custom_stocks,
                "Custom selection is full, ignoring stock."
            );
            return CustomSelection::AtCapacity;
        }

        tracing::debug!(stock_id = %stock.id, "Added stock to custom selection.");
        let first = self.state.custom_stocks.is_empty();
        self.state.custom_stocks.push(stock);
        if first {
            self.state.view = ViewLevel::Custom;
        }
        CustomSelection::Added
    }

    /// Removes a stock from the custom selection. Unknown ids are ignored.
    ///
    /// Emptying the selection while it is shown returns to the sector level.
    pub fn remove_custom_stock(&mut self, stock_id: &str) {
        self.state.custom_stocks.retain(|s| s.id != stock_id);
        if self.state.custom_stocks.is_empty() && self.level() == Level::Custom {
            self.state.view = ViewLevel::Sectors;
        }
    }

    pub fn clear_custom(&mut self) {
        self.state.custom_stocks.clear();
        if self.level() == Level::Custom {
            self.state.view = ViewLevel::Sectors;
        }
    }

    /// Back to the initial state. The capacity is kept.
    pub fn reset(&mut self) {
        self.state = DrillDownState::new(self.state.max_custom_stocks);
        tracing::debug!("Navigation reset.");
    }

    /// Applies an event. Only the selection events can fail.
    pub fn apply(
        &mut self,
        universe: &StockUniverse,
        event: NavigationEvent,
    ) -> Result<(), NavigationError> {
        match event {
            NavigationEvent::SelectSector { sector } => self.select_sector(universe, &sector)?,
            NavigationEvent::SelectIndustry { industry } => {
                self.select_industry(universe, &industry)?
            }
            NavigationEvent::Back => self.back(),
            NavigationEvent::JumpToSector => self.jump_to_sector()?,
            NavigationEvent::SelectStockForCustom { stock } => {
                self.select_stock_for_custom(stock);
            }
            NavigationEvent::RemoveCustomStock { stock_id } => self.remove_custom_stock(&stock_id),
            NavigationEvent::ClearCustom => self.clear_custom(),
            NavigationEvent::Reset => self.reset(),
        }
        Ok(())
    }

    /// The entities to correlate at the current level, in matrix order.
    pub fn current_entity_set(&self, universe: &StockUniverse) -> Vec<Entity> {
        match &self.state.view {
            ViewLevel::Sectors => entities::sector_entities(universe),
            ViewLevel::Industries { sector } => entities::industry_entities(universe, sector),
            ViewLevel::Stocks { sector, industry } => {
                TopAndWorst::from_stocks(universe.stocks_in_industry(sector, industry)).entities()
            }
            ViewLevel::Custom => self
                .state
                .custom_stocks
                .iter()
                .map(Stock::to_entity)
                .collect(),
        }
    }

    /// Best and worst performers of the selected industry. `None` outside the stocks level.
    pub fn top_and_worst(&self, universe: &StockUniverse) -> Option<TopAndWorst> {
        match &self.state.view {
            ViewLevel::Stocks { sector, industry } => Some(TopAndWorst::from_stocks(
                universe.stocks_in_industry(sector, industry),
            )),
            _ => None,
        }
    }

    /// Headline figures for the selected industry. `None` outside the stocks level.
    pub fn industry_summary(&self, universe: &StockUniverse) -> Option<IndustrySummary> {
        match &self.state.view {
            ViewLevel::Stocks { sector, industry } => Some(IndustrySummary::from_stocks(
                universe.stocks_in_industry(sector, industry),
            )),
            _ => None,
        }
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumb::trail(&self.state)
    }

    /// Whether the current level yields at least two entities to correlate.
    pub fn is_ready_for_correlation(&self, universe: &StockUniverse) -> bool {
        match self.level() {
            Level::Custom => self.state.custom_stocks.len() >= 2,
            _ => self.current_entity_set(universe).len() >= 2,
        }
    }

    fn invalid(&self, event: &'static str, reason: impl Into<String>) -> NavigationError {
        let error = NavigationError::InvalidTransition {
            from: self.level(),
            event,
            reason: reason.into(),
        };
        tracing::warn!(error = %error, "Rejected navigation event.");
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::AssetType;
    use rust_decimal_macros::dec;

    fn stock(id: &str, sector: &str, industry: &str, change: f64) -> Stock {
        Stock {
            id: id.to_string(),
            ticker: id.to_uppercase(),
            name: format!("{id} Inc."),
            sector: sector.to_string(),
            industry: industry.to_string(),
            asset_type: AssetType::Equity,
            price: dec!(100),
            change_percent: change,
            market_cap: dec!(5000000000),
            volume: 1_000,
            last_updated: None,
        }
    }

    fn universe() -> StockUniverse {
        StockUniverse::new(vec![
            stock("amgn", "Healthcare", "Biotechnology", 1.2),
            stock("gild", "Healthcare", "Biotechnology", -0.4),
            stock("vrtx", "Healthcare", "Biotechnology", 2.5),
            stock("pfe", "Healthcare", "Drug Manufacturers", -1.1),
            stock("aapl", "Technology", "Consumer Electronics", 0.8),
            stock("msft", "Technology", "Software", 1.9),
        ])
        .expect("valid universe")
    }

    #[test]
    fn drill_down_and_back_round_trip() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();

        nav.select_sector(&universe, "Healthcare").unwrap();
        assert_eq!(nav.level(), Level::Industries);
        assert_eq!(nav.state().selected_sector(), Some("Healthcare"));

        nav.select_industry(&universe, "Biotechnology").unwrap();
        assert_eq!(nav.level(), Level::Stocks);
        assert_eq!(nav.state().selected_industry(), Some("Biotechnology"));

        nav.back();
        assert_eq!(nav.level(), Level::Industries);
        assert_eq!(nav.state().selected_sector(), Some("Healthcare"));
        assert_eq!(nav.state().selected_industry(), None);

        nav.back();
        assert_eq!(nav.state(), &DrillDownState::new(4));

        nav.back();
        assert_eq!(nav.level(), Level::Sectors);
    }

    #[test]
    fn healthcare_biotech_shows_its_stocks_best_first() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        nav.select_sector(&universe, "Healthcare").unwrap();

        let industries: Vec<String> = nav
            .current_entity_set(&universe)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(industries, vec!["Biotechnology", "Drug Manufacturers"]);

        nav.select_industry(&universe, "Biotechnology").unwrap();
        let stocks = nav.current_entity_set(&universe);
        let labels: Vec<&str> = stocks.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["VRTX", "AMGN", "GILD"]);
        assert!(nav.is_ready_for_correlation(&universe));

        nav.back();
        assert_eq!(nav.level(), Level::Industries);
        assert_eq!(nav.state().selected_industry(), None);
    }

    #[test]
    fn sector_level_lists_canonical_sectors() {
        let universe = universe();
        let nav = DrillDownNavigator::default();
        let entities = nav.current_entity_set(&universe);

        assert_eq!(entities.len(), 11);
        assert_eq!(entities[0].id, "Technology");
        assert!((entities[0].reference_performance - 1.35).abs() < 1e-12);
        let energy = entities.iter().find(|e| e.id == "Energy").unwrap();
        assert_eq!(energy.reference_performance, 0.0);
    }

    #[test]
    fn custom_selection_deduplicates_and_switches_level() {
        let universe = universe();
        let a = universe.find("aapl").unwrap().clone();
        let b = universe.find("pfe").unwrap().clone();
        let mut nav = DrillDownNavigator::default();

        assert_eq!(nav.select_stock_for_custom(a.clone()), CustomSelection::Added);
        assert_eq!(nav.level(), Level::Custom);
        assert!(!nav.is_ready_for_correlation(&universe));

        assert_eq!(nav.select_stock_for_custom(b), CustomSelection::Added);
        assert_eq!(nav.select_stock_for_custom(a), CustomSelection::AlreadySelected);

        let ids: Vec<String> = nav
            .current_entity_set(&universe)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["aapl", "pfe"]);
        assert!(nav.is_ready_for_correlation(&universe));
    }

    #[test]
    fn custom_selection_is_capped() {
        let universe = universe();
        let mut nav = DrillDownNavigator::new(2);
        nav.select_stock_for_custom(universe.find("aapl").unwrap().clone());
        nav.select_stock_for_custom(universe.find("msft").unwrap().clone());

        let outcome = nav.select_stock_for_custom(universe.find("pfe").unwrap().clone());
        assert_eq!(outcome, CustomSelection::AtCapacity);
        assert_eq!(nav.state().custom_stocks().len(), 2);
    }

    #[test]
    fn default_cap_keeps_the_first_four_in_order() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        for id in ["aapl", "msft", "pfe", "amgn"] {
            let outcome = nav.select_stock_for_custom(universe.find(id).unwrap().clone());
            assert_eq!(outcome, CustomSelection::Added);
        }

        let outcome = nav.select_stock_for_custom(universe.find("gild").unwrap().clone());
        assert_eq!(outcome, CustomSelection::AtCapacity);
        let ids: Vec<&str> = nav.state().custom_stocks().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["aapl", "msft", "pfe", "amgn"]);
        assert_eq!(nav.level(), Level::Custom);
    }

    #[test]
    fn rejected_custom_adds_keep_the_level() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        for id in ["aapl", "msft", "pfe", "amgn"] {
            nav.select_stock_for_custom(universe.find(id).unwrap().clone());
        }
        nav.back();
        nav.select_sector(&universe, "Healthcare").unwrap();
        nav.select_industry(&universe, "Biotechnology").unwrap();
        let before = nav.state().clone();

        let full = nav.select_stock_for_custom(universe.find("gild").unwrap().clone());
        assert_eq!(full, CustomSelection::AtCapacity);
        assert_eq!(nav.state(), &before);

        nav.remove_custom_stock("amgn");
        let again = nav.select_stock_for_custom(universe.find("aapl").unwrap().clone());
        assert_eq!(again, CustomSelection::AlreadySelected);
        assert_eq!(nav.level(), Level::Stocks);
        assert_eq!(nav.state().selected_industry(), Some("Biotechnology"));
    }

    #[test]
    fn later_custom_stocks_keep_the_drill_down() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        nav.select_stock_for_custom(universe.find("aapl").unwrap().clone());
        assert_eq!(nav.level(), Level::Custom);

        nav.back();
        nav.select_sector(&universe, "Healthcare").unwrap();
        nav.select_industry(&universe, "Biotechnology").unwrap();

        let outcome = nav.select_stock_for_custom(universe.find("gild").unwrap().clone());
        assert_eq!(outcome, CustomSelection::Added);
        assert_eq!(nav.level(), Level::Stocks);
        assert_eq!(nav.state().selected_sector(), Some("Healthcare"));
        assert_eq!(nav.state().selected_industry(), Some("Biotechnology"));
        assert_eq!(nav.state().custom_stocks().len(), 2);
    }

    #[test]
    fn removing_the_last_custom_stock_returns_to_sectors() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        nav.select_stock_for_custom(universe.find("aapl").unwrap().clone());
        nav.select_stock_for_custom(universe.find("msft").unwrap().clone());

        nav.remove_custom_stock("unknown");
        assert_eq!(nav.state().custom_stocks().len(), 2);

        nav.remove_custom_stock("aapl");
        assert_eq!(nav.level(), Level::Custom);
        nav.remove_custom_stock("msft");
        assert_eq!(nav.level(), Level::Sectors);

        nav.select_stock_for_custom(universe.find("aapl").unwrap().clone());
        nav.clear_custom();
        assert_eq!(nav.level(), Level::Sectors);
        assert!(nav.state().custom_stocks().is_empty());
    }

    #[test]
    fn back_from_custom_keeps_the_selection() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        nav.select_stock_for_custom(universe.find("aapl").unwrap().clone());

        nav.back();
        assert_eq!(nav.level(), Level::Sectors);
        assert_eq!(nav.state().custom_stocks().len(), 1);

        nav.remove_custom_stock("aapl");
        assert_eq!(nav.level(), Level::Sectors);
    }

    #[test]
    fn adding_a_custom_stock_mid_drill_down_leaves_the_hierarchy() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        nav.select_sector(&universe, "Healthcare").unwrap();
        nav.select_industry(&universe, "Biotechnology").unwrap();

        nav.select_stock_for_custom(universe.find("gild").unwrap().clone());
        assert_eq!(nav.level(), Level::Custom);
        assert_eq!(nav.state().selected_sector(), None);
        assert_eq!(nav.state().selected_industry(), None);
    }

    #[test]
    fn invalid_transitions_leave_state_untouched() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();

        let err = nav.select_industry(&universe, "Biotechnology").unwrap_err();
        assert!(matches!(
            err,
            NavigationError::InvalidTransition { from: Level::Sectors, .. }
        ));
        assert!(nav.select_sector(&universe, "Crypto").is_err());
        assert!(nav.jump_to_sector().is_err());
        assert_eq!(nav.level(), Level::Sectors);

        nav.select_sector(&universe, "Healthcare").unwrap();
        assert!(nav.select_sector(&universe, "Technology").is_err());
        assert!(nav.select_industry(&universe, "Software").is_err());
        assert_eq!(nav.state().selected_sector(), Some("Healthcare"));
    }

    #[test]
    fn empty_canonical_sector_can_be_selected() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        nav.select_sector(&universe, "Utilities").unwrap();

        assert!(nav.current_entity_set(&universe).is_empty());
        assert!(!nav.is_ready_for_correlation(&universe));
    }

    #[test]
    fn jump_to_sector_clears_the_industry() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        nav.select_sector(&universe, "Healthcare").unwrap();
        nav.select_industry(&universe, "Drug Manufacturers").unwrap();

        nav.jump_to_sector().unwrap();
        assert_eq!(
            nav.state().view(),
            &ViewLevel::Industries {
                sector: "Healthcare".to_string()
            }
        );
    }

    #[test]
    fn breadcrumbs_follow_the_drill_down() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();

        let crumbs = nav.breadcrumbs();
        assert_eq!(crumbs.len(), 1);
        assert!(crumbs[0].active);

        nav.select_sector(&universe, "Healthcare").unwrap();
        nav.select_industry(&universe, "Biotechnology").unwrap();
        let labels: Vec<String> = nav.breadcrumbs().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["All Sectors", "Healthcare", "Biotechnology"]);

        let crumbs = nav.breadcrumbs();
        assert_eq!(crumbs[1].target, Level::Industries);
        assert!(!crumbs[1].active);
        assert!(crumbs[2].active);

        nav.select_stock_for_custom(universe.find("aapl").unwrap().clone());
        nav.select_stock_for_custom(universe.find("pfe").unwrap().clone());
        let crumbs = nav.breadcrumbs();
        assert_eq!(crumbs[1].label, "Custom Selection (2 stocks)");
        assert_eq!(crumbs[1].target, Level::Custom);
    }

    #[test]
    fn industry_read_models_only_exist_at_the_stocks_level() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        assert!(nav.industry_summary(&universe).is_none());

        nav.select_sector(&universe, "Healthcare").unwrap();
        nav.select_industry(&universe, "Biotechnology").unwrap();

        let summary = nav.industry_summary(&universe).unwrap();
        assert_eq!(summary.total_companies, 3);
        assert_eq!(summary.gainers, 2);
        assert_eq!(summary.total_market_cap, dec!(15000000000));

        let performers = nav.top_and_worst(&universe).unwrap();
        assert_eq!(performers.top.len(), 3);
        assert!(performers.worst.is_empty());
    }

    #[test]
    fn events_replay_through_apply() {
        let universe = universe();
        let mut nav = DrillDownNavigator::default();
        let script = vec![
            NavigationEvent::SelectSector {
                sector: "Healthcare".to_string(),
            },
            NavigationEvent::SelectIndustry {
                industry: "Biotechnology".to_string(),
            },
            NavigationEvent::JumpToSector,
            NavigationEvent::SelectStockForCustom {
                stock: universe.find("msft").unwrap().clone(),
            },
            NavigationEvent::RemoveCustomStock {
                stock_id: "msft".to_string(),
            },
        ];
        for event in script {
            nav.apply(&universe, event).unwrap();
        }
        assert_eq!(nav.level(), Level::Sectors);

        nav.apply(&universe, NavigationEvent::Reset).unwrap();
        assert!(nav.apply(&universe, NavigationEvent::JumpToSector).is_err());
    }
}
