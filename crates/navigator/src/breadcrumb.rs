use crate::state::{DrillDownState, Level, ViewLevel};
use serde::Serialize;

pub const ROOT_LABEL: &str = "All Sectors";

/// One step of the navigation trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    /// The level a click on this crumb returns to.
    pub target: Level,
    /// The last crumb is the active one and is not clickable.
    pub active: bool,
}

impl Breadcrumb {
    fn new(label: impl Into<String>, target: Level) -> Self {
        Self {
            label: label.into(),
            target,
            active: false,
        }
    }
}

/// Builds the trail for the current state, root first.
pub(crate) fn trail(state: &DrillDownState) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb::new(ROOT_LABEL, Level::Sectors)];

    match state.view() {
        ViewLevel::Sectors => {}
        ViewLevel::Industries { sector } => {
            crumbs.push(Breadcrumb::new(sector, Level::Industries));
        }
        ViewLevel::Stocks { sector, industry } => {
            crumbs.push(Breadcrumb::new(sector, Level::Industries));
            crumbs.push(Breadcrumb::new(industry, Level::Stocks));
        }
        ViewLevel::Custom => {
            let count = state.custom_stocks().len();
            crumbs.push(Breadcrumb::new(
                format!("Custom Selection ({count} stocks)"),
                Level::Custom,
            ));
        }
    }

    if let Some(last) = crumbs.last_mut() {
        last.active = true;
    }
    crumbs
}
