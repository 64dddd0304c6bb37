use crate::state::Level;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// The request is not valid from the current state. This means the caller's view of
    /// the navigation state is out of sync with the navigator.
    #[error("Invalid transition '{event}' from level '{from}': {reason}")]
    InvalidTransition {
        from: Level,
        event: &'static str,
        reason: String,
    },
}
