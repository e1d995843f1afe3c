//! Application module
//!
//! - Actions: what the user can do
//! - State: what the form shows right now
//! - Reducer: pure function (State, Action) -> State

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::{Action, Row};
pub use reducer::reduce;
pub use state::{AppState, FormInputs, StatusBarState, UiConfig};
