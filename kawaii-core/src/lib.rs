//! Core types for the kawaii-plan planner.
//!
//! This crate holds everything the front end does not draw itself:
//! - the four persisted records (todos, day events, period events, settings)
//! - `store` for loading and saving them through a key-value capability
//! - `calendar` for the month grid and its overlays
//! - `editor`, `countdown` and `backup` for the interactive pieces
//! - `planner` for the controller that turns intents into state changes

pub mod backup;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod day;
pub mod day_event;
pub mod editor;
pub mod error;
pub mod period;
pub mod planner;
pub mod settings;
pub mod stamp;
pub mod state;
pub mod store;
pub mod todo;

pub use error::{PlannerError, PlannerResult};
pub use planner::{Intent, Interaction, Planner};
pub use state::PlannerState;
