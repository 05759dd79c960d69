//! The application state owned by the planner.

use crate::day_event::DayEvents;
use crate::period::PeriodEvent;
use crate::settings::AppSettings;
use crate::todo::TodoList;

/// The four persisted records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerState {
    pub todos: TodoList,
    pub events: DayEvents,
    pub period_events: Vec<PeriodEvent>,
    pub settings: AppSettings,
}
