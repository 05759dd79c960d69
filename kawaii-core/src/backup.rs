//! Whole-state backup and partial restore.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::day_event::DayEvents;
use crate::error::{PlannerError, PlannerResult};
use crate::period::PeriodEvent;
use crate::settings::AppSettings;
use crate::state::PlannerState;
use crate::store::decode_day_events;
use crate::todo::TodoList;

pub const BACKUP_VERSION: u32 = 1;

/// The backup file layout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup<'a> {
    pub todos: &'a TodoList,
    pub events: &'a DayEvents,
    pub period_events: &'a [PeriodEvent],
    pub app_settings: &'a AppSettings,
    pub version: u32,
}

impl<'a> Backup<'a> {
    pub fn of(state: &'a PlannerState) -> Self {
        Backup {
            todos: &state.todos,
            events: &state.events,
            period_events: &state.period_events,
            app_settings: &state.settings,
            version: BACKUP_VERSION,
        }
    }

    pub fn to_json(&self) -> PlannerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `kawaii_plan_backup_YYYYMMDD.json`
pub fn backup_filename(date: NaiveDate) -> String {
    format!("kawaii_plan_backup_{}.json", date.format("%Y%m%d"))
}

/// The records found in a backup file. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestorePayload {
    pub todos: Option<TodoList>,
    pub events: Option<DayEvents>,
    pub period_events: Option<Vec<PeriodEvent>>,
    pub app_settings: Option<AppSettings>,
}

impl RestorePayload {
    /// Parse a backup. Any decoding problem fails the whole payload.
    pub fn parse(json: &str) -> PlannerResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(restore_error)?;
        let Value::Object(mut root) = value else {
            return Err(PlannerError::Restore("backup is not a JSON object".into()));
        };

        match root.get("version").and_then(Value::as_u64) {
            Some(version) if version != u64::from(BACKUP_VERSION) => {
                tracing::warn!(version, "restoring backup with unknown version");
            }
            _ => {}
        }

        let todos = take(&mut root, "todos")
            .map(serde_json::from_value::<TodoList>)
            .transpose()
            .map_err(restore_error)?;

        let events = take(&mut root, "events")
            .map(decode_day_events)
            .transpose()
            .map_err(PlannerError::Restore)?;

        let period_events = take(&mut root, "periodEvents")
            .map(serde_json::from_value::<Vec<PeriodEvent>>)
            .transpose()
            .map_err(restore_error)?;

        let app_settings = take(&mut root, "appSettings")
            .map(AppSettings::from_value)
            .transpose()
            .map_err(restore_error)?;

        Ok(RestorePayload {
            todos,
            events,
            period_events,
            app_settings,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_none()
            && self.events.is_none()
            && self.period_events.is_none()
            && self.app_settings.is_none()
    }

    /// Replace the records present in the payload, leaving the rest alone.
    pub fn apply(self, state: &mut PlannerState) {
        if let Some(todos) = self.todos {
            state.todos = todos;
        }
        if let Some(events) = self.events {
            state.events = events;
        }
        if let Some(period_events) = self.period_events {
            state.period_events = period_events;
        }
        if let Some(settings) = self.app_settings {
            state.settings = settings;
        }
    }
}

fn take(root: &mut Map<String, Value>, key: &str) -> Option<Value> {
    root.remove(key).filter(|v| !v.is_null())
}

fn restore_error(e: serde_json::Error) -> PlannerError {
    PlannerError::Restore(e.to_string())
}
