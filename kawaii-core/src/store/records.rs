use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::KeyValueStore;
use crate::day::DayKey;
use crate::day_event::{DayEvent, DayEvents};
use crate::error::PlannerResult;
use crate::period::PeriodEvent;
use crate::settings::AppSettings;
use crate::state::PlannerState;
use crate::todo::TodoList;

/// The four independently persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Todos,
    Events,
    PeriodEvents,
    Settings,
}

impl Record {
    pub const ALL: [Record; 4] = [Record::Todos, Record::Events, Record::PeriodEvents, Record::Settings];

    pub fn key(&self) -> &'static str {
        match self {
            Record::Todos => "kawaiiTodos",
            Record::Events => "kawaiiEvents",
            Record::PeriodEvents => "kawaiiPeriodEvents",
            Record::Settings => "kawaiiAppSettings",
        }
    }
}

/// Load every record. Absent or unreadable records fall back to their defaults,
/// and a malformed item inside a record is skipped on its own.
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> PlannerResult<PlannerState> {
    let mut state = PlannerState::default();

    if let Some(value) = load_json(store, Record::Todos)? {
        state.todos = TodoList::new(decode_or_default(Record::Todos, decode_items(Record::Todos, value)));
    }

    if let Some(value) = load_json(store, Record::Events)? {
        state.events = decode_or_default(Record::Events, decode_day_events(value));
    }

    if let Some(value) = load_json(store, Record::PeriodEvents)? {
        state.period_events =
            decode_or_default(Record::PeriodEvents, decode_items::<PeriodEvent>(Record::PeriodEvents, value));
    }

    if let Some(value) = load_json(store, Record::Settings)? {
        state.settings = AppSettings::from_value_lenient(value);
    }

    Ok(state)
}

pub fn save_record<S: KeyValueStore + ?Sized>(
    store: &mut S,
    state: &PlannerState,
    record: Record,
) -> PlannerResult<()> {
    let json = match record {
        Record::Todos => encode(&state.todos)?,
        Record::Events => encode(&state.events)?,
        Record::PeriodEvents => encode(&state.period_events)?,
        Record::Settings => encode(&state.settings)?,
    };
    store.set(record.key(), &json)
}

pub fn save_all<S: KeyValueStore + ?Sized>(store: &mut S, state: &PlannerState) -> PlannerResult<()> {
    for record in Record::ALL {
        save_record(store, state, record)?;
    }
    Ok(())
}

/// Decode the day-event map, skipping keys or entries that do not parse.
///
/// Fails only when the record is not a JSON object at all.
pub(crate) fn decode_day_events(value: Value) -> Result<DayEvents, String> {
    let Value::Object(entries) = value else {
        return Err("day events must be a JSON object".to_string());
    };

    let mut events = DayEvents::new();
    for (raw_key, raw_event) in entries {
        let key: DayKey = match raw_key.parse() {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("skipping day event: {}", e);
                continue;
            }
        };
        let event: DayEvent = match serde_json::from_value(raw_event) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(key = %raw_key, "skipping malformed day event: {}", e);
                continue;
            }
        };
        if event.is_empty() {
            continue;
        }
        if events.insert(key, event).is_some() {
            tracing::debug!(key = %raw_key, "day key collided with an existing entry");
        }
    }
    Ok(events)
}

/// Decode a list record one item at a time, skipping items that do not parse.
///
/// Fails only when the record is not a JSON array.
fn decode_items<T: DeserializeOwned>(record: Record, value: Value) -> Result<Vec<T>, String> {
    let Value::Array(items) = value else {
        return Err(format!("{} must be a JSON array", record.key()));
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(key = record.key(), index, "skipping malformed item: {}", e);
                None
            }
        })
        .collect())
}

fn load_json<S: KeyValueStore + ?Sized>(store: &S, record: Record) -> PlannerResult<Option<Value>> {
    let Some(raw) = store.get(record.key())? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key = record.key(), "ignoring unreadable record: {}", e);
            Ok(None)
        }
    }
}

fn decode_or_default<T: Default, E: std::fmt::Display>(record: Record, decoded: Result<T, E>) -> T {
    decoded.unwrap_or_else(|e| {
        tracing::warn!(key = record.key(), "falling back to defaults: {}", e);
        T::default()
    })
}

fn encode<T: Serialize + ?Sized>(value: &T) -> PlannerResult<String> {
    Ok(serde_json::to_string(value)?)
}
