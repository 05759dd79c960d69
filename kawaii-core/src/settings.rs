//! App settings: theme, background and countdowns.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::day::parse_day;

pub const DEFAULT_THEME: &str = "pink";
pub const DEFAULT_COUNTDOWN_INTERVAL: u64 = 3;
/// Longest rotation interval: one day.
pub const MAX_COUNTDOWN_INTERVAL: u64 = 86_400;

/// A target date shown in the countdown banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub title: String,
    #[serde(with = "crate::day::iso")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::day_event::non_empty"
    )]
    pub bg: Option<String>,

    #[serde(default)]
    pub countdowns: Vec<Countdown>,

    /// Seconds between countdown rotations, between 1 and one day.
    #[serde(default = "default_interval", deserialize_with = "lenient_interval")]
    pub countdown_interval: u64,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_interval() -> u64 {
    DEFAULT_COUNTDOWN_INTERVAL
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            theme: default_theme(),
            bg: None,
            countdowns: Vec::new(),
            countdown_interval: DEFAULT_COUNTDOWN_INTERVAL,
        }
    }
}

impl AppSettings {
    /// Decode stored settings, folding a legacy single `countdown` into `countdowns`.
    pub fn from_value(mut value: Value) -> Result<Self, serde_json::Error> {
        if migrate_legacy_countdown(&mut value) {
            tracing::info!("migrated legacy countdown setting");
        }
        serde_json::from_value(value)
    }

    /// Decode stored settings field by field.
    ///
    /// A field that does not decode keeps its default, and a countdown that
    /// does not decode is dropped on its own.
    pub fn from_value_lenient(mut value: Value) -> Self {
        if migrate_legacy_countdown(&mut value) {
            tracing::info!("migrated legacy countdown setting");
        }
        let Value::Object(mut fields) = value else {
            tracing::warn!("settings are not a JSON object, using defaults");
            return AppSettings::default();
        };

        let mut settings = AppSettings::default();
        if let Some(theme) = fields.get("theme").and_then(Value::as_str) {
            settings.apply_theme(theme);
        }
        settings.apply_background(fields.get("bg").and_then(Value::as_str));
        settings.countdown_interval = interval_from(fields.remove("countdownInterval"));

        match fields.remove("countdowns") {
            Some(Value::Array(items)) => {
                settings.countdowns = items
                    .into_iter()
                    .filter_map(|item| match serde_json::from_value::<Countdown>(item) {
                        Ok(countdown) => Some(countdown),
                        Err(e) => {
                            tracing::warn!("skipping malformed countdown: {}", e);
                            None
                        }
                    })
                    .collect();
            }
            Some(Value::Null) | None => {}
            Some(other) => tracing::warn!(value = %other, "ignoring countdowns that are not a list"),
        }

        settings
    }

    /// Root theme attribute, `None` for the default theme.
    pub fn theme_attribute(&self) -> Option<&str> {
        (self.theme != DEFAULT_THEME).then_some(self.theme.as_str())
    }

    pub fn background(&self) -> Option<&str> {
        self.bg.as_deref()
    }

    pub fn apply_theme(&mut self, theme: &str) {
        let theme = theme.trim();
        self.theme = if theme.is_empty() { default_theme() } else { theme.to_string() };
    }

    pub fn apply_background(&mut self, bg: Option<&str>) {
        self.bg = bg.map(str::trim).filter(|b| !b.is_empty()).map(String::from);
    }

    /// Add a countdown; an empty title is ignored.
    pub fn add_countdown(&mut self, title: &str, date: NaiveDate) -> bool {
        if title.trim().is_empty() {
            return false;
        }
        self.countdowns.push(Countdown {
            title: title.to_string(),
            date,
        });
        true
    }

    pub fn remove_countdown(&mut self, index: usize) -> Option<Countdown> {
        (index < self.countdowns.len()).then(|| self.countdowns.remove(index))
    }

    /// Set the rotation interval, clamped to `1..=MAX_COUNTDOWN_INTERVAL`.
    pub fn set_interval(&mut self, seconds: i64) -> u64 {
        self.countdown_interval = clamp_interval(seconds);
        self.countdown_interval
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.countdown_interval.clamp(1, MAX_COUNTDOWN_INTERVAL))
    }
}

fn clamp_interval(seconds: i64) -> u64 {
    seconds.clamp(1, MAX_COUNTDOWN_INTERVAL as i64) as u64
}

// Zero or a non-number falls back to the default; other values are clamped.
fn lenient_interval<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(interval_from(Option::<Value>::deserialize(deserializer)?))
}

fn interval_from(value: Option<Value>) -> u64 {
    let seconds = value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    });

    match seconds {
        // `as` saturates, so huge values land on the upper clamp.
        Some(s) if s.is_finite() && s != 0.0 => clamp_interval(s as i64),
        _ => DEFAULT_COUNTDOWN_INTERVAL,
    }
}

/// Older settings carried one `countdown` object instead of a list.
///
/// Returns true when the value was rewritten.
fn migrate_legacy_countdown(value: &mut Value) -> bool {
    let Some(obj) = value.as_object_mut() else {
        return false;
    };

    let has_list = obj.get("countdowns").is_some_and(|v| !v.is_null());
    let has_legacy = obj.get("countdown").is_some_and(|v| v.is_object());
    if has_list || !has_legacy {
        return false;
    }

    let legacy = obj.remove("countdown").unwrap_or(Value::Null);
    let title = legacy.get("title").and_then(Value::as_str).unwrap_or_default();
    let date = legacy.get("date").and_then(Value::as_str).and_then(parse_day);

    let countdowns = match date {
        Some(_) if !title.is_empty() => vec![legacy],
        _ => Vec::new(),
    };

    obj.insert("countdowns".into(), Value::Array(countdowns));
    obj.insert("countdownInterval".into(), Value::from(DEFAULT_COUNTDOWN_INTERVAL));
    true
}
