//! The day editor.
//!
//! The editor is either closed or open on one date. An open session holds
//! the staged note, stamp and image for that day plus an optional request to
//! create a multi-day event starting on it.

use chrono::NaiveDate;
use thiserror::Error;

use crate::day::DayKey;
use crate::day_event::{DayEvent, DayEvents};
use crate::period::PeriodEvent;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("The end date ({end}) must be on or after the start date ({start})")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("No day is open in the editor")]
    NotOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    date: NaiveDate,
    pub text: String,
    stamp: Option<String>,
    image: Option<String>,
    pub period_title: String,
    pub period_end: Option<NaiveDate>,
}

impl EditorSession {
    /// Start a session on `date`, hydrated from any existing entry.
    pub fn open(date: NaiveDate, events: &DayEvents) -> Self {
        let existing = events.get(&DayKey::new(date));

        EditorSession {
            date,
            text: existing.and_then(|e| e.text.clone()).unwrap_or_default(),
            stamp: existing.and_then(|e| e.stamp.clone()),
            image: existing.and_then(|e| e.image.clone()),
            period_title: String::new(),
            period_end: Some(date),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn stamp(&self) -> Option<&str> {
        self.stamp.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Picking the selected stamp again clears it.
    pub fn toggle_stamp(&mut self, stamp: &str) {
        if self.stamp.as_deref() == Some(stamp) {
            self.stamp = None;
        } else {
            self.stamp = Some(stamp.to_string());
        }
    }

    pub fn stage_image(&mut self, data_uri: String) {
        self.image = Some(data_uri);
    }

    pub fn remove_image(&mut self) {
        self.image = None;
    }

    /// The validated multi-day request, if the sub-form was filled in.
    pub fn period_request(&self) -> Result<Option<(String, NaiveDate)>, EditorError> {
        let title = self.period_title.trim();
        let Some(end) = self.period_end else {
            return Ok(None);
        };
        if title.is_empty() {
            return Ok(None);
        }
        if end < self.date {
            return Err(EditorError::EndBeforeStart {
                start: self.date,
                end,
            });
        }
        Ok(Some((title.to_string(), end)))
    }

    /// Write the session into the records.
    ///
    /// Validation runs first, so an invalid range leaves both records untouched.
    pub fn commit(
        &self,
        events: &mut DayEvents,
        periods: &mut Vec<PeriodEvent>,
        new_id: i64,
    ) -> Result<SaveOutcome, EditorError> {
        let request = self.period_request()?;

        let key = DayKey::new(self.date);
        let day = DayEvent::from_parts(Some(self.text.clone()), self.stamp.clone(), self.image.clone());
        let day_saved = day.is_some();
        match day {
            Some(event) => {
                events.insert(key, event);
            }
            None => {
                events.remove(&key);
            }
        }

        let period = request.map(|(title, end)| {
            let period = PeriodEvent {
                id: new_id,
                title,
                start: self.date,
                end,
            };
            periods.push(period.clone());
            period
        });

        Ok(SaveOutcome {
            date: self.date,
            day_saved,
            period,
        })
    }
}

/// What a successful save changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub date: NaiveDate,
    /// False when the day's entry was removed instead.
    pub day_saved: bool,
    pub period: Option<PeriodEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Editor {
    #[default]
    Closed,
    Open(EditorSession),
}

impl Editor {
    pub fn open(&mut self, date: NaiveDate, events: &DayEvents) {
        *self = Editor::Open(EditorSession::open(date, events));
    }

    pub fn close(&mut self) {
        *self = Editor::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Editor::Open(_))
    }

    pub fn session(&self) -> Option<&EditorSession> {
        match self {
            Editor::Open(session) => Some(session),
            Editor::Closed => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut EditorSession> {
        match self {
            Editor::Open(session) => Some(session),
            Editor::Closed => None,
        }
    }

    /// Commit the open session and close. On error the editor stays open.
    pub fn save(
        &mut self,
        events: &mut DayEvents,
        periods: &mut Vec<PeriodEvent>,
        new_id: i64,
    ) -> Result<SaveOutcome, EditorError> {
        let session = self.session().ok_or(EditorError::NotOpen)?;
        let outcome = session.commit(events, periods, new_id)?;
        self.close();
        Ok(outcome)
    }
}
