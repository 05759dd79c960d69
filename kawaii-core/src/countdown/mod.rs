//! Countdown banner: day deltas, rotation and the recurring timer.

mod rotation;
mod timer;

pub use rotation::{CountdownRotation, schedule};
pub use timer::CountdownTimer;

use std::fmt;

use chrono::NaiveDate;

use crate::settings::Countdown;

/// Whole days from `today` to `target`; negative once the date has passed.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// The three banner forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownMessage {
    Remaining { title: String, days: i64 },
    Today { title: String },
    Ended { title: String },
}

impl CountdownMessage {
    pub fn for_countdown(countdown: &Countdown, today: NaiveDate) -> Self {
        let title = countdown.title.clone();
        match days_until(countdown.date, today) {
            days if days > 0 => CountdownMessage::Remaining { title, days },
            0 => CountdownMessage::Today { title },
            _ => CountdownMessage::Ended { title },
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CountdownMessage::Remaining { title, .. }
            | CountdownMessage::Today { title }
            | CountdownMessage::Ended { title } => title,
        }
    }
}

impl fmt::Display for CountdownMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownMessage::Remaining { title, days: 1 } => {
                write!(f, "{}: 1 day remaining!", title)
            }
            CountdownMessage::Remaining { title, days } => {
                write!(f, "{}: {} days remaining!", title, days)
            }
            CountdownMessage::Today { title } => write!(f, "{} is today! Have fun 🎉", title),
            CountdownMessage::Ended { title } => write!(f, "{} has ended. Well done 🎉", title),
        }
    }
}
