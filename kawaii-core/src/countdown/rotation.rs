use std::time::Duration;

use chrono::NaiveDate;

use super::CountdownMessage;
use crate::settings::{AppSettings, Countdown};

/// Which countdown the banner shows next.
#[derive(Debug, Clone, Default)]
pub struct CountdownRotation {
    index: usize,
}

impl CountdownRotation {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Evaluate the current countdown and move on to the next one.
    ///
    /// The index wraps to the front when the list has shrunk under it.
    pub fn advance(&mut self, countdowns: &[Countdown], today: NaiveDate) -> Option<CountdownMessage> {
        if countdowns.is_empty() {
            return None;
        }
        if self.index >= countdowns.len() {
            self.index = 0;
        }

        let message = CountdownMessage::for_countdown(&countdowns[self.index], today);
        self.index += 1;
        Some(message)
    }
}

/// Repeat period for the ticker, `None` unless there is something to rotate.
pub fn schedule(settings: &AppSettings) -> Option<Duration> {
    (settings.countdowns.len() > 1).then(|| settings.interval())
}
