use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::settings::MAX_COUNTDOWN_INTERVAL;

/// Handle to the one recurring countdown task.
///
/// `restart` aborts the running task before spawning its replacement, and
/// dropping the handle aborts it too, so two tickers never coexist.
#[derive(Debug, Default)]
pub struct CountdownTimer {
    handle: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the running ticker. With `period == None` the timer just stops.
    ///
    /// The first call to `on_tick` happens one period after the restart.
    /// Periods longer than a day are shortened to one day.
    /// Must be called from within a tokio runtime.
    pub fn restart<F>(&mut self, period: Option<Duration>, mut on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.cancel();

        let Some(period) = period else {
            return;
        };
        let period = period.min(Duration::from_secs(MAX_COUNTDOWN_INTERVAL));

        tracing::debug!(?period, "starting countdown ticker");
        self.handle = Some(tokio::spawn(async move {
            let now = Instant::now();
            let mut ticker = interval_at(now.checked_add(period).unwrap_or(now), period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                on_tick();
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
