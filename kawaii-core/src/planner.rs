//! The planner controller.
//!
//! `Planner` owns the application state, the store it is persisted to and
//! the transient UI state (displayed month, editor, countdown rotation).
//! Front ends never mutate the records directly: they translate user input
//! into [`Intent`] values and hand them to [`Planner::dispatch`], and the
//! planner talks back only through the [`Interaction`] capability.

use std::time::Duration;

use chrono::NaiveDate;

use crate::backup::{Backup, RestorePayload, backup_filename};
use crate::calendar::{DisplayMonth, MonthGrid};
use crate::clock::{Clock, SystemClock};
use crate::countdown::{self, CountdownMessage, CountdownRotation};
use crate::editor::{Editor, EditorError, EditorSession};
use crate::error::{PlannerError, PlannerResult};
use crate::state::PlannerState;
use crate::store::{KeyValueStore, Record, load_state, save_all, save_record};
use crate::todo::celebration_message;

/// What the planner needs from whoever is showing it.
pub trait Interaction {
    /// Ask a yes/no question. Returning false cancels the action.
    fn confirm(&mut self, message: &str) -> bool;

    /// Report a successful action.
    fn notify(&mut self, message: &str);

    /// Report a failure the user has to act on.
    fn alert(&mut self, message: &str);

    /// Show the completion celebration for about two seconds.
    fn celebrate(&mut self, message: &str);
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    PrevMonth,
    NextMonth,
    ShowMonth(DisplayMonth),
    ShowCurrentMonth,

    OpenDay(NaiveDate),
    CloseEditor,
    SetText(String),
    ToggleStamp(String),
    StageImage(String),
    RemoveImage,
    SetPeriodTitle(String),
    SetPeriodEnd(Option<NaiveDate>),
    SaveEvent,
    DeletePeriod(i64),

    AddTodo(String),
    ToggleTodo(i64),
    DeleteTodo(i64),

    SetTheme(String),
    SetBackground(Option<String>),
    AddCountdown { title: String, date: NaiveDate },
    DeleteCountdown(usize),
    SetCountdownInterval(i64),

    /// Contents of a backup file.
    Restore(String),
}

pub struct Planner<S, C = SystemClock> {
    store: S,
    clock: C,
    state: PlannerState,
    month: DisplayMonth,
    editor: Editor,
    rotation: CountdownRotation,
    countdown_generation: u64,
}

impl<S: KeyValueStore> Planner<S, SystemClock> {
    pub fn load(store: S) -> PlannerResult<Self> {
        Self::load_with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> Planner<S, C> {
    pub fn load_with_clock(store: S, clock: C) -> PlannerResult<Self> {
        let state = load_state(&store)?;
        let month = DisplayMonth::containing(clock.today());

        tracing::debug!(
            todos = state.todos.len(),
            events = state.events.len(),
            periods = state.period_events.len(),
            "planner loaded"
        );

        Ok(Planner {
            store,
            clock,
            state,
            month,
            editor: Editor::default(),
            rotation: CountdownRotation::default(),
            countdown_generation: 0,
        })
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn month(&self) -> DisplayMonth {
        self.month
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn month_grid(&self) -> MonthGrid {
        MonthGrid::build(
            self.month,
            self.clock.today(),
            &self.state.events,
            &self.state.period_events,
        )
    }

    /// File name and pretty-printed contents of a backup of the whole state.
    pub fn backup(&self) -> PlannerResult<(String, String)> {
        let json = Backup::of(&self.state).to_json()?;
        Ok((backup_filename(self.clock.today()), json))
    }

    /// The banner for this tick; advances the rotation.
    pub fn next_countdown(&mut self) -> Option<CountdownMessage> {
        let today = self.clock.today();
        self.rotation.advance(&self.state.settings.countdowns, today)
    }

    /// How often the banner should rotate, `None` for a static banner.
    pub fn countdown_schedule(&self) -> Option<Duration> {
        countdown::schedule(&self.state.settings)
    }

    /// Bumped on every change that requires the countdown timer to restart.
    pub fn countdown_generation(&self) -> u64 {
        self.countdown_generation
    }

    /// Re-read every record from the store, keeping the transient UI state.
    pub fn reload(&mut self) -> PlannerResult<()> {
        let state = load_state(&self.store)?;
        if state.settings != self.state.settings {
            self.countdown_generation += 1;
        }
        self.state = state;
        Ok(())
    }

    /// Apply one intent.
    ///
    /// Problems the user can fix (an inverted date range, a damaged backup)
    /// are reported through [`Interaction::alert`] and leave the state
    /// untouched; only storage failures come back as errors.
    pub fn dispatch(&mut self, intent: Intent, ui: &mut dyn Interaction) -> PlannerResult<()> {
        tracing::trace!(?intent, "dispatch");

        match intent {
            Intent::PrevMonth => self.month = self.month.prev(),
            Intent::NextMonth => self.month = self.month.next(),
            Intent::ShowMonth(month) => self.month = month,
            Intent::ShowCurrentMonth => self.month = DisplayMonth::containing(self.clock.today()),

            Intent::OpenDay(date) => self.editor.open(date, &self.state.events),
            Intent::CloseEditor => self.editor.close(),
            Intent::SetText(text) => self.with_session(|s| s.text = text),
            Intent::ToggleStamp(stamp) => self.with_session(|s| s.toggle_stamp(&stamp)),
            Intent::StageImage(data_uri) => self.with_session(|s| s.stage_image(data_uri)),
            Intent::RemoveImage => self.with_session(|s| s.remove_image()),
            Intent::SetPeriodTitle(title) => self.with_session(|s| s.period_title = title),
            Intent::SetPeriodEnd(end) => self.with_session(|s| s.period_end = end),
            Intent::SaveEvent => self.save_event(ui)?,
            Intent::DeletePeriod(id) => self.delete_period(id, ui)?,

            Intent::AddTodo(text) => self.add_todo(&text)?,
            Intent::ToggleTodo(id) => self.toggle_todo(id, ui)?,
            Intent::DeleteTodo(id) => {
                if self.state.todos.delete(id) {
                    self.persist(Record::Todos)?;
                }
            }

            Intent::SetTheme(theme) => {
                self.state.settings.apply_theme(&theme);
                self.persist(Record::Settings)?;
            }
            Intent::SetBackground(bg) => {
                self.state.settings.apply_background(bg.as_deref());
                self.persist(Record::Settings)?;
            }
            Intent::AddCountdown { title, date } => {
                if self.state.settings.add_countdown(&title, date) {
                    self.settings_changed()?;
                }
            }
            Intent::DeleteCountdown(index) => self.delete_countdown(index, ui)?,
            Intent::SetCountdownInterval(seconds) => {
                self.state.settings.set_interval(seconds);
                self.settings_changed()?;
            }

            Intent::Restore(json) => self.restore(&json, ui)?,
        }

        Ok(())
    }

    // =========================================================================
    // Intent handlers
    // =========================================================================

    fn with_session(&mut self, edit: impl FnOnce(&mut EditorSession)) {
        match self.editor.session_mut() {
            Some(session) => edit(session),
            None => tracing::debug!("editor is closed, ignoring edit"),
        }
    }

    fn save_event(&mut self, ui: &mut dyn Interaction) -> PlannerResult<()> {
        let new_id = self.clock.now_millis();
        let outcome = match self.editor.save(
            &mut self.state.events,
            &mut self.state.period_events,
            new_id,
        ) {
            Ok(outcome) => outcome,
            Err(e @ EditorError::EndBeforeStart { .. }) => {
                ui.alert(&e.to_string());
                return Ok(());
            }
            Err(EditorError::NotOpen) => {
                tracing::debug!("save requested with no day open");
                return Ok(());
            }
        };

        tracing::info!(
            date = %outcome.date,
            day_saved = outcome.day_saved,
            period = outcome.period.as_ref().map(|p| p.id),
            "saved day"
        );

        self.persist(Record::Events)?;
        self.persist(Record::PeriodEvents)?;
        Ok(())
    }

    fn delete_period(&mut self, id: i64, ui: &mut dyn Interaction) -> PlannerResult<()> {
        let Some(period) = self.state.period_events.iter().find(|p| p.id == id) else {
            return Ok(());
        };

        if !ui.confirm(&format!("Delete \"{}\"?", period.title)) {
            return Ok(());
        }

        self.state.period_events.retain(|p| p.id != id);
        self.persist(Record::PeriodEvents)
    }

    fn add_todo(&mut self, text: &str) -> PlannerResult<()> {
        let now = self.clock.now_millis();
        if self.state.todos.add(text, now).is_none() {
            return Ok(());
        }
        self.persist(Record::Todos)
    }

    fn toggle_todo(&mut self, id: i64, ui: &mut dyn Interaction) -> PlannerResult<()> {
        let Some(completed) = self.state.todos.toggle(id) else {
            return Ok(());
        };
        if completed {
            ui.celebrate(celebration_message());
        }
        self.persist(Record::Todos)
    }

    fn delete_countdown(&mut self, index: usize, ui: &mut dyn Interaction) -> PlannerResult<()> {
        let Some(countdown) = self.state.settings.countdowns.get(index) else {
            return Ok(());
        };

        if !ui.confirm(&format!("Delete the countdown to \"{}\"?", countdown.title)) {
            return Ok(());
        }

        self.state.settings.remove_countdown(index);
        self.settings_changed()
    }

    fn restore(&mut self, json: &str, ui: &mut dyn Interaction) -> PlannerResult<()> {
        let payload = match RestorePayload::parse(json) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("restore failed: {}", e);
                ui.alert("The backup looks damaged, nothing was restored.");
                return Ok(());
            }
        };

        payload.apply(&mut self.state);
        save_all(&mut self.store, &self.state)?;
        self.countdown_generation += 1;

        ui.notify("Restore complete! Welcome back 🎀");
        Ok(())
    }

    fn settings_changed(&mut self) -> PlannerResult<()> {
        self.countdown_generation += 1;
        self.persist(Record::Settings)
    }

    fn persist(&mut self, record: Record) -> PlannerResult<()> {
        save_record(&mut self.store, &self.state, record).map_err(|e| match e {
            PlannerError::Io(io) => PlannerError::Storage(format!("{}: {}", record.key(), io)),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;

    #[derive(Default)]
    struct Recorder {
        answer: bool,
        confirms: Vec<String>,
        alerts: Vec<String>,
        notices: Vec<String>,
        celebrations: usize,
    }

    impl Interaction for Recorder {
        fn confirm(&mut self, message: &str) -> bool {
            self.confirms.push(message.to_string());
            self.answer
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn celebrate(&mut self, _message: &str) {
            self.celebrations += 1;
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planner() -> Planner<MemoryStore, FixedClock> {
        Planner::load_with_clock(MemoryStore::new(), FixedClock::on(date(2024, 10, 16))).unwrap()
    }

    #[test]
    fn starts_on_current_month() {
        let p = planner();
        assert_eq!(p.month(), DisplayMonth::new(2024, 10).unwrap());
    }

    #[test]
    fn month_navigation() {
        let mut p = planner();
        let mut ui = Recorder::default();

        p.dispatch(Intent::NextMonth, &mut ui).unwrap();
        p.dispatch(Intent::NextMonth, &mut ui).unwrap();
        p.dispatch(Intent::NextMonth, &mut ui).unwrap();
        assert_eq!(p.month(), DisplayMonth::new(2025, 1).unwrap());

        p.dispatch(Intent::ShowCurrentMonth, &mut ui).unwrap();
        assert_eq!(p.month(), DisplayMonth::new(2024, 10).unwrap());
    }

    #[test]
    fn completing_a_todo_celebrates_once() {
        let mut p = planner();
        let mut ui = Recorder::default();

        p.dispatch(Intent::AddTodo("laundry".into()), &mut ui).unwrap();
        let id = p.state().todos.items()[0].id;

        p.dispatch(Intent::ToggleTodo(id), &mut ui).unwrap();
        p.dispatch(Intent::ToggleTodo(id), &mut ui).unwrap();
        assert_eq!(ui.celebrations, 1);
        assert!(p.store().raw("kawaiiTodos").unwrap().contains("laundry"));
    }

    #[test]
    fn edits_without_open_editor_are_ignored() {
        let mut p = planner();
        let mut ui = Recorder::default();

        p.dispatch(Intent::SetText("lost".into()), &mut ui).unwrap();
        p.dispatch(Intent::SaveEvent, &mut ui).unwrap();
        assert!(p.state().events.is_empty());
        assert!(p.store().raw("kawaiiEvents").is_none());
    }

    #[test]
    fn declined_confirmation_keeps_period() {
        let mut p = planner();
        let mut ui = Recorder::default();

        p.dispatch(Intent::OpenDay(date(2024, 10, 1)), &mut ui).unwrap();
        p.dispatch(Intent::SetPeriodTitle("Trip".into()), &mut ui).unwrap();
        p.dispatch(Intent::SetPeriodEnd(Some(date(2024, 10, 3))), &mut ui).unwrap();
        p.dispatch(Intent::SaveEvent, &mut ui).unwrap();
        let id = p.state().period_events[0].id;

        p.dispatch(Intent::DeletePeriod(id), &mut ui).unwrap();
        assert_eq!(ui.confirms, ["Delete \"Trip\"?"]);
        assert_eq!(p.state().period_events.len(), 1);

        ui.answer = true;
        p.dispatch(Intent::DeletePeriod(id), &mut ui).unwrap();
        assert!(p.state().period_events.is_empty());
        assert_eq!(p.store().raw("kawaiiPeriodEvents"), Some("[]"));
    }

    #[test]
    fn inverted_period_alerts_and_keeps_editor_open() {
        let mut p = planner();
        let mut ui = Recorder::default();

        p.dispatch(Intent::OpenDay(date(2024, 10, 5)), &mut ui).unwrap();
        p.dispatch(Intent::SetText("note".into()), &mut ui).unwrap();
        p.dispatch(Intent::SetPeriodTitle("Trip".into()), &mut ui).unwrap();
        p.dispatch(Intent::SetPeriodEnd(Some(date(2024, 10, 4))), &mut ui).unwrap();

        p.dispatch(Intent::SaveEvent, &mut ui).unwrap();
        assert_eq!(ui.alerts.len(), 1);
        assert!(ui.alerts[0].contains("must be on or after"));
        assert!(p.editor().is_open());
        assert!(p.state().events.is_empty());
        assert!(p.state().period_events.is_empty());
    }

    #[test]
    fn countdown_changes_restart_the_ticker() {
        let mut p = planner();
        let mut ui = Recorder { answer: true, ..Default::default() };
        let start = p.countdown_generation();

        p.dispatch(
            Intent::AddCountdown {
                title: "Exam".into(),
                date: date(2024, 10, 17),
            },
            &mut ui,
        )
        .unwrap();
        assert_eq!(p.countdown_schedule(), None);

        p.dispatch(
            Intent::AddCountdown {
                title: "Trip".into(),
                date: date(2024, 10, 16),
            },
            &mut ui,
        )
        .unwrap();
        p.dispatch(Intent::SetCountdownInterval(0), &mut ui).unwrap();
        assert_eq!(p.countdown_schedule(), Some(Duration::from_secs(1)));

        let first = p.next_countdown().unwrap();
        assert!(first.to_string().contains("1 day remaining"));
        let second = p.next_countdown().unwrap();
        assert_eq!(second, CountdownMessage::Today { title: "Trip".into() });

        p.dispatch(Intent::DeleteCountdown(0), &mut ui).unwrap();
        assert_eq!(p.state().settings.countdowns.len(), 1);
        assert_eq!(p.countdown_generation(), start + 4);
    }

    #[test]
    fn out_of_range_countdown_delete_does_not_prompt() {
        let mut p = planner();
        let mut ui = Recorder::default();

        p.dispatch(Intent::DeleteCountdown(3), &mut ui).unwrap();
        assert!(ui.confirms.is_empty());
    }

    #[test]
    fn malformed_restore_changes_nothing() {
        let mut p = planner();
        let mut ui = Recorder::default();
        p.dispatch(Intent::AddTodo("keep me".into()), &mut ui).unwrap();
        let before = p.state().clone();

        p.dispatch(Intent::Restore("{ broken".into()), &mut ui).unwrap();
        assert_eq!(ui.alerts.len(), 1);
        assert!(ui.notices.is_empty());
        assert_eq!(p.state(), &before);
    }

    #[test]
    fn backup_file_is_named_after_today() {
        let p = planner();
        let (name, json) = p.backup().unwrap();
        assert_eq!(name, "kawaii_plan_backup_20241016.json");
        assert!(json.contains("\"version\": 1"));
    }
}
