use chrono::NaiveDate;
use kawaii_core::calendar::{DisplayMonth, GridCell};
use kawaii_core::clock::FixedClock;
use kawaii_core::countdown::CountdownMessage;
use kawaii_core::day::DayKey;
use kawaii_core::store::{FileStore, KeyValueStore, MemoryStore};
use kawaii_core::{Intent, Interaction, Planner, PlannerState};

#[derive(Default)]
struct FakeUi {
    answer: bool,
    confirms: usize,
    alerts: Vec<String>,
    notices: Vec<String>,
    celebrations: Vec<String>,
}

impl Interaction for FakeUi {
    fn confirm(&mut self, _message: &str) -> bool {
        self.confirms += 1;
        self.answer
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn celebrate(&mut self, message: &str) {
        self.celebrations.push(message.to_string());
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2025, 3, 14)
}

fn planner_on<S: KeyValueStore>(store: S) -> Planner<S, FixedClock> {
    Planner::load_with_clock(store, FixedClock::on(today())).unwrap()
}

fn save_day(planner: &mut Planner<impl KeyValueStore, FixedClock>, ui: &mut FakeUi, day: NaiveDate, edits: Vec<Intent>) {
    planner.dispatch(Intent::OpenDay(day), ui).unwrap();
    for intent in edits {
        planner.dispatch(intent, ui).unwrap();
    }
    planner.dispatch(Intent::SaveEvent, ui).unwrap();
}

#[test]
fn blank_todo_is_ignored() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();

    planner.dispatch(Intent::AddTodo("first".into()), &mut ui).unwrap();
    planner.dispatch(Intent::AddTodo("".into()), &mut ui).unwrap();
    planner.dispatch(Intent::AddTodo("   \t".into()), &mut ui).unwrap();

    assert_eq!(planner.state().todos.len(), 1);
}

#[test]
fn toggling_twice_restores_completion() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();

    planner.dispatch(Intent::AddTodo("stretch".into()), &mut ui).unwrap();
    planner.dispatch(Intent::AddTodo("read".into()), &mut ui).unwrap();
    let id = planner.state().todos.items()[1].id;

    planner.dispatch(Intent::ToggleTodo(id), &mut ui).unwrap();
    assert!(planner.state().todos.get(id).unwrap().completed);
    planner.dispatch(Intent::ToggleTodo(id), &mut ui).unwrap();

    assert!(!planner.state().todos.get(id).unwrap().completed);
    assert_eq!(planner.state().todos.len(), 2);
    assert_eq!(ui.celebrations.len(), 1);
}

#[test]
fn todo_ids_are_unique_within_one_millisecond() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();

    planner.dispatch(Intent::AddTodo("a".into()), &mut ui).unwrap();
    planner.dispatch(Intent::AddTodo("b".into()), &mut ui).unwrap();

    let items = planner.state().todos.items();
    assert_ne!(items[0].id, items[1].id);
}

#[test]
fn saving_an_empty_day_removes_its_entry() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();
    let day = date(2025, 3, 3);

    save_day(
        &mut planner,
        &mut ui,
        day,
        vec![Intent::SetText("dentist".into()), Intent::ToggleStamp("🎀".into())],
    );
    assert!(planner.state().events.contains_key(&DayKey::new(day)));

    save_day(
        &mut planner,
        &mut ui,
        day,
        vec![Intent::SetText("  ".into()), Intent::ToggleStamp("🎀".into())],
    );
    assert!(planner.state().events.is_empty());
    assert_eq!(planner.store().raw("kawaiiEvents"), Some("{}"));
}

#[test]
fn inverted_period_is_never_added() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();

    save_day(
        &mut planner,
        &mut ui,
        date(2025, 3, 10),
        vec![
            Intent::SetPeriodTitle("Backwards".into()),
            Intent::SetPeriodEnd(Some(date(2025, 3, 9))),
        ],
    );

    assert!(planner.state().period_events.is_empty());
    assert_eq!(ui.alerts.len(), 1);
    assert!(planner.editor().is_open());
}

#[test]
fn single_day_period_is_both_start_and_end() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();
    let day = date(2025, 3, 20);

    save_day(
        &mut planner,
        &mut ui,
        day,
        vec![Intent::SetPeriodTitle("Recital".into())],
    );

    let period = &planner.state().period_events[0];
    assert_eq!(period.start, day);
    assert_eq!(period.end, day);
    assert_eq!(period.len_days(), 1);

    let grid = planner.month_grid();
    let covered: Vec<_> = grid.days().filter(|cell| !cell.bars.is_empty()).collect();
    assert_eq!(covered.len(), 1);
    let segment = covered[0].bars[0].segment;
    assert!(segment.is_start && segment.is_end);
}

#[test]
fn period_bars_span_the_grid() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();

    save_day(
        &mut planner,
        &mut ui,
        date(2025, 3, 30),
        vec![
            Intent::SetPeriodTitle("Spring break".into()),
            Intent::SetPeriodEnd(Some(date(2025, 4, 2))),
        ],
    );

    let march = planner.month_grid();
    let last = march.day(31).unwrap();
    assert!(last.bars[0].segment.is_middle());
    assert!(march.day(30).unwrap().bars[0].segment.is_start);

    planner.dispatch(Intent::NextMonth, &mut ui).unwrap();
    let april = planner.month_grid();
    assert!(april.day(2).unwrap().bars[0].segment.is_end);
    assert!(april.day(3).unwrap().bars.is_empty());
    // April 2025 starts on a Tuesday.
    assert!(matches!(april.cells[0], GridCell::Blank));
    assert!(matches!(april.cells[2], GridCell::Day(_)));
}

#[test]
fn todos_only_restore_leaves_other_records() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();

    save_day(
        &mut planner,
        &mut ui,
        date(2025, 3, 1),
        vec![
            Intent::SetText("market".into()),
            Intent::SetPeriodTitle("Visit".into()),
            Intent::SetPeriodEnd(Some(date(2025, 3, 2))),
        ],
    );
    planner.dispatch(Intent::SetTheme("mint".into()), &mut ui).unwrap();
    planner.dispatch(Intent::AddTodo("old".into()), &mut ui).unwrap();
    let before = planner.state().clone();

    let backup = r#"{"todos":[{"id":7,"text":"restored","completed":true}],"version":1}"#;
    planner.dispatch(Intent::Restore(backup.into()), &mut ui).unwrap();

    let state = planner.state();
    assert_eq!(state.todos.items()[0].text, "restored");
    assert_eq!(state.events, before.events);
    assert_eq!(state.period_events, before.period_events);
    assert_eq!(state.settings, before.settings);
    assert_eq!(ui.notices.len(), 1);
}

#[test]
fn countdown_message_variants() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();

    for (title, day) in [("Today", today()), ("Tomorrow", date(2025, 3, 15)), ("Yesterday", date(2025, 3, 13))] {
        planner
            .dispatch(Intent::AddCountdown { title: title.into(), date: day }, &mut ui)
            .unwrap();
    }

    let messages: Vec<_> = (0..3).filter_map(|_| planner.next_countdown()).collect();
    assert_eq!(messages[0], CountdownMessage::Today { title: "Today".into() });
    assert_eq!(messages[1].to_string(), "Tomorrow: 1 day remaining!");
    assert_eq!(messages[2], CountdownMessage::Ended { title: "Yesterday".into() });

    // Wraps back to the first one.
    assert_eq!(planner.next_countdown().unwrap().title(), "Today");
}

#[test]
fn backup_then_restore_round_trips() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi { answer: true, ..Default::default() };

    planner.dispatch(Intent::AddTodo("buy yarn".into()), &mut ui).unwrap();
    save_day(
        &mut planner,
        &mut ui,
        date(2025, 3, 8),
        vec![
            Intent::SetText("knitting club".into()),
            Intent::ToggleStamp("🌸".into()),
            Intent::StageImage("data:image/png;base64,AAAA".into()),
            Intent::SetPeriodTitle("Festival".into()),
            Intent::SetPeriodEnd(Some(date(2025, 3, 9))),
        ],
    );
    planner.dispatch(Intent::SetBackground(Some("hearts".into())), &mut ui).unwrap();
    planner
        .dispatch(Intent::AddCountdown { title: "Festival".into(), date: date(2025, 3, 8) }, &mut ui)
        .unwrap();
    planner.dispatch(Intent::SetCountdownInterval(5), &mut ui).unwrap();

    let (_, json) = planner.backup().unwrap();
    let expected = planner.state().clone();

    let mut fresh = planner_on(MemoryStore::new());
    fresh.dispatch(Intent::Restore(json), &mut ui).unwrap();
    assert_eq!(fresh.state(), &expected);
}

#[test]
fn declined_prompts_leave_state_unchanged() {
    let mut planner = planner_on(MemoryStore::new());
    let mut ui = FakeUi::default();

    save_day(&mut planner, &mut ui, date(2025, 3, 4), vec![Intent::SetPeriodTitle("Trip".into())]);
    planner
        .dispatch(Intent::AddCountdown { title: "Trip".into(), date: date(2025, 3, 4) }, &mut ui)
        .unwrap();
    let before = planner.state().clone();

    let period_id = before.period_events[0].id;
    planner.dispatch(Intent::DeletePeriod(period_id), &mut ui).unwrap();
    planner.dispatch(Intent::DeleteCountdown(0), &mut ui).unwrap();

    assert_eq!(ui.confirms, 2);
    assert_eq!(planner.state(), &before);
}

#[test]
fn state_survives_a_file_store_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut ui = FakeUi::default();

    {
        let mut planner = planner_on(FileStore::open(dir.path()).unwrap());
        planner.dispatch(Intent::AddTodo("persist me".into()), &mut ui).unwrap();
        save_day(&mut planner, &mut ui, date(2025, 3, 5), vec![Intent::SetText("note".into())]);
        planner.dispatch(Intent::SetTheme("lemon".into()), &mut ui).unwrap();
    }

    let planner = planner_on(FileStore::open(dir.path()).unwrap());
    let state: &PlannerState = planner.state();
    assert_eq!(state.todos.items()[0].text, "persist me");
    assert_eq!(state.settings.theme, "lemon");

    let raw = std::fs::read_to_string(dir.path().join("kawaiiEvents.json")).unwrap();
    assert!(raw.contains("\"2025-3-5\""));
}

#[test]
fn padded_and_unpadded_keys_open_the_same_day() {
    let store = MemoryStore::new().with_entry("kawaiiEvents", r#"{"2025-03-07":{"text":"padded"}}"#);
    let mut planner = planner_on(store);
    let mut ui = FakeUi::default();

    planner.dispatch(Intent::OpenDay(date(2025, 3, 7)), &mut ui).unwrap();
    assert_eq!(planner.editor().session().unwrap().text, "padded");

    planner.dispatch(Intent::ShowMonth(DisplayMonth::new(2025, 3).unwrap()), &mut ui).unwrap();
    assert!(planner.month_grid().day(7).unwrap().has_comment);
}

#[test]
fn saving_after_a_partly_malformed_load_keeps_good_entries() {
    let store = MemoryStore::new()
        .with_entry(
            "kawaiiPeriodEvents",
            r#"[{"id":1,"title":"Good","start":"2025-03-01","end":"2025-03-02"},{"id":2,"title":"Bad","start":"","end":""}]"#,
        )
        .with_entry(
            "kawaiiTodos",
            r#"[{"id":1,"text":"water plants","completed":false},{"text":"missing id"}]"#,
        )
        .with_entry("kawaiiAppSettings", r#"{"theme":"mint","countdowns":[{"title":"x","date":""}]}"#);
    let mut planner = planner_on(store);
    let mut ui = FakeUi::default();

    assert_eq!(planner.state().period_events.len(), 1);
    assert_eq!(planner.state().todos.len(), 1);
    assert_eq!(planner.state().settings.theme, "mint");

    save_day(&mut planner, &mut ui, date(2025, 3, 10), vec![Intent::SetText("tea".into())]);
    planner.dispatch(Intent::AddTodo("repot cactus".into()), &mut ui).unwrap();
    planner.dispatch(Intent::SetCountdownInterval(5), &mut ui).unwrap();

    let reloaded = planner_on(planner.store().clone());
    let state = reloaded.state();
    assert_eq!(state.period_events.len(), 1);
    assert_eq!(state.period_events[0].title, "Good");
    assert_eq!(state.todos.len(), 2);
    assert_eq!(state.todos.items()[0].text, "water plants");
    assert_eq!(state.settings.theme, "mint");
    assert_eq!(state.settings.countdown_interval, 5);
    assert!(state.settings.countdowns.is_empty());
}
