//! Terminal rendering for planner types.
//!
//! Plain extension traits over kawaii-core types, colored with owo_colors.
//! Anything that depends on the chosen theme takes a [`Palette`].

use chrono::NaiveDate;
use kawaii_core::calendar::{DAYS_PER_WEEK, DayCell, GridCell, MonthGrid, PeriodBar};
use kawaii_core::countdown::CountdownMessage;
use kawaii_core::day_event::DayEvent;
use kawaii_core::period::PeriodEvent;
use kawaii_core::settings::{AppSettings, Countdown};
use kawaii_core::stamp::Stamp;
use kawaii_core::todo::TodoList;
use owo_colors::{AnsiColors, OwoColorize};

/// Columns taken by one day cell.
const CELL_WIDTH: usize = 6;

const WEEKDAYS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Rendering that follows the theme and background settings.
pub trait ThemedRender {
    fn render(&self, palette: &Palette) -> String;
}

/// Colors and border pattern derived from the app settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    accent: AnsiColors,
    pattern: Option<&'static str>,
}

impl Palette {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Palette {
            accent: theme_color(&settings.theme),
            pattern: background_pattern(settings.background()),
        }
    }

    pub fn accent(&self, text: &str) -> String {
        text.color(self.accent).to_string()
    }

    pub fn heading(&self, text: &str) -> String {
        text.color(self.accent).bold().to_string()
    }

    /// A decorative line `width` columns wide.
    pub fn border(&self, width: usize) -> String {
        let line = match self.pattern {
            Some(pattern) => pattern.chars().cycle().take(width).collect::<String>(),
            None => "─".repeat(width),
        };
        line.color(self.accent).dimmed().to_string()
    }
}

fn theme_color(theme: &str) -> AnsiColors {
    match theme {
        "blue" => AnsiColors::BrightBlue,
        "mint" => AnsiColors::BrightGreen,
        "lavender" => AnsiColors::Magenta,
        "lemon" => AnsiColors::BrightYellow,
        _ => AnsiColors::BrightMagenta,
    }
}

fn background_pattern(bg: Option<&str>) -> Option<&'static str> {
    match bg? {
        "dots" => Some("· "),
        "stripes" => Some("╱"),
        "hearts" => Some("♡ "),
        "stars" => Some("☆ "),
        _ => None,
    }
}

// =============================================================================
// Calendar
// =============================================================================

impl ThemedRender for MonthGrid {
    fn render(&self, palette: &Palette) -> String {
        let width = CELL_WIDTH * DAYS_PER_WEEK;
        let mut lines = Vec::new();

        lines.push(palette.border(width));
        lines.push(palette.heading(&format!("{:^width$}", self.month.label())));

        let header: String = WEEKDAYS.iter().map(|d| format!("{:>4}  ", d)).collect();
        lines.push(header.dimmed().to_string());

        for week in self.weeks() {
            lines.extend(render_week(week, palette));
        }

        lines.push(palette.border(width));

        let legend = period_legend(self);
        if !legend.is_empty() {
            lines.push(String::new());
            lines.extend(legend);
        }

        lines.join("\n")
    }
}

/// Day numbers, markers, then one bar line per period seen this week.
///
/// A period keeps the same line for the whole week. Its title is shown on
/// the first covered cell of the week, so bars that continue from an earlier
/// week or month stay labeled.
fn render_week(week: &[GridCell], palette: &Palette) -> Vec<String> {
    let mut rows: Vec<i64> = Vec::new();
    for cell in week {
        if let GridCell::Day(day) = cell {
            for bar in &day.bars {
                if !rows.contains(&bar.period_id) {
                    rows.push(bar.period_id);
                }
            }
        }
    }

    let blank = " ".repeat(CELL_WIDTH);
    let mut numbers = String::new();
    let mut markers = String::new();
    let mut bars = vec![String::new(); rows.len()];
    let mut covered = vec![false; rows.len()];

    for cell in week {
        match cell {
            GridCell::Blank => {
                numbers.push_str(&blank);
                markers.push_str(&blank);
                for (line, seen) in bars.iter_mut().zip(covered.iter_mut()) {
                    line.push_str(&blank);
                    *seen = false;
                }
            }
            GridCell::Day(day) => {
                numbers.push_str(&render_day_number(day, palette));
                markers.push_str(&render_markers(day));
                for (row, period_id) in rows.iter().enumerate() {
                    match day.bars.iter().find(|bar| bar.period_id == *period_id) {
                        Some(bar) => {
                            bars[row].push_str(&palette.accent(&bar_text(bar, !covered[row])));
                            covered[row] = true;
                        }
                        None => {
                            bars[row].push_str(&blank);
                            covered[row] = false;
                        }
                    }
                }
            }
        }
    }

    let mut lines = vec![numbers, markers];
    lines.extend(bars);
    lines
}

fn render_day_number(day: &DayCell, palette: &Palette) -> String {
    let number = format!("{:>3}", day.day());
    let number = if day.is_today {
        number.color(palette.accent).bold().reversed().to_string()
    } else {
        number
    };

    // Sticker glyphs are double width.
    let stamp = day.stamp.as_deref().unwrap_or("  ");
    format!("{} {}", number, stamp)
}

fn render_markers(day: &DayCell) -> String {
    let comment = if day.has_comment { "•" } else { " " };
    let image = if day.has_image { "▣" } else { " " };
    format!("  {}{}  ", comment, image)
}

/// Exactly `CELL_WIDTH` columns of bar for one day.
fn bar_text(bar: &PeriodBar, labeled: bool) -> String {
    let segment = bar.segment;
    let room = CELL_WIDTH - 1 - usize::from(segment.is_end);

    let label: String = if labeled {
        bar.title.chars().take(room).collect()
    } else {
        String::new()
    };
    let open = if labeled && segment.is_start { "[" } else { "━" };
    let close = if segment.is_end { "]" } else { "" };
    let fill = if segment.is_start && segment.is_end { " " } else { "━" };

    format!("{}{}{}{}", open, label, fill.repeat(room - label.chars().count()), close)
}

/// Titles of every period visible in the grid, in first-seen order.
fn period_legend(grid: &MonthGrid) -> Vec<String> {
    let mut seen: Vec<(i64, &str)> = Vec::new();
    for bar in grid.days().flat_map(|day| day.bars.iter()) {
        if !seen.iter().any(|(id, _)| *id == bar.period_id) {
            seen.push((bar.period_id, bar.title.as_str()));
        }
    }

    seen.into_iter()
        .map(|(_, title)| format!("  {} {}", "━".dimmed(), title))
        .collect()
}

// =============================================================================
// Days and periods
// =============================================================================

/// One day with everything attached to it.
pub struct DayView<'a> {
    pub date: NaiveDate,
    pub event: Option<&'a DayEvent>,
    pub periods: Vec<&'a PeriodEvent>,
}

impl ThemedRender for DayView<'_> {
    fn render(&self, palette: &Palette) -> String {
        let mut lines = vec![palette.heading(&self.date.format("%A, %B %-d %Y").to_string())];

        match self.event {
            Some(event) => {
                if let Some(stamp) = &event.stamp {
                    lines.push(format!("  {} {}", "stamp".dimmed(), stamp));
                }
                if let Some(text) = &event.text {
                    lines.push(format!("  {} {}", "note ".dimmed(), text));
                }
                if let Some(image) = &event.image {
                    lines.push(format!("  {} {}", "image".dimmed(), describe_image(image)));
                }
            }
            None => lines.push(format!("  {}", "Nothing planned yet".dimmed())),
        }

        for period in &self.periods {
            lines.push(format!("  {} {}", palette.accent("━"), period.render()));
        }

        lines.join("\n")
    }
}

fn describe_image(data_uri: &str) -> String {
    let mime = data_uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("attached");
    format!("{} ({} bytes encoded)", mime, data_uri.len())
}

impl Render for PeriodEvent {
    fn render(&self) -> String {
        let days = self.len_days().max(0);
        let range = if self.start == self.end {
            self.start.to_string()
        } else {
            format!("{} → {}", self.start, self.end)
        };
        format!(
            "{} {} {}",
            self.title.bold(),
            range,
            format!("({} {})", days, pluralize("day", days)).dimmed()
        )
    }
}

impl Render for Stamp {
    fn render(&self) -> String {
        format!("{} {}", self.glyph, self.name)
    }
}

// =============================================================================
// Todos
// =============================================================================

impl ThemedRender for TodoList {
    fn render(&self, palette: &Palette) -> String {
        let remaining = self.remaining();
        let mut lines = vec![format!(
            "{} {}",
            palette.heading("Todo"),
            format!("({} left)", remaining).dimmed()
        )];

        if self.is_empty() {
            lines.push(format!("  {}", "Nothing to do yet ✨".dimmed()));
        }

        for (i, todo) in self.items().iter().enumerate() {
            let line = if todo.completed {
                format!(
                    "{} {}",
                    palette.accent("[x]"),
                    todo.text.strikethrough().dimmed()
                )
            } else {
                format!("[ ] {}", todo.text)
            };
            lines.push(format!("  {:>2}. {}", i + 1, line));
        }

        lines.join("\n")
    }
}

// =============================================================================
// Countdowns
// =============================================================================

impl ThemedRender for CountdownMessage {
    fn render(&self, palette: &Palette) -> String {
        let icon = match self {
            CountdownMessage::Remaining { .. } => "⏳",
            CountdownMessage::Today { .. } | CountdownMessage::Ended { .. } => "🎀",
        };
        format!("{} {}", icon, palette.heading(&self.to_string()))
    }
}

/// A numbered countdown row.
pub fn render_countdown(number: usize, countdown: &Countdown, today: NaiveDate) -> String {
    let message = CountdownMessage::for_countdown(countdown, today);
    format!(
        "  {:>2}. {} {} {}",
        number,
        countdown.title.bold(),
        countdown.date,
        format!("({})", message).dimmed()
    )
}

fn pluralize(word: &str, count: i64) -> String {
    if count == 1 { word.to_string() } else { format!("{}s", word) }
}
