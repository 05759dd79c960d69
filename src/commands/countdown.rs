use std::time::Duration;

use anyhow::Result;
use kawaii_core::countdown::CountdownTimer;
use kawaii_core::{Intent, Interaction};
use owo_colors::OwoColorize;
use tokio::sync::mpsc;

use super::{CliPlanner, list_index, palette, parse_date};
use crate::render::{ThemedRender, render_countdown};

/// How often `watch` looks for settings changed by another process.
const SETTINGS_POLL: Duration = Duration::from_secs(1);

pub fn list(planner: &CliPlanner) {
    let settings = &planner.state().settings;
    let palette = palette(planner);

    println!(
        "{} {}",
        palette.heading("Countdowns"),
        format!("(rotating every {}s)", settings.countdown_interval).dimmed()
    );

    if settings.countdowns.is_empty() {
        println!("  {}", "No countdowns yet".dimmed());
        return;
    }

    let today = planner.today();
    for (i, countdown) in settings.countdowns.iter().enumerate() {
        println!("{}", render_countdown(i + 1, countdown, today));
    }
}

pub fn add(
    planner: &mut CliPlanner,
    ui: &mut dyn Interaction,
    title: String,
    date: &str,
) -> Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("A countdown needs a title");
    }
    let date = parse_date(date, planner.today())?;

    planner.dispatch(Intent::AddCountdown { title, date }, ui)?;
    list(planner);
    Ok(())
}

pub fn remove(planner: &mut CliPlanner, ui: &mut dyn Interaction, number: usize) -> Result<()> {
    let index = list_index(number, planner.state().settings.countdowns.len(), "countdown")?;

    planner.dispatch(Intent::DeleteCountdown(index), ui)?;
    list(planner);
    Ok(())
}

pub fn interval(planner: &mut CliPlanner, ui: &mut dyn Interaction, seconds: i64) -> Result<()> {
    planner.dispatch(Intent::SetCountdownInterval(seconds), ui)?;

    let applied = planner.state().settings.countdown_interval;
    if i64::try_from(applied).ok() != Some(seconds) {
        println!("{}", format!("Using the minimum of {}s", applied).dimmed());
    }
    list(planner);
    Ok(())
}

/// Show the rotating banner until Ctrl-C.
///
/// Picks up countdown changes made by other `kawaii` invocations and
/// restarts the ticker when they happen.
pub async fn watch(mut planner: CliPlanner) -> Result<()> {
    if planner.state().settings.countdowns.is_empty() {
        println!("{}", "No countdowns yet. Add one with `kawaii countdown add`".dimmed());
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<()>();
    let mut timer = CountdownTimer::new();
    let mut generation = planner.countdown_generation();

    show_banner(&mut planner);
    restart_timer(&mut timer, &planner, &tx);

    let mut poll = tokio::time::interval(SETTINGS_POLL);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(()) = rx.recv() => show_banner(&mut planner),
            _ = poll.tick() => {
                planner.reload()?;
                if planner.countdown_generation() != generation {
                    generation = planner.countdown_generation();
                    tracing::debug!(generation, "countdown settings changed");
                    show_banner(&mut planner);
                    restart_timer(&mut timer, &planner, &tx);
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    timer.cancel();
    Ok(())
}

fn restart_timer(timer: &mut CountdownTimer, planner: &CliPlanner, tx: &mpsc::UnboundedSender<()>) {
    let tx = tx.clone();
    timer.restart(planner.countdown_schedule(), move || {
        // The receiver only goes away when `watch` returns.
        let _ = tx.send(());
    });
}

fn show_banner(planner: &mut CliPlanner) {
    let palette = palette(planner);
    match planner.next_countdown() {
        Some(message) => println!("{}", message.render(&palette)),
        None => println!("{}", "No countdowns left".dimmed()),
    }
}
