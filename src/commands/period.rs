use anyhow::Result;
use kawaii_core::{Intent, Interaction};
use owo_colors::OwoColorize;

use super::{CliPlanner, list_index, palette};
use crate::render::Render;

pub fn list(planner: &CliPlanner) {
    let periods = &planner.state().period_events;
    println!("{}", palette(planner).heading("Multi-day events"));

    if periods.is_empty() {
        println!("  {}", "No multi-day events yet".dimmed());
        return;
    }

    for (i, period) in periods.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, period.render());
    }
}

pub fn delete(planner: &mut CliPlanner, ui: &mut dyn Interaction, number: usize) -> Result<()> {
    let periods = &planner.state().period_events;
    let index = list_index(number, periods.len(), "multi-day event")?;
    let id = periods[index].id;

    planner.dispatch(Intent::DeletePeriod(id), ui)?;
    Ok(())
}
