use anyhow::{Context, Result};
use kawaii_core::calendar::DisplayMonth;
use kawaii_core::{Intent, Interaction};

use super::{CliPlanner, palette};
use crate::render::ThemedRender;

pub fn run(
    planner: &mut CliPlanner,
    ui: &mut dyn Interaction,
    year: Option<i32>,
    month: Option<u32>,
    prev: bool,
    next: bool,
) -> Result<()> {
    if let Some(month) = month {
        let year = year.unwrap_or_else(|| planner.month().year());
        let shown = DisplayMonth::new(year, month)
            .with_context(|| format!("There is no month {} in {}", month, year))?;
        planner.dispatch(Intent::ShowMonth(shown), ui)?;
    }

    if prev {
        planner.dispatch(Intent::PrevMonth, ui)?;
    }
    if next {
        planner.dispatch(Intent::NextMonth, ui)?;
    }

    let palette = palette(planner);
    println!("{}", planner.month_grid().render(&palette));

    if let Some(banner) = planner.next_countdown() {
        println!();
        println!("{}", banner.render(&palette));
    }

    Ok(())
}
