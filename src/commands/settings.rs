use anyhow::Result;
use kawaii_core::{Intent, Interaction};

use super::{CliPlanner, palette};

pub fn theme(planner: &mut CliPlanner, ui: &mut dyn Interaction, name: String) -> Result<()> {
    planner.dispatch(Intent::SetTheme(name), ui)?;

    let settings = &planner.state().settings;
    let message = match settings.theme_attribute() {
        Some(theme) => format!("Theme set to {}", theme),
        None => "Back to the default pink theme".to_string(),
    };
    println!("{}", palette(planner).heading(&message));
    Ok(())
}

pub fn background(
    planner: &mut CliPlanner,
    ui: &mut dyn Interaction,
    name: Option<String>,
) -> Result<()> {
    planner.dispatch(Intent::SetBackground(name), ui)?;

    let palette = palette(planner);
    match planner.state().settings.background() {
        Some(bg) => println!("{}", palette.heading(&format!("Background set to {}", bg))),
        None => println!("{}", palette.heading("Background cleared")),
    }
    println!("{}", palette.border(42));
    Ok(())
}
