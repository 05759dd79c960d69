use anyhow::Result;
use kawaii_core::{Intent, Interaction};

use super::{CliPlanner, list_index, palette};
use crate::render::ThemedRender;

pub fn list(planner: &CliPlanner) {
    println!("{}", planner.state().todos.render(&palette(planner)));
}

pub fn add(planner: &mut CliPlanner, ui: &mut dyn Interaction, text: &str) -> Result<()> {
    let before = planner.state().todos.len();
    planner.dispatch(Intent::AddTodo(text.to_string()), ui)?;

    if planner.state().todos.len() == before {
        anyhow::bail!("A todo needs some text");
    }

    list(planner);
    Ok(())
}

pub fn toggle(planner: &mut CliPlanner, ui: &mut dyn Interaction, number: usize) -> Result<()> {
    let id = todo_id(planner, number)?;
    planner.dispatch(Intent::ToggleTodo(id), ui)?;
    list(planner);
    Ok(())
}

pub fn delete(planner: &mut CliPlanner, ui: &mut dyn Interaction, number: usize) -> Result<()> {
    let id = todo_id(planner, number)?;
    planner.dispatch(Intent::DeleteTodo(id), ui)?;
    list(planner);
    Ok(())
}

fn todo_id(planner: &CliPlanner, number: usize) -> Result<i64> {
    let items = planner.state().todos.items();
    let index = list_index(number, items.len(), "todo")?;
    Ok(items[index].id)
}
