use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use kawaii_core::day::DayKey;
use kawaii_core::stamp::{self, STAMPS};
use kawaii_core::{Intent, Interaction};
use owo_colors::OwoColorize;

use super::{CliPlanner, palette, parse_date};
use crate::render::{DayView, Render, ThemedRender};

/// Edits requested for one day on the command line.
#[derive(Debug, Default)]
pub struct DayEdit {
    pub text: Option<String>,
    pub stamp: Option<String>,
    pub no_stamp: bool,
    pub image: Option<PathBuf>,
    pub remove_image: bool,
    pub clear: bool,
    pub period: Option<String>,
    pub until: Option<String>,
}

impl DayEdit {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.stamp.is_none()
            && !self.no_stamp
            && self.image.is_none()
            && !self.remove_image
            && !self.clear
            && self.period.is_none()
    }
}

pub fn run(
    planner: &mut CliPlanner,
    ui: &mut dyn Interaction,
    date_input: &str,
    edit: DayEdit,
) -> Result<()> {
    let date = parse_date(date_input, planner.today())?;

    if !edit.is_empty() && !save(planner, ui, date, edit)? {
        return Ok(());
    }

    show(planner, date);
    Ok(())
}

/// Open the editor on `date`, apply the edits and save.
///
/// Returns false when the save was rejected.
fn save(
    planner: &mut CliPlanner,
    ui: &mut dyn Interaction,
    date: NaiveDate,
    edit: DayEdit,
) -> Result<bool> {
    // Resolve everything that can fail before touching the editor.
    let stamp = match &edit.stamp {
        Some(input) => Some(resolve_stamp(input)?),
        None => None,
    };
    let image = match &edit.image {
        Some(path) => Some(image_data_uri(path)?),
        None => None,
    };
    let until = match &edit.until {
        Some(input) => Some(parse_date(input, planner.today())?),
        None => None,
    };

    planner.dispatch(Intent::OpenDay(date), ui)?;

    let current_stamp = planner
        .editor()
        .session()
        .and_then(|s| s.stamp())
        .map(String::from);

    let mut intents = Vec::new();

    if edit.clear {
        intents.push(Intent::SetText(String::new()));
        intents.push(Intent::RemoveImage);
    }
    if let Some(text) = edit.text {
        intents.push(Intent::SetText(text));
    }
    if edit.clear || edit.no_stamp {
        if let Some(current) = current_stamp {
            intents.push(Intent::ToggleStamp(current));
        }
    }
    if let Some(glyph) = stamp {
        intents.push(Intent::ToggleStamp(glyph.to_string()));
    }
    if edit.remove_image {
        intents.push(Intent::RemoveImage);
    }
    if let Some(data_uri) = image {
        intents.push(Intent::StageImage(data_uri));
    }
    if let Some(title) = edit.period {
        intents.push(Intent::SetPeriodTitle(title));
        intents.push(Intent::SetPeriodEnd(Some(until.unwrap_or(date))));
    }

    for intent in intents {
        planner.dispatch(intent, ui)?;
    }
    planner.dispatch(Intent::SaveEvent, ui)?;

    if planner.editor().is_open() {
        // Rejected; the alert has already been shown.
        planner.dispatch(Intent::CloseEditor, ui)?;
        return Ok(false);
    }

    ui.notify("Saved ✨");
    Ok(true)
}

fn show(planner: &CliPlanner, date: NaiveDate) {
    let state = planner.state();
    let view = DayView {
        date,
        event: state.events.get(&DayKey::new(date)),
        periods: state.period_events.iter().filter(|p| p.covers(date)).collect(),
    };
    println!("{}", view.render(&palette(planner)));
}

fn resolve_stamp(input: &str) -> Result<&'static str> {
    match stamp::resolve(input) {
        Some(stamp) => Ok(stamp.glyph),
        None => {
            let names: Vec<_> = STAMPS.iter().map(|s| s.name).collect();
            anyhow::bail!(
                "Unknown sticker '{}'. Available: {}",
                input,
                names.join(", ")
            );
        }
    }
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

/// Read an image file into a `data:` URI.
pub fn image_data_uri(path: &Path) -> Result<String> {
    let mime = image_mime(path)
        .with_context(|| format!("{} does not look like an image", path.display()))?;
    let bytes =
        std::fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

pub fn list_stamps() {
    println!("{}", "Stickers".bold());
    for stamp in STAMPS {
        println!("  {}", stamp.render());
    }
}
