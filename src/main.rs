mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::utils::tui::TerminalUi;

#[derive(Parser)]
#[command(name = "kawaii")]
#[command(about = "A cute planner for your terminal: calendar, stamps, todos and countdowns")]
struct Cli {
    /// Read and write records in this directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month (the current one by default)
    Month {
        #[arg(long, requires = "month")]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,

        /// Step one month back
        #[arg(long, conflicts_with = "next")]
        prev: bool,

        /// Step one month forward
        #[arg(long)]
        next: bool,
    },
    /// Show or edit one day (YYYY-MM-DD, "today" or "tomorrow")
    Day {
        date: String,

        /// Note for the day
        #[arg(short, long)]
        text: Option<String>,

        /// Sticker name or glyph; picking the current one removes it
        #[arg(short, long, conflicts_with = "no_stamp")]
        stamp: Option<String>,

        /// Remove the sticker
        #[arg(long)]
        no_stamp: bool,

        /// Attach a picture from disk
        #[arg(short, long, conflicts_with = "remove_image")]
        image: Option<PathBuf>,

        #[arg(long)]
        remove_image: bool,

        /// Remove the note, sticker and picture
        #[arg(long, conflicts_with_all = ["text", "stamp", "image"])]
        clear: bool,

        /// Start a multi-day event on this day
        #[arg(short, long)]
        period: Option<String>,

        /// Last day of the multi-day event (defaults to the same day)
        #[arg(short, long, requires = "period")]
        until: Option<String>,
    },
    /// Multi-day events
    Period {
        #[command(subcommand)]
        command: Option<PeriodCommand>,
    },
    /// Todo list
    Todo {
        #[command(subcommand)]
        command: Option<TodoCommand>,
    },
    /// Change the colour theme (pink, blue, mint, lavender, lemon)
    Theme { name: String },
    /// Change the background pattern (dots, stripes, hearts, stars)
    Bg {
        #[arg(required_unless_present = "clear")]
        name: Option<String>,

        /// Go back to a plain background
        #[arg(long, conflicts_with = "name")]
        clear: bool,
    },
    /// Countdown banners
    Countdown {
        #[command(subcommand)]
        command: Option<CountdownCommand>,
    },
    /// Write a backup of everything to a JSON file
    Backup {
        /// Directory to write the backup into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Restore records from a backup file
    Restore { file: PathBuf },
    /// List the available stickers
    Stamps,
    /// Show where configuration and data live
    Config {
        /// Store records in this directory from now on
        #[arg(long)]
        set_data_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PeriodCommand {
    List,
    /// Delete the event with this number (see `period list`)
    Delete { number: usize },
}

#[derive(Subcommand)]
enum TodoCommand {
    List,
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Mark done (or not done) by number
    Toggle { number: usize },
    Delete { number: usize },
}

#[derive(Subcommand)]
enum CountdownCommand {
    List,
    Add {
        title: String,
        /// Target date (YYYY-MM-DD)
        date: String,
    },
    /// Remove the countdown with this number (see `countdown list`)
    Remove { number: usize },
    /// Seconds between banner rotations
    Interval {
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
    },
    /// Show the rotating banner until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kawaii=warn,kawaii_core=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut ui = TerminalUi::new(cli.yes);
    let data_dir = cli.data_dir.as_deref();

    let command = cli.command.unwrap_or(Commands::Month {
        year: None,
        month: None,
        prev: false,
        next: false,
    });

    match command {
        Commands::Month {
            year,
            month,
            prev,
            next,
        } => {
            let mut planner = commands::open_planner(data_dir)?;
            commands::month::run(&mut planner, &mut ui, year, month, prev, next)?;
        }
        Commands::Day {
            date,
            text,
            stamp,
            no_stamp,
            image,
            remove_image,
            clear,
            period,
            until,
        } => {
            let mut planner = commands::open_planner(data_dir)?;
            let edit = commands::day::DayEdit {
                text,
                stamp,
                no_stamp,
                image,
                remove_image,
                clear,
                period,
                until,
            };
            commands::day::run(&mut planner, &mut ui, &date, edit)?;
        }
        Commands::Period { command } => {
            let mut planner = commands::open_planner(data_dir)?;
            match command.unwrap_or(PeriodCommand::List) {
                PeriodCommand::List => commands::period::list(&planner),
                PeriodCommand::Delete { number } => {
                    commands::period::delete(&mut planner, &mut ui, number)?
                }
            }
        }
        Commands::Todo { command } => {
            let mut planner = commands::open_planner(data_dir)?;
            match command.unwrap_or(TodoCommand::List) {
                TodoCommand::List => commands::todo::list(&planner),
                TodoCommand::Add { text } => {
                    commands::todo::add(&mut planner, &mut ui, &text.join(" "))?
                }
                TodoCommand::Toggle { number } => {
                    commands::todo::toggle(&mut planner, &mut ui, number)?
                }
                TodoCommand::Delete { number } => {
                    commands::todo::delete(&mut planner, &mut ui, number)?
                }
            }
        }
        Commands::Theme { name } => {
            let mut planner = commands::open_planner(data_dir)?;
            commands::settings::theme(&mut planner, &mut ui, name)?;
        }
        Commands::Bg { name, clear } => {
            let mut planner = commands::open_planner(data_dir)?;
            let name = if clear { None } else { name };
            commands::settings::background(&mut planner, &mut ui, name)?;
        }
        Commands::Countdown { command } => {
            let mut planner = commands::open_planner(data_dir)?;
            match command.unwrap_or(CountdownCommand::List) {
                CountdownCommand::List => commands::countdown::list(&planner),
                CountdownCommand::Add { title, date } => {
                    commands::countdown::add(&mut planner, &mut ui, title, &date)?
                }
                CountdownCommand::Remove { number } => {
                    commands::countdown::remove(&mut planner, &mut ui, number)?
                }
                CountdownCommand::Interval { seconds } => {
                    commands::countdown::interval(&mut planner, &mut ui, seconds)?
                }
                CountdownCommand::Watch => commands::countdown::watch(planner).await?,
            }
        }
        Commands::Backup { out } => {
            let planner = commands::open_planner(data_dir)?;
            commands::backup::backup(&planner, &mut ui, out)?;
        }
        Commands::Restore { file } => {
            let mut planner = commands::open_planner(data_dir)?;
            commands::backup::restore(&mut planner, &mut ui, &file)?;
        }
        Commands::Stamps => commands::day::list_stamps(),
        Commands::Config { set_data_dir } => commands::config::run(data_dir, set_data_dir)?,
    }

    if ui.alerts() > 0 {
        std::process::exit(1);
    }

    Ok(())
}
