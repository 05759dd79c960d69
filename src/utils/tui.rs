use std::time::Duration;

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use kawaii_core::Interaction;
use owo_colors::OwoColorize;
use tokio::runtime::{Handle, RuntimeFlavor};

/// How long the celebration stays on screen.
const CELEBRATION_TIME: Duration = Duration::from_secs(2);

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["✿", "❀", "✾", "❁", "✿"])
            .template("{spinner} {msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Terminal side of [`Interaction`]: dialoguer prompts, colored messages
/// and a spinner for the celebration.
pub struct TerminalUi {
    assume_yes: bool,
    alerts: usize,
}

impl TerminalUi {
    pub fn new(assume_yes: bool) -> Self {
        TerminalUi {
            assume_yes,
            alerts: 0,
        }
    }

    /// Number of alerts shown so far.
    pub fn alerts(&self) -> usize {
        self.alerts
    }
}

impl Interaction for TerminalUi {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match Confirm::new().with_prompt(message).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("confirmation prompt failed: {}", e);
                false
            }
        }
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message.green());
    }

    fn alert(&mut self, message: &str) {
        self.alerts += 1;
        eprintln!("{}", message.red());
    }

    fn celebrate(&mut self, message: &str) {
        let spinner = create_spinner(message.bold().to_string());
        if !spinner.is_hidden() {
            hold(CELEBRATION_TIME);
        }
        spinner.finish_and_clear();
        println!("🎉 {}", message.bold());
    }
}

/// Sleep the calling thread without stalling other tasks on a multi-thread
/// runtime.
fn hold(duration: Duration) {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| std::thread::sleep(duration))
        }
        _ => std::thread::sleep(duration),
    }
}
