use std::cell::RefCell;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::system::{format_usage_table, SystemUsage};

/// Output sink for everything the pipeline shows. Implementations are
/// cosmetic only: the pipeline never reads anything back from its effects,
/// and swapping one implementation for another cannot change behavior.
pub trait Effects {
    fn intro(&self);
    fn usage_table(&self, heading: &str, usage: &SystemUsage);
    fn notice(&self, text: &str);
    fn phase_begin(&self, label: &str);
    fn phase_end(&self, label: &str);
    fn line(&self, text: &str);
    fn nothing_to_do(&self);
    fn outro(&self);
}

/// Colored panels and a spinner that ticks while a phase's subprocess runs.
pub struct Animated {
    spinner: RefCell<Option<ProgressBar>>,
}

impl Animated {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }
}

fn panel(text: &str) -> String {
    let inner = text.chars().count();
    format!(
        "╭{line}╮\n│ {text} │\n╰{line}╯",
        line = "─".repeat(inner + 2),
        text = text,
    )
}

impl Effects for Animated {
    fn intro(&self) {
        println!("{}", panel("System Maintenance").bold().green());
        println!("{}", panel("Automating your apt chores").cyan());
        println!("{}", "Initializing...".bold().green());
    }

    fn usage_table(&self, heading: &str, usage: &SystemUsage) {
        println!("\n{}", heading.bold().green());
        println!("{}", format_usage_table(usage));
    }

    fn notice(&self, text: &str) {
        println!("{}", text.bold().yellow());
    }

    fn phase_begin(&self, label: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner().tick_strings(&["|", "/", "-", "\\", "|"]),
        );
        pb.set_message(format!("{}...", label));
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.borrow_mut() = Some(pb);
    }

    fn phase_end(&self, label: &str) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
        println!("{} {}", "✔".bold().green(), label.bold());
    }

    fn line(&self, text: &str) {
        println!("{}", text.blue());
    }

    fn nothing_to_do(&self) {
        println!("{}", panel("Nothing to do!").bold().yellow());
        println!("{}", panel("System is already up to date!").bold().green());
        println!("{}", panel("Ending here.").bold().magenta());
    }

    fn outro(&self) {
        println!("{}", panel("✔ All tasks completed").bold().green());
        println!("{}", panel("System maintenance complete!").bold().magenta());
    }
}

/// Undecorated line writer for `--plain`.
pub struct PlainText;

impl Effects for PlainText {
    fn intro(&self) {
        println!("sysmaint: starting system maintenance");
    }

    fn usage_table(&self, heading: &str, usage: &SystemUsage) {
        println!("\n{}", heading);
        println!("{}", format_usage_table(usage));
    }

    fn notice(&self, text: &str) {
        println!("{}", text);
    }

    fn phase_begin(&self, label: &str) {
        println!("{}...", label);
    }

    fn phase_end(&self, label: &str) {
        println!("{}: done", label);
    }

    fn line(&self, text: &str) {
        println!("{}", text);
    }

    fn nothing_to_do(&self) {
        println!("Nothing to do. System is already up to date.");
    }

    fn outro(&self) {
        println!("System maintenance complete.");
    }
}

/// Discards everything. Used for `--json` output and in tests.
pub struct Silent;

impl Effects for Silent {
    fn intro(&self) {}
    fn usage_table(&self, _heading: &str, _usage: &SystemUsage) {}
    fn notice(&self, _text: &str) {}
    fn phase_begin(&self, _label: &str) {}
    fn phase_end(&self, _label: &str) {}
    fn line(&self, _text: &str) {}
    fn nothing_to_do(&self) {}
    fn outro(&self) {}
}
