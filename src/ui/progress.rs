use crate::ui::theme;
use crate::ui::Icons;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::{Duration, Instant};

/// Bar over the entries of one import; hidden when stdout is not a terminal
pub struct ImportProgress {
    pb: ProgressBar,
    started: Instant,
}

impl ImportProgress {
    pub fn new(total_entries: usize) -> Self {
        let pb = if console::Term::stdout().is_term() {
            let pb = ProgressBar::new(total_entries as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("=> "));
            }
            pb
        } else {
            ProgressBar::hidden()
        };
        Self {
            pb,
            started: Instant::now(),
        }
    }

    pub fn inc(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
        self.pb.inc(1);
    }

    pub fn finish_with_summary(&self, inserted: usize, skipped: usize, shortcuts: usize) {
        self.pb.finish_and_clear();
        println!(
            "{} {}",
            Icons::CHECK.style(theme().success.clone()),
            format!("Import done in {}", HumanDuration(self.started.elapsed()))
                .style(theme().success.clone())
        );
        println!(
            "  {} {}  {} {}  {} {}",
            Icons::NEW.style(theme().info.clone()),
            inserted,
            Icons::SKIP.style(theme().info.clone()),
            skipped,
            Icons::KEY.style(theme().info.clone()),
            shortcuts
        );
    }

    pub fn abandon(&self) {
        self.pb.abandon();
    }
}

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_message(message.to_string());
        if console::Term::stdout().is_term() {
            pb.enable_steady_tick(Duration::from_millis(100));
        } else {
            pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        }
        Self { pb }
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}
