use crate::{OutputMode, emit_success};
use anyhow::Context;
use maccy_pins::config::{self, PinConfig};
use maccy_pins::importer::ImportEvent;
use maccy_pins::ui::{self, Icons};
use maccy_pins::{Pin, PinManager, StoreStats};
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::Path;

const PREVIEW_CHARS: usize = 50;

/// How to react when the clipboard app is still running
#[derive(Debug, Clone, Copy)]
pub struct Confirm {
    pub assume_yes: bool,
    pub output_mode: OutputMode,
}

/// What to do about a possibly running clipboard app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OwnerCheck {
    Proceed,
    /// Running, but `--yes` was given
    ProceedWithWarning,
    Prompt,
    Refuse,
}

impl OwnerCheck {
    /// A prompt is only possible in human mode on an attended terminal
    fn decide(running: bool, assume_yes: bool, human: bool, attended: bool) -> Self {
        match (running, assume_yes) {
            (false, _) => OwnerCheck::Proceed,
            (true, true) => OwnerCheck::ProceedWithWarning,
            (true, false) if human && attended => OwnerCheck::Prompt,
            (true, false) => OwnerCheck::Refuse,
        }
    }
}

impl Confirm {
    /// Ok to write, or an error explaining why not
    fn owner_closed(&self, manager: &PinManager) -> anyhow::Result<()> {
        let check = OwnerCheck::decide(
            manager.owner_running(),
            self.assume_yes,
            self.output_mode.is_human(),
            console::user_attended(),
        );
        let name = manager.config().process_name();
        match check {
            OwnerCheck::Proceed => Ok(()),
            OwnerCheck::ProceedWithWarning => {
                tracing::warn!("{} is running, continuing because of --yes", name);
                Ok(())
            }
            OwnerCheck::Refuse => {
                anyhow::bail!("{} is running; quit it first or pass --yes", name)
            }
            OwnerCheck::Prompt => {
                ui::warn(&format!("{} is running and may overwrite these changes.", name));
                let term = console::Term::stderr();
                write!(&term, "Continue anyway? [y/N] ")?;
                let answer = term.read_line()?;
                if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                    Ok(())
                } else {
                    anyhow::bail!("Aborted; nothing was changed")
                }
            }
        }
    }
}

/// Outcome of one entry, kept until the import commits
enum EntryLine {
    Inserted { id: i64, pin: Pin, preview: String },
    Duplicate { preview: String },
}

pub fn run_import(
    manager: &PinManager,
    file: &Path,
    with_shortcuts: bool,
    confirm: Confirm,
) -> anyhow::Result<()> {
    let output_mode = confirm.output_mode;
    let human = output_mode.is_human();
    let db_path = manager.database_path();

    if human {
        ui::header("Importing pinned entries");
        ui::status(Icons::DATABASE, "Database", &db_path.display().to_string());
        ui::status(Icons::FILE, "File", &file.display().to_string());
    }

    let before = manager.analyze()?;
    if human {
        ui::summary_row(
            "Pinned before:",
            &format!("{} ({} with shortcut)", before.pinned_items, before.shortcut_items),
        );
    }

    if !file.exists() {
        anyhow::bail!("Input file not found: {}", file.display());
    }
    confirm.owner_closed(manager)?;

    let entries = manager
        .read_entries(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let progress = human.then(|| ui::ImportProgress::new(entries.len()));
    let mut lines = Vec::with_capacity(entries.len());
    let result = manager.import_entries(&entries, with_shortcuts, |event| {
        let line = match event {
            ImportEvent::Inserted { entry, id, pin } => EntryLine::Inserted {
                id,
                pin,
                preview: entry.preview(PREVIEW_CHARS),
            },
            ImportEvent::Duplicate { entry } => EntryLine::Duplicate {
                preview: entry.preview(PREVIEW_CHARS),
            },
        };
        if let Some(progress) = &progress {
            let msg = match &line {
                EntryLine::Inserted { preview, .. } => preview.as_str(),
                EntryLine::Duplicate { .. } => "duplicate",
            };
            progress.inc(msg);
        }
        lines.push(line);
    });

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            if let Some(progress) = &progress {
                progress.abandon();
            }
            if err.is_configuration() {
                return Err(err).context("Import refused; nothing was written");
            }
            return Err(err).with_context(|| {
                format!(
                    "Import failed; a backup of the store is at {}",
                    manager.config().backup_path().display()
                )
            });
        }
    };

    if !human {
        return emit_success(output_mode, "import", &outcome);
    }

    if let Some(progress) = &progress {
        progress.finish_with_summary(
            outcome.import.inserted,
            outcome.import.skipped,
            outcome.import.shortcuts,
        );
    }

    ui::section("Entries");
    for line in &lines {
        match line {
            EntryLine::Inserted { id, pin, preview } => ui::entry_inserted(*id, *pin, preview),
            EntryLine::Duplicate { preview } => ui::entry_duplicate(preview),
        }
    }

    if outcome.import.legacy_normalized > 0 {
        ui::info(
            "Legacy pins normalized",
            &outcome.import.legacy_normalized.to_string(),
        );
    }
    if let Some(repair) = &outcome.repair {
        ui::phase("Repair");
        for item in &repair.recovered {
            ui::item_recovered(item.id, &item.title);
        }
    }

    print_stats(&outcome.stats);
    ui::status(Icons::DATABASE, "Backup", &outcome.backup.display().to_string());
    ui::success(&format!(
        "Imported {} of {} entries",
        outcome.import.inserted, outcome.entries
    ));
    restart_hint(manager);
    Ok(())
}

pub fn run_repair(manager: &PinManager, confirm: Confirm) -> anyhow::Result<()> {
    let output_mode = confirm.output_mode;
    let human = output_mode.is_human();

    let before = manager.analyze()?;
    if human {
        ui::header("Repairing pinned items");
        ui::status(
            Icons::DATABASE,
            "Database",
            &manager.database_path().display().to_string(),
        );
        ui::summary_row(
            "Found:",
            &format!(
                "{} broken, {} legacy",
                before.broken_items, before.legacy_items
            ),
        );
    }

    if before.is_healthy() {
        if human {
            ui::success("Nothing to repair");
        } else {
            emit_success(output_mode, "repair", maccy_pins::RepairReport {
                stats: before,
                ..Default::default()
            })?;
        }
        return Ok(());
    }

    confirm.owner_closed(manager)?;

    let spinner = human.then(|| ui::Spinner::new("Repairing..."));
    let result = manager.repair();
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    let report = match result {
        Ok(report) => report,
        Err(err @ maccy_pins::Error::Integrity(_)) => {
            if human {
                let broken = manager.broken_items()?;
                ui::section("Still broken");
                println!("{}", ui::broken_table(&broken));
            }
            return Err(err).context("Repair could not restore every item");
        }
        Err(err) => return Err(err.into()),
    };

    if !human {
        return emit_success(output_mode, "repair", &report);
    }

    if report.legacy_normalized > 0 {
        ui::info("Legacy pins normalized", &report.legacy_normalized.to_string());
    }
    if !report.recovered.is_empty() {
        ui::section("Recovered from title");
        for item in &report.recovered {
            ui::item_recovered(item.id, &item.title);
        }
    }

    print_stats(&report.stats);
    ui::success(&format!("Repair complete ({} changes)", report.mutations()));
    restart_hint(manager);
    Ok(())
}

pub fn run_analyze(manager: &PinManager, list: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let stats = manager.analyze()?;
    let broken = if stats.broken_items > 0 {
        manager.broken_items()?
    } else {
        Vec::new()
    };
    let pinned = if list { manager.pinned_items()? } else { Vec::new() };

    if !output_mode.is_human() {
        let listed = list.then_some(&pinned);
        let data = serde_json::json!({
            "database": manager.database_path(),
            "healthy": stats.is_healthy(),
            "stats": stats,
            "broken": broken,
            "pinned": listed,
        });
        return emit_success(output_mode, "analyze", data);
    }

    ui::header("Store analysis");
    ui::status(
        Icons::DATABASE,
        "Database",
        &manager.database_path().display().to_string(),
    );
    print_stats(&stats);

    if !broken.is_empty() {
        ui::section("Broken items");
        for item in &broken {
            ui::item_broken(item.id, &item.title);
        }
    }

    if list {
        ui::section("Pinned items");
        if pinned.is_empty() {
            println!("  {}", ui::muted("none"));
        } else {
            println!("{}", ui::pinned_table(&pinned));
        }
    }

    println!();
    if stats.is_healthy() {
        ui::success("Store is healthy");
    } else {
        ui::warn("Store needs repair; run `maccy-pins repair`");
    }
    Ok(())
}

pub fn run_remove_shortcuts(manager: &PinManager, confirm: Confirm) -> anyhow::Result<()> {
    let output_mode = confirm.output_mode;
    let human = output_mode.is_human();

    let before = manager.analyze()?;
    if human {
        ui::header("Removing shortcut keys");
        ui::summary_row("Shortcut pins:", &before.shortcut_items.to_string());
    }

    if before.shortcut_items == 0 {
        if human {
            ui::success("No shortcut pins to clear");
        } else {
            emit_success(output_mode, "remove-shortcuts", maccy_pins::RemovalReport {
                cleared: Vec::new(),
                plain_pinned: before.plain_pinned_items(),
            })?;
        }
        return Ok(());
    }

    confirm.owner_closed(manager)?;
    let report = manager
        .remove_shortcuts()
        .context("Removing shortcuts failed; the store was left unchanged")?;

    if !human {
        return emit_success(output_mode, "remove-shortcuts", &report);
    }

    ui::section("Cleared");
    for item in &report.cleared {
        ui::shortcut_cleared(item.key, &item.title);
    }
    println!();
    ui::success(&format!(
        "Cleared {} shortcut(s); {} plain pins now",
        report.cleared.len(),
        report.plain_pinned
    ));
    restart_hint(manager);
    Ok(())
}

pub fn run_init(path: &Path, settings: &PinConfig, force: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    config::write_config(path, settings, force)?;
    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", path.display()));
        ui::summary_row("database", &settings.database_path().display().to_string());
        ui::summary_row("backup", &settings.backup_path().display().to_string());
    } else {
        emit_success(output_mode, "init", serde_json::json!({
            "path": path,
            "config": settings,
        }))?;
    }
    Ok(())
}

fn print_stats(stats: &StoreStats) {
    ui::section("Store");
    println!("{}", ui::stats_table(stats));
}

fn restart_hint(manager: &PinManager) {
    println!(
        "  {} {}",
        Icons::INFO.style(ui::theme().info.clone()),
        format!("Restart {} to see the changes", manager.config().process_name())
            .style(ui::theme().dim.clone())
    );
}
