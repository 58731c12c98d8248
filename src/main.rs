//! maccy-pins CLI - import, repair and inspect pinned entries in Maccy's store

mod commands;

use clap::{Parser, Subcommand};
use maccy_pins::config::{self, PinConfig};
use maccy_pins::{PinManager, RecoveryPolicy};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "maccy-pins")]
#[command(version)]
#[command(about = "Pinned-entry maintenance for the Maccy clipboard manager")]
#[command(long_about = r#"
maccy-pins works directly on Maccy's Storage.sqlite:
  • Bulk-import text snippets as pinned items, optionally with shortcut keys
  • Repair pinned items whose content went missing
  • Report store health and strip shortcut keys in bulk

Quit Maccy before running a command that writes. A backup of the store is
taken before every write.

Example usage:
  maccy-pins analyze --list
  maccy-pins import snippets.txt --with-shortcuts
  maccy-pins repair
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to Maccy's Storage.sqlite (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file [default: ./maccy-pins.toml]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Don't ask for confirmation when Maccy is running
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a text file as pinned items; blank lines separate entries
    Import {
        /// Text file to import
        file: PathBuf,

        /// Give each new item a free shortcut key while keys last
        #[arg(long)]
        with_shortcuts: bool,
    },

    /// Normalize legacy pins and restore missing content
    Repair {
        /// How to handle items with no content (title, report)
        #[arg(long)]
        recovery: Option<RecoveryPolicy>,
    },

    /// Show store statistics and broken items
    Analyze {
        /// Also list every pinned item
        #[arg(short, long)]
        list: bool,
    },

    /// Turn every shortcut pin into a plain pin
    RemoveShortcuts,

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Import { .. } => "import",
            Commands::Repair { .. } => "repair",
            Commands::Analyze { .. } => "analyze",
            Commands::RemoveShortcuts => "remove-shortcuts",
            Commands::Init { .. } => "init",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    ok: bool,
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Print a successful result as a JSON envelope; no-op in human mode
pub fn emit_success<T: Serialize>(output_mode: OutputMode, command: &str, data: T) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = Envelope {
        ok: true,
        command,
        data: Some(data),
        error: None,
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn emit_error(output_mode: OutputMode, command: &str, err: &anyhow::Error) {
    if output_mode.is_human() {
        maccy_pins::ui::error(&format!("{:#}", err));
        return;
    }
    let envelope: Envelope<'_, ()> = Envelope {
        ok: false,
        command,
        data: None,
        error: Some(format!("{:#}", err)),
    };
    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => println!("{}", json),
        Err(_) => eprintln!("{:#}", err),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if cli.json {
        EnvFilter::new("warn")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let command = cli.command.name();
    match run(cli, output_mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            emit_error(output_mode, command, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    if let Commands::Init { force } = cli.command {
        let mut settings = PinConfig::with_defaults();
        if let Some(database) = &cli.database {
            settings.database = Some(database.display().to_string());
            settings.backup = Some(config::default_backup_path(database).display().to_string());
        }
        return commands::run_init(&config_path, &settings, force, output_mode);
    }

    let mut settings = config::load_config(Some(&config_path))?.unwrap_or_default();
    if let Some(database) = &cli.database {
        settings.database = Some(database.display().to_string());
    }
    if let Commands::Repair {
        recovery: Some(policy),
    } = &cli.command
    {
        settings.recovery = Some(*policy);
    }
    tracing::debug!("Using database {}", settings.database_path().display());

    let manager = PinManager::new(settings)?;
    let confirm = commands::Confirm {
        assume_yes: cli.yes,
        output_mode,
    };

    match cli.command {
        Commands::Import {
            file,
            with_shortcuts,
        } => commands::run_import(&manager, &file, with_shortcuts, confirm),
        Commands::Repair { .. } => commands::run_repair(&manager, confirm),
        Commands::Analyze { list } => commands::run_analyze(&manager, list, output_mode),
        Commands::RemoveShortcuts => commands::run_remove_shortcuts(&manager, confirm),
        Commands::Init { .. } => Ok(()),
    }
}
