//! Console colours, resolved once per process

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    /// `[k]` labels of shortcut pins
    pub shortcut: Style,
    /// Field labels in status lines
    pub dim: Style,
    /// Plain-pin labels, item ids, duplicates
    pub muted: Style,
}

impl Theme {
    /// Colours only on a terminal, and never when `NO_COLOR` is set
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::for_output(console::Term::stdout().is_term(), no_color)
    }

    pub fn for_output(is_term: bool, no_color: bool) -> Self {
        if is_term && !no_color {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            shortcut: Style::new().blue().bold(),
            dim: Style::new().white().dimmed(),
            muted: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            shortcut: Style::new(),
            dim: Style::new(),
            muted: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
