pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    entry_duplicate, entry_inserted, error, header, info, item_recovered,
    item_broken, muted, phase, pin_label, section, shortcut_cleared, status, success,
    summary_row, warn,
};
pub use progress::{ImportProgress, Spinner};
pub use table::{broken_table, pinned_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
