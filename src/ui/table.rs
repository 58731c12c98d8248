use tabled::{settings::Style, Table, Tabled};
use crate::entry::preview;
use crate::storage::{BrokenItem, PinnedItem};
use crate::verify::StoreStats;

const TITLE_COLUMN_CHARS: usize = 48;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
struct PinRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Application")]
    application: String,
}

#[derive(Tabled)]
struct BrokenRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Pin")]
    pin: String,
    #[tabled(rename = "Title")]
    title: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &StoreStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Items", &stats.total_items.to_string());
    builder.add_row("Content records", &stats.total_contents.to_string());
    builder.add_row("Pinned", &stats.pinned_items.to_string());
    builder.add_row("  with shortcut", &stats.shortcut_items.to_string());
    builder.add_row("  plain", &stats.plain_pinned_items().to_string());
    builder.add_row("Broken", &stats.broken_items.to_string());
    builder.add_row("Legacy '_' markers", &stats.legacy_items.to_string());
    builder.build()
}

/// Pinned items, shortcut keys first
pub fn pinned_table(items: &[PinnedItem]) -> String {
    let mut rows: Vec<PinRow> = items
        .iter()
        .map(|item| PinRow {
            key: item.pin.shortcut().map(String::from).unwrap_or_default(),
            id: item.id,
            title: preview(&item.title, TITLE_COLUMN_CHARS),
            application: item.application.clone().unwrap_or_default(),
        })
        .collect();
    rows.sort_by(|a, b| (a.key.is_empty(), &a.key, a.id).cmp(&(b.key.is_empty(), &b.key, b.id)));
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn broken_table(items: &[BrokenItem]) -> String {
    let rows = items.iter().map(|item| BrokenRow {
        id: item.id,
        pin: item.pin.to_string(),
        title: preview(&item.title, TITLE_COLUMN_CHARS),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}
