//! Store analysis - read-only integrity counts
//!
//! The same scan backs the `analyze` command and the closing check of the
//! import and repair workflows.

use serde::Serialize;
use crate::Result;
use crate::shortcut::ShortcutAlphabet;
use crate::storage::Queries;

/// Snapshot of the store's pin state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total_items: usize,
    pub total_contents: usize,
    /// Pin column non-null, plain pins included
    pub pinned_items: usize,
    /// Pinned with a key from the alphabet
    pub shortcut_items: usize,
    /// Pinned without any non-empty content
    pub broken_items: usize,
    /// Still carrying the `_` placeholder
    pub legacy_items: usize,
}

impl StoreStats {
    pub fn plain_pinned_items(&self) -> usize {
        self.pinned_items.saturating_sub(self.shortcut_items)
    }

    /// No broken items and no legacy markers left
    pub fn is_healthy(&self) -> bool {
        self.broken_items == 0 && self.legacy_items == 0
    }
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  History items: {}", self.total_items)?;
        writeln!(f, "  Content records: {}", self.total_contents)?;
        writeln!(f, "  Pinned items: {}", self.pinned_items)?;
        writeln!(f, "    With shortcut: {}", self.shortcut_items)?;
        writeln!(f, "    Without shortcut: {}", self.plain_pinned_items())?;
        writeln!(f, "  ⚠️  Missing content: {}", self.broken_items)?;
        write!(f, "  ⚠️  Legacy '_' markers: {}", self.legacy_items)
    }
}

/// Counts pins against a given shortcut alphabet
pub struct Analyzer<'a> {
    alphabet: &'a ShortcutAlphabet,
}

impl<'a> Analyzer<'a> {
    pub fn new(alphabet: &'a ShortcutAlphabet) -> Self {
        Self { alphabet }
    }

    pub fn analyze(&self, queries: &Queries<'_>) -> Result<StoreStats> {
        let shortcut_items = queries
            .used_pin_values()?
            .iter()
            .filter(|value| self.alphabet.contains_value(value))
            .count();

        let stats = StoreStats {
            total_items: queries.count_items()?,
            total_contents: queries.count_contents()?,
            pinned_items: queries.count_pinned()?,
            shortcut_items,
            broken_items: queries.count_broken()?,
            legacy_items: queries.count_legacy()?,
        };
        tracing::debug!(?stats, "Analyzed store");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::Pin;
    use crate::storage::{schema, NewItem, PinStore};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_store() {
        let store = PinStore::open_in_memory().unwrap();
        let alphabet = ShortcutAlphabet::maccy();
        let stats = Analyzer::new(&alphabet).analyze(&store.queries()).unwrap();

        assert_eq!(stats, StoreStats::default());
        assert!(stats.is_healthy());
    }

    #[test]
    fn test_counts_by_pin_kind() {
        let store = PinStore::open_in_memory().unwrap();
        let q = store.queries();
        let alphabet = ShortcutAlphabet::maccy();

        for (pin, text) in [
            (Pin::Shortcut('b'), "one"),
            (Pin::Shortcut('c'), "two"),
            (Pin::Plain, "three"),
            (Pin::Unpinned, "four"),
        ] {
            let id = q.insert_item(&NewItem::new("test", pin, text)).unwrap();
            q.insert_content(id, schema::PLAIN_TEXT_TYPE, text.as_bytes()).unwrap();
        }
        // 'a' is pinned but not a Maccy shortcut key
        let odd = q.insert_item(&NewItem::new("test", Pin::Shortcut('a'), "odd")).unwrap();
        q.insert_content(odd, schema::PLAIN_TEXT_TYPE, b"odd").unwrap();
        // broken: pinned without content
        q.insert_item(&NewItem::new("test", Pin::Plain, "lost")).unwrap();

        let stats = Analyzer::new(&alphabet).analyze(&q).unwrap();
        assert_eq!(
            stats,
            StoreStats {
                total_items: 6,
                total_contents: 5,
                pinned_items: 5,
                shortcut_items: 2,
                broken_items: 1,
                legacy_items: 0,
            }
        );
        assert_eq!(stats.plain_pinned_items(), 3);
        assert!(!stats.is_healthy());
    }

    #[test]
    fn test_display_lists_counts() {
        let stats = StoreStats {
            total_items: 10,
            pinned_items: 4,
            shortcut_items: 1,
            ..Default::default()
        };
        let text = stats.to_string();
        assert!(text.contains("Pinned items: 4"));
        assert!(text.contains("Without shortcut: 3"));
    }
}
