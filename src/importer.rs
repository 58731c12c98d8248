//! Importer - bulk insertion of pinned entries
//!
//! Each entry becomes one ZHISTORYITEM row plus one ZHISTORYITEMCONTENT row.
//! A whole import is one transaction: it commits only after every inserted
//! item has been checked for its content row.

use serde::Serialize;
use crate::{Error, Result};
use crate::entry::Entry;
use crate::shortcut::{Pin, ShortcutAlphabet, SlotAllocator};
use crate::storage::{schema, NewItem, PinStore, Queries};

/// Source application recorded on imported items
pub const DEFAULT_SOURCE_APPLICATION: &str = "com.maccy.import";

/// Outcome of one import call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    /// Entries not inserted; all of them are duplicates
    pub skipped: usize,
    /// Inserted entries that received a shortcut
    pub shortcuts: usize,
    /// Legacy `_` pins rewritten along the way
    pub legacy_normalized: usize,
    pub item_ids: Vec<i64>,
}

/// Per-entry progress, reported while the transaction is still open
#[derive(Debug, Clone, Copy)]
pub enum ImportEvent<'e> {
    Inserted { entry: &'e Entry, id: i64, pin: Pin },
    Duplicate { entry: &'e Entry },
}

pub struct Importer<'a> {
    alphabet: &'a ShortcutAlphabet,
    application: String,
}

impl<'a> Importer<'a> {
    pub fn new(alphabet: &'a ShortcutAlphabet) -> Self {
        Self {
            alphabet,
            application: DEFAULT_SOURCE_APPLICATION.to_string(),
        }
    }

    /// Override the source application tag
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    /// Free shortcut keys, or [`Error::NoFreeSlots`] if every key is taken.
    /// Read-only; callers run it before any backup or write.
    pub fn check_capacity(&self, queries: &Queries<'_>) -> Result<SlotAllocator> {
        let allocator = SlotAllocator::new(self.alphabet, queries.used_pin_values()?);
        if allocator.is_exhausted() {
            return Err(Error::NoFreeSlots(self.alphabet.len()));
        }
        Ok(allocator)
    }

    /// Insert `entries` in order, skipping byte-identical duplicates.
    ///
    /// With `assign_shortcuts`, free keys are handed out in ascending order
    /// until they run out; later entries become plain pins. Fails with
    /// [`Error::NoFreeSlots`] before writing anything if no key is free.
    pub fn import<F>(
        &self,
        store: &mut PinStore,
        entries: &[Entry],
        assign_shortcuts: bool,
        mut on_event: F,
    ) -> Result<ImportReport>
    where
        F: FnMut(ImportEvent<'_>),
    {
        store.in_transaction(|q| {
            let mut allocator = if assign_shortcuts {
                let allocator = self.check_capacity(q)?;
                tracing::info!(
                    "Free shortcut keys: {}",
                    allocator.free_slots().into_iter().collect::<String>()
                );
                Some(allocator)
            } else {
                tracing::info!("Importing as plain pins (no shortcuts)");
                None
            };

            let mut report = ImportReport {
                legacy_normalized: q.normalize_legacy_pins()?,
                ..Default::default()
            };

            for entry in entries {
                let text = entry.text();
                if q.content_exists(text.as_bytes())? {
                    tracing::debug!("Skipping duplicate: {}", entry.preview(50));
                    report.skipped += 1;
                    on_event(ImportEvent::Duplicate { entry });
                    continue;
                }

                let pin = match allocator.as_mut().and_then(SlotAllocator::allocate) {
                    Some(key) => {
                        report.shortcuts += 1;
                        Pin::Shortcut(key)
                    }
                    None => Pin::Plain,
                };

                let id = q.insert_item(&NewItem::new(&self.application, pin, entry.title()))?;
                q.insert_content(id, schema::PLAIN_TEXT_TYPE, text.as_bytes())?;

                report.inserted += 1;
                report.item_ids.push(id);
                on_event(ImportEvent::Inserted { entry, id, pin });
            }

            let mut missing = Vec::new();
            for &id in &report.item_ids {
                if !q.has_content(id)? {
                    missing.push(id);
                }
            }
            if !missing.is_empty() {
                return Err(Error::Integrity(missing));
            }

            q.sync_primary_keys()?;
            Ok(report)
        })
    }
}
