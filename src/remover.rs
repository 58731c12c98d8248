//! Shortcut Remover - turn shortcut pins back into plain pins

use serde::Serialize;
use crate::{Error, Result};
use crate::shortcut::{Pin, ShortcutAlphabet};
use crate::storage::PinStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearedShortcut {
    pub id: i64,
    pub key: char,
    pub title: String,
}

/// Outcome of a removal run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemovalReport {
    /// Items whose shortcut was cleared, ordered by key
    pub cleared: Vec<ClearedShortcut>,
    /// Plain pins in the store after the run
    pub plain_pinned: usize,
}

pub struct ShortcutRemover<'a> {
    alphabet: &'a ShortcutAlphabet,
}

impl<'a> ShortcutRemover<'a> {
    pub fn new(alphabet: &'a ShortcutAlphabet) -> Self {
        Self { alphabet }
    }

    /// Clear every alphabet shortcut to a plain pin in one transaction.
    /// Rolls back if any alphabet shortcut is still present afterwards.
    pub fn remove_all(&self, store: &mut PinStore) -> Result<RemovalReport> {
        store.in_transaction(|q| {
            let mut cleared: Vec<ClearedShortcut> = q
                .pinned_items()?
                .into_iter()
                .filter_map(|item| match item.pin {
                    Pin::Shortcut(key) if self.alphabet.contains(key) => Some(ClearedShortcut {
                        id: item.id,
                        key,
                        title: item.title,
                    }),
                    _ => None,
                })
                .collect();
            cleared.sort_by_key(|c| c.key);

            for item in &cleared {
                q.set_pin(item.id, Pin::Plain)?;
                tracing::debug!("Cleared shortcut [{}] from item {}", item.key, item.id);
            }

            let remaining = q
                .used_pin_values()?
                .iter()
                .filter(|value| self.alphabet.contains_value(value))
                .count();
            if remaining > 0 {
                return Err(Error::Verification(format!(
                    "{} item(s) still have a shortcut",
                    remaining
                )));
            }

            let plain_pinned = q
                .pinned_items()?
                .iter()
                .filter(|item| item.pin == Pin::Plain)
                .count();

            Ok(RemovalReport {
                cleared,
                plain_pinned,
            })
        })
    }
}
