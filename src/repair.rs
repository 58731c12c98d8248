//! Repairer - legacy marker cleanup and orphan recovery
//!
//! Two passes run inside one transaction:
//! 1. Pins stored as the legacy `_` placeholder become `''`.
//! 2. Pinned items with no non-empty content get a content record rebuilt
//!    from their stored title.
//!
//! The title is at most 100 characters with newlines flattened, so recovery
//! is lossy. [`RecoveryPolicy::Report`] leaves such items untouched instead.
//!
//! Both passes only touch rows that are still inconsistent, so a second run
//! on a repaired store changes nothing.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::{Error, Result};
use crate::shortcut::ShortcutAlphabet;
use crate::storage::{schema, BrokenItem, PinStore};
use crate::verify::{Analyzer, StoreStats};

/// What to do with a pinned item whose content is gone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryPolicy {
    /// Rebuild the content from the item's title
    #[default]
    Title,
    /// Leave the item as is and report it as unrecoverable
    Report,
}

impl RecoveryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryPolicy::Title => "title",
            RecoveryPolicy::Report => "report",
        }
    }
}

impl FromStr for RecoveryPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "title" | "recover" => Ok(RecoveryPolicy::Title),
            "report" | "none" => Ok(RecoveryPolicy::Report),
            _ => Err(Error::Configuration(format!("Unknown recovery policy: {}", s))),
        }
    }
}

impl std::fmt::Display for RecoveryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a content record was restored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryAction {
    Inserted,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveredItem {
    pub id: i64,
    pub title: String,
    pub action: RecoveryAction,
}

/// Outcome of a repair run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepairReport {
    pub legacy_normalized: usize,
    pub recovered: Vec<RecoveredItem>,
    pub unrecoverable: Vec<BrokenItem>,
    /// Store state after commit
    pub stats: StoreStats,
}

impl RepairReport {
    /// Rows changed by this run
    pub fn mutations(&self) -> usize {
        self.legacy_normalized + self.recovered.len()
    }
}

pub struct Repairer<'a> {
    alphabet: &'a ShortcutAlphabet,
    policy: RecoveryPolicy,
}

impl<'a> Repairer<'a> {
    pub fn new(alphabet: &'a ShortcutAlphabet) -> Self {
        Self {
            alphabet,
            policy: RecoveryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RecoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run both passes, commit, then re-scan.
    ///
    /// Returns [`Error::Integrity`] with the ids still broken if the re-scan
    /// finds any; the committed fixes are kept in that case.
    pub fn repair(&self, store: &mut PinStore) -> Result<RepairReport> {
        let mut report = store.in_transaction(|q| {
            let mut report = RepairReport {
                legacy_normalized: q.normalize_legacy_pins()?,
                ..Default::default()
            };
            if report.legacy_normalized > 0 {
                tracing::info!("Normalized {} legacy '_' pins", report.legacy_normalized);
            }

            for item in q.broken_items()? {
                if self.policy == RecoveryPolicy::Report || item.title.trim().is_empty() {
                    tracing::warn!("Item {} has no content and cannot be recovered", item.id);
                    report.unrecoverable.push(item);
                    continue;
                }

                let payload = item.title.as_bytes();
                let action = if q.count_content_rows(item.id)? == 0 {
                    q.insert_content(item.id, schema::PLAIN_TEXT_TYPE, payload)?;
                    RecoveryAction::Inserted
                } else {
                    q.update_content(item.id, schema::PLAIN_TEXT_TYPE, payload)?;
                    RecoveryAction::Updated
                };
                tracing::debug!("Recovered item {} ({:?})", item.id, action);
                report.recovered.push(RecoveredItem {
                    id: item.id,
                    title: item.title,
                    action,
                });
            }

            q.sync_primary_keys()?;
            Ok(report)
        })?;

        let queries = store.queries();
        report.stats = Analyzer::new(self.alphabet).analyze(&queries)?;
        if report.stats.broken_items > 0 {
            let remaining = queries.broken_items()?.into_iter().map(|b| b.id).collect();
            return Err(Error::Integrity(remaining));
        }
        Ok(report)
    }
}
