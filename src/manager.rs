//! PinManager - the workflows behind each CLI command
//!
//! Every mutating workflow opens the store once, writes a backup, then runs
//! its component inside a single transaction. Refusals that need no write
//! (no free shortcut keys) happen before the backup, so an earlier backup
//! survives them.
//! - `import`: capacity check → backup → import → closing analysis → repair if broken → final check
//! - `repair`: backup → repair → re-scan
//! - `remove_shortcuts`: backup → clear shortcuts → verify
//! - `analyze`: read-only

use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::{Error, Result};
use crate::config::PinConfig;
use crate::entry::{parse_entries, Entry};
use crate::importer::{ImportEvent, ImportReport, Importer};
use crate::remover::{RemovalReport, ShortcutRemover};
use crate::repair::{RepairReport, Repairer};
use crate::shortcut::ShortcutAlphabet;
use crate::storage::{BrokenItem, PinStore, PinnedItem};
use crate::verify::{Analyzer, StoreStats};

/// Everything the import workflow did
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub entries: usize,
    pub import: ImportReport,
    /// Present when the closing check found problems to fix
    pub repair: Option<RepairReport>,
    pub stats: StoreStats,
    pub backup: PathBuf,
}

pub struct PinManager {
    config: PinConfig,
    alphabet: ShortcutAlphabet,
}

impl PinManager {
    pub fn new(config: PinConfig) -> Result<Self> {
        let alphabet = config.alphabet()?;
        Ok(Self { config, alphabet })
    }

    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &ShortcutAlphabet {
        &self.alphabet
    }

    pub fn database_path(&self) -> PathBuf {
        self.config.database_path()
    }

    pub fn open_store(&self) -> Result<PinStore> {
        PinStore::open(&self.database_path())
    }

    /// Whether the owning clipboard app is running right now
    pub fn owner_running(&self) -> bool {
        crate::process::is_running(self.config.process_name())
    }

    fn backup(&self, store: &PinStore) -> Result<PathBuf> {
        let dest = self.config.backup_path();
        store.backup_to(&dest)?;
        Ok(dest)
    }

    /// Read-only status report
    pub fn analyze(&self) -> Result<StoreStats> {
        let store = self.open_store()?;
        Analyzer::new(&self.alphabet).analyze(&store.queries())
    }

    /// Every pinned item, for listings
    pub fn pinned_items(&self) -> Result<Vec<PinnedItem>> {
        self.open_store()?.queries().pinned_items()
    }

    pub fn broken_items(&self) -> Result<Vec<BrokenItem>> {
        self.open_store()?.queries().broken_items()
    }

    pub fn repair(&self) -> Result<RepairReport> {
        let mut store = self.open_store()?;
        self.backup(&store)?;
        self.repairer().repair(&mut store)
    }

    pub fn remove_shortcuts(&self) -> Result<RemovalReport> {
        let mut store = self.open_store()?;
        self.backup(&store)?;
        ShortcutRemover::new(&self.alphabet).remove_all(&mut store)
    }

    /// Read and parse an input file; a file with no entries is an error
    pub fn read_entries(&self, file: &Path) -> Result<Vec<Entry>> {
        let text = std::fs::read_to_string(file)?;
        let entries = parse_entries(&text);
        if entries.is_empty() {
            return Err(Error::Configuration(format!(
                "{} contains no entries",
                file.display()
            )));
        }
        tracing::info!("Found {} entries in {}", entries.len(), file.display());
        Ok(entries)
    }

    /// Import a paragraph-delimited text file as pinned entries
    pub fn import_file<F>(&self, file: &Path, assign_shortcuts: bool, on_event: F) -> Result<ImportOutcome>
    where
        F: FnMut(ImportEvent<'_>),
    {
        let entries = self.read_entries(file)?;
        self.import_entries(&entries, assign_shortcuts, on_event)
    }

    pub fn import_entries<F>(&self, entries: &[Entry], assign_shortcuts: bool, on_event: F) -> Result<ImportOutcome>
    where
        F: FnMut(ImportEvent<'_>),
    {
        let mut store = self.open_store()?;
        let importer = Importer::new(&self.alphabet)
            .with_application(self.config.source_application());
        if assign_shortcuts {
            importer.check_capacity(&store.queries())?;
        }

        let backup = self.backup(&store)?;
        let import = importer.import(&mut store, entries, assign_shortcuts, on_event)?;

        let analyzer = Analyzer::new(&self.alphabet);
        let mut stats = analyzer.analyze(&store.queries())?;
        let mut repair = None;
        if !stats.is_healthy() {
            tracing::warn!(
                "Store has {} broken and {} legacy items, repairing",
                stats.broken_items,
                stats.legacy_items
            );
            let report = self.repairer().repair(&mut store)?;
            stats = report.stats;
            repair = Some(report);
        }

        if !stats.is_healthy() {
            let remaining = store.queries().broken_items()?.into_iter().map(|b| b.id).collect();
            return Err(Error::Integrity(remaining));
        }

        Ok(ImportOutcome {
            entries: entries.len(),
            import,
            repair,
            stats,
            backup,
        })
    }

    fn repairer(&self) -> Repairer<'_> {
        Repairer::new(&self.alphabet).with_policy(self.config.recovery())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::Pin;
    use crate::storage::{schema, NewItem};
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        manager: PinManager,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_config(PinConfig::default())
        }

        fn with_keys(keys: &str) -> Self {
            Self::with_config(PinConfig {
                shortcut_keys: Some(keys.to_string()),
                ..Default::default()
            })
        }

        fn with_config(base: PinConfig) -> Self {
            let dir = TempDir::new().unwrap();
            let db = dir.path().join("Storage.sqlite");
            PinStore::create(&db).unwrap();
            let config = PinConfig {
                database: Some(db.display().to_string()),
                ..base
            };
            Self {
                manager: PinManager::new(config).unwrap(),
                dir,
            }
        }

        fn write_input(&self, text: &str) -> PathBuf {
            let path = self.dir.path().join("pins.txt");
            std::fs::write(&path, text).unwrap();
            path
        }
    }

    #[test]
    fn test_import_file_workflow() {
        let fx = Fixture::new();
        let input = fx.write_input("alpha\n\nbeta\ngamma\n");

        let outcome = fx.manager.import_file(&input, true, |_| {}).unwrap();

        assert_eq!(outcome.entries, 2);
        assert_eq!(outcome.import.inserted, 2);
        assert_eq!(outcome.import.shortcuts, 2);
        assert!(outcome.repair.is_none());
        assert_eq!(outcome.stats.shortcut_items, 2);
        assert!(outcome.backup.exists());

        // the backup is the pre-import state
        let backup = PinStore::open(&outcome.backup).unwrap();
        assert_eq!(backup.queries().count_items().unwrap(), 0);
    }

    #[test]
    fn test_import_repairs_preexisting_orphans() {
        let fx = Fixture::new();
        let orphan = {
            let store = fx.manager.open_store().unwrap();
            let id = store
                .queries()
                .insert_item(&NewItem::new("old", Pin::Plain, "orphan title"))
                .unwrap();
            id
        };
        let input = fx.write_input("fresh entry");

        let outcome = fx.manager.import_file(&input, false, |_| {}).unwrap();

        let repair = outcome.repair.expect("closing check should trigger repair");
        assert_eq!(repair.recovered.len(), 1);
        assert_eq!(repair.recovered[0].id, orphan);
        assert!(outcome.stats.is_healthy());
    }

    #[test]
    fn test_no_free_keys_keeps_previous_backup() {
        let fx = Fixture::with_keys("bc");
        {
            let store = fx.manager.open_store().unwrap();
            let q = store.queries();
            let id = q.insert_item(&NewItem::new("t", Pin::Plain, "first")).unwrap();
            q.insert_content(id, schema::PLAIN_TEXT_TYPE, b"first").unwrap();
        }
        // an earlier workflow leaves a backup holding one item
        fx.manager.repair().unwrap();
        let backup_path = fx.manager.config().backup_path();
        let count_backup = || {
            PinStore::open(&backup_path)
                .unwrap()
                .queries()
                .count_items()
                .unwrap()
        };
        assert_eq!(count_backup(), 1);

        {
            let store = fx.manager.open_store().unwrap();
            let q = store.queries();
            for key in ['b', 'c'] {
                let text = key.to_string();
                let id = q.insert_item(&NewItem::new("t", Pin::Shortcut(key), &text)).unwrap();
                q.insert_content(id, schema::PLAIN_TEXT_TYPE, text.as_bytes()).unwrap();
            }
        }

        let entries = parse_entries("new one\n\nnew two");
        let err = fx.manager.import_entries(&entries, true, |_| {}).unwrap_err();

        assert!(matches!(err, Error::NoFreeSlots(2)));
        assert_eq!(count_backup(), 1);
        assert_eq!(fx.manager.analyze().unwrap().total_items, 3);
    }

    #[test]
    fn test_import_empty_file_fails() {
        let fx = Fixture::new();
        let input = fx.write_input("\n\n   \n");

        let err = fx.manager.import_file(&input, false, |_| {}).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_store_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let config = PinConfig {
            database: Some(dir.path().join("nope.sqlite").display().to_string()),
            ..Default::default()
        };
        let manager = PinManager::new(config).unwrap();

        assert!(matches!(manager.analyze(), Err(Error::StoreNotFound(_))));
        assert!(matches!(manager.repair(), Err(Error::StoreNotFound(_))));
    }

    #[test]
    fn test_remove_shortcuts_then_analyze() {
        let fx = Fixture::new();
        {
            let store = fx.manager.open_store().unwrap();
            let q = store.queries();
            let id = q.insert_item(&NewItem::new("t", Pin::Shortcut('e'), "e")).unwrap();
            q.insert_content(id, schema::PLAIN_TEXT_TYPE, b"e").unwrap();
        }

        let report = fx.manager.remove_shortcuts().unwrap();
        assert_eq!(report.cleared.len(), 1);

        let stats = fx.manager.analyze().unwrap();
        assert_eq!(stats.shortcut_items, 0);
        assert_eq!(stats.pinned_items, 1);
        assert!(fx.manager.config().backup_path().exists());
    }

    #[test]
    fn test_repair_twice() {
        let fx = Fixture::new();
        {
            let store = fx.manager.open_store().unwrap();
            store
                .queries()
                .insert_item(&NewItem::new("old", Pin::Shortcut('b'), "lost"))
                .unwrap();
        }

        let first = fx.manager.repair().unwrap();
        let second = fx.manager.repair().unwrap();
        assert_eq!(first.mutations(), 1);
        assert_eq!(second.mutations(), 0);
        assert_eq!(second.stats.broken_items, 0);
    }
}
