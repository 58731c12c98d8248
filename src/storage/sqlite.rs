//! SQLite storage implementation

use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, DatabaseName, OpenFlags, OptionalExtension};
use rusqlite::types::ValueRef;
use serde::Serialize;
use crate::{Error, Result};
use crate::shortcut::{Pin, LEGACY_MARKER};
use super::schema;

/// Unix time of 2001-01-01T00:00:00Z, the Core Data reference date
const REFERENCE_DATE_UNIX: i64 = 978_307_200;

/// Seconds since the Core Data reference date
pub fn reference_timestamp(at: DateTime<Utc>) -> f64 {
    (at.timestamp_millis() - REFERENCE_DATE_UNIX * 1000) as f64 / 1000.0
}

/// Handle on Maccy's `Storage.sqlite`
pub struct PinStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl PinStore {
    /// Open an existing store. Fails if the file or its tables are missing;
    /// the schema belongs to Maccy and is never created here.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::StoreNotFound(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.check_schema()?;
        tracing::debug!("Opened store {}", path.display());
        Ok(store)
    }

    /// Create a fresh store file with Maccy's table layout
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn, path: None };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    fn check_schema(&self) -> Result<()> {
        let queries = self.queries();
        for table in schema::REQUIRED_TABLES {
            if !queries.has_table(table)? {
                return Err(Error::Configuration(format!(
                    "table {} is missing; is this a Maccy database?",
                    table
                )));
            }
        }
        Ok(())
    }

    /// Location of the store file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn raw(&self) -> &Connection {
        &self.conn
    }

    /// Read access outside of a transaction
    pub fn queries(&self) -> Queries<'_> {
        Queries::new(&self.conn)
    }

    /// Run `f` inside one transaction. Commits on `Ok`, rolls back on `Err`.
    pub fn in_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Queries<'_>) -> Result<T>,
    {
        let tx = self.conn.transaction()?;
        let outcome = f(&Queries::new(&tx));
        match outcome {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!("Rolling back transaction: {}", err);
                tx.rollback()?;
                Err(err)
            }
        }
    }

    /// Copy the whole database to `dest` with SQLite's online backup API,
    /// so pages still sitting in the WAL are included.
    pub fn backup_to(&self, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.conn.backup(DatabaseName::Main, dest, None)?;
        tracing::info!("Backup written to {}", dest.display());
        Ok(())
    }
}

/// All SQL against the two Maccy tables.
///
/// Borrowing a plain connection or a transaction (which derefs to one) lets
/// the same queries run inside and outside a transaction scope.
pub struct Queries<'c> {
    conn: &'c Connection,
}

impl<'c> Queries<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn has_table(&self, name: &str) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    // ========== Core Data Bookkeeping ==========

    /// `Z_ENT` of an entity, from `Z_PRIMARYKEY` when the store has it
    pub fn entity_id(&self, entity: &str, fallback: i64) -> Result<i64> {
        if !self.has_table("Z_PRIMARYKEY")? {
            return Ok(fallback);
        }
        let ent: Option<i64> = self
            .conn
            .query_row(
                "SELECT Z_ENT FROM Z_PRIMARYKEY WHERE Z_NAME = ?1",
                [entity],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ent.unwrap_or(fallback))
    }

    /// Raise `Z_MAX` to the highest key in use so Maccy never reuses one
    pub fn sync_primary_keys(&self) -> Result<()> {
        if !self.has_table("Z_PRIMARYKEY")? {
            return Ok(());
        }
        self.conn.execute(
            r#"
            UPDATE Z_PRIMARYKEY
            SET Z_MAX = MAX(IFNULL(Z_MAX, 0), (SELECT IFNULL(MAX(Z_PK), 0) FROM ZHISTORYITEM))
            WHERE Z_NAME = ?1
            "#,
            [schema::ITEM_ENTITY],
        )?;
        self.conn.execute(
            r#"
            UPDATE Z_PRIMARYKEY
            SET Z_MAX = MAX(IFNULL(Z_MAX, 0), (SELECT IFNULL(MAX(Z_PK), 0) FROM ZHISTORYITEMCONTENT))
            WHERE Z_NAME = ?1
            "#,
            [schema::CONTENT_ENTITY],
        )?;
        Ok(())
    }

    // ========== Item Operations ==========

    /// Insert a history item and return its `Z_PK`
    pub fn insert_item(&self, item: &NewItem) -> Result<i64> {
        let ent = self.entity_id(schema::ITEM_ENTITY, schema::DEFAULT_ITEM_ENT)?;
        self.conn.execute(
            r#"
            INSERT INTO ZHISTORYITEM (
                Z_PK, Z_ENT, Z_OPT, ZAPPLICATION, ZFIRSTCOPIEDAT, ZLASTCOPIEDAT,
                ZNUMBEROFCOPIES, ZPIN, ZTITLE
            )
            VALUES (NULL, ?1, 1, ?2, ?3, ?3, 1, ?4, ?5)
            "#,
            params![ent, item.application, item.timestamp, item.pin.to_column(), item.title],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_item(&self, id: i64) -> Result<Option<PinnedItem>> {
        self.conn
            .query_row(
                "SELECT Z_PK, ZAPPLICATION, ZFIRSTCOPIEDAT, ZLASTCOPIEDAT, ZNUMBEROFCOPIES, ZPIN, ZTITLE FROM ZHISTORYITEM WHERE Z_PK = ?1",
                [id],
                row_to_item,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Items whose pin column is non-null, ordered by key
    pub fn pinned_items(&self) -> Result<Vec<PinnedItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT Z_PK, ZAPPLICATION, ZFIRSTCOPIEDAT, ZLASTCOPIEDAT, ZNUMBEROFCOPIES, ZPIN, ZTITLE FROM ZHISTORYITEM WHERE ZPIN IS NOT NULL ORDER BY Z_PK"
        )?;
        let items = stmt
            .query_map([], row_to_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    /// Raw pin values that are neither NULL nor empty
    pub fn used_pin_values(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT ZPIN FROM ZHISTORYITEM WHERE ZPIN IS NOT NULL AND ZPIN != ''")?;
        let values = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(values)
    }

    /// Overwrite the pin of one item
    pub fn set_pin(&self, id: i64, pin: Pin) -> Result<usize> {
        let changed = self.conn.execute(
            "UPDATE ZHISTORYITEM SET ZPIN = ?1, Z_OPT = IFNULL(Z_OPT, 0) + 1 WHERE Z_PK = ?2",
            params![pin.to_column(), id],
        )?;
        Ok(changed)
    }

    /// Rewrite legacy `_` pins to the empty plain pin
    pub fn normalize_legacy_pins(&self) -> Result<usize> {
        let changed = self.conn.execute(
            "UPDATE ZHISTORYITEM SET ZPIN = '', Z_OPT = IFNULL(Z_OPT, 0) + 1 WHERE ZPIN = ?1",
            [LEGACY_MARKER],
        )?;
        Ok(changed)
    }

    // ========== Content Operations ==========

    /// Insert a content record for an item and return its `Z_PK`
    pub fn insert_content(&self, item_id: i64, content_type: &str, value: &[u8]) -> Result<i64> {
        let ent = self.entity_id(schema::CONTENT_ENTITY, schema::DEFAULT_CONTENT_ENT)?;
        self.conn.execute(
            r#"
            INSERT INTO ZHISTORYITEMCONTENT (Z_PK, Z_ENT, Z_OPT, ZTYPE, ZVALUE, ZITEM)
            VALUES (NULL, ?1, 1, ?2, ?3, ?4)
            "#,
            params![ent, content_type, value, item_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Overwrite every content record of an item in place
    pub fn update_content(&self, item_id: i64, content_type: &str, value: &[u8]) -> Result<usize> {
        let changed = self.conn.execute(
            r#"
            UPDATE ZHISTORYITEMCONTENT
            SET ZVALUE = ?1, ZTYPE = ?2, Z_OPT = IFNULL(Z_OPT, 0) + 1
            WHERE ZITEM = ?3
            "#,
            params![value, content_type, item_id],
        )?;
        Ok(changed)
    }

    pub fn content_for_item(&self, item_id: i64) -> Result<Vec<ContentRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT Z_PK, ZTYPE, ZVALUE, ZITEM FROM ZHISTORYITEMCONTENT WHERE ZITEM = ?1 ORDER BY Z_PK",
        )?;
        let records = stmt
            .query_map([item_id], row_to_content)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Number of content rows owned by an item, empty or not
    pub fn count_content_rows(&self, item_id: i64) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM ZHISTORYITEMCONTENT WHERE ZITEM = ?1",
            [item_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Whether an item owns at least one non-empty content record
    pub fn has_content(&self, item_id: i64) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM ZHISTORYITEMCONTENT WHERE ZITEM = ?1 AND IFNULL(LENGTH(ZVALUE), 0) > 0)",
            [item_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Exact byte match against every stored payload, TEXT or BLOB
    pub fn content_exists(&self, value: &[u8]) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM ZHISTORYITEMCONTENT WHERE CAST(ZVALUE AS BLOB) = ?1)",
            [value],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    // ========== Integrity Scans ==========

    /// Pinned items without any non-empty content record
    pub fn broken_items(&self) -> Result<Vec<BrokenItem>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT hi.Z_PK, hi.ZPIN, hi.ZTITLE, hi.ZAPPLICATION
            FROM ZHISTORYITEM hi
            WHERE hi.ZPIN IS NOT NULL
            AND NOT EXISTS (
                SELECT 1 FROM ZHISTORYITEMCONTENT hic
                WHERE hic.ZITEM = hi.Z_PK AND IFNULL(LENGTH(hic.ZVALUE), 0) > 0
            )
            ORDER BY hi.Z_PK
            "#,
        )?;
        let items = stmt
            .query_map([], |row| {
                let pin: Option<String> = row.get(1)?;
                Ok(BrokenItem {
                    id: row.get(0)?,
                    pin: Pin::from_column(pin.as_deref()),
                    title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    application: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    pub fn count_broken(&self) -> Result<usize> {
        self.count(
            r#"
            SELECT COUNT(*) FROM ZHISTORYITEM hi
            WHERE hi.ZPIN IS NOT NULL
            AND NOT EXISTS (
                SELECT 1 FROM ZHISTORYITEMCONTENT hic
                WHERE hic.ZITEM = hi.Z_PK AND IFNULL(LENGTH(hic.ZVALUE), 0) > 0
            )
            "#,
        )
    }

    pub fn count_items(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM ZHISTORYITEM")
    }

    pub fn count_contents(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM ZHISTORYITEMCONTENT")
    }

    /// Pinned items, including plain pins stored as `''`
    pub fn count_pinned(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM ZHISTORYITEM WHERE ZPIN IS NOT NULL")
    }

    pub fn count_legacy(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM ZHISTORYITEM WHERE ZPIN = ?1",
            [LEGACY_MARKER],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Helper to convert a row to a PinnedItem
fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<PinnedItem> {
    let raw_pin: Option<String> = row.get(5)?;
    Ok(PinnedItem {
        id: row.get(0)?,
        application: row.get(1)?,
        first_copied_at: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
        last_copied_at: row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
        copies: row.get::<_, Option<i64>>(4)?.unwrap_or_default(),
        pin: Pin::from_column(raw_pin.as_deref()),
        raw_pin,
        title: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
    })
}

/// Helper to convert a row to a ContentRecord. ZVALUE may be TEXT or BLOB.
fn row_to_content(row: &rusqlite::Row) -> rusqlite::Result<ContentRecord> {
    let value = match row.get_ref(2)? {
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => bytes.to_vec(),
        ValueRef::Null => Vec::new(),
        other => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                2,
                other.data_type(),
                "unexpected ZVALUE storage class".into(),
            ))
        }
    };
    Ok(ContentRecord {
        id: row.get(0)?,
        content_type: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        value,
        item_id: row.get(3)?,
    })
}

/// A history item as stored in ZHISTORYITEM
#[derive(Debug, Clone, Serialize)]
pub struct PinnedItem {
    pub id: i64,
    pub application: Option<String>,
    pub first_copied_at: f64,
    pub last_copied_at: f64,
    pub copies: i64,
    pub pin: Pin,
    /// Column value as read, before legacy normalization
    pub raw_pin: Option<String>,
    pub title: String,
}

/// A payload row from ZHISTORYITEMCONTENT
#[derive(Debug, Clone)]
pub struct ContentRecord {
    pub id: i64,
    pub content_type: String,
    pub value: Vec<u8>,
    pub item_id: i64,
}

impl ContentRecord {
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

/// A pinned item found without usable content
#[derive(Debug, Clone, Serialize)]
pub struct BrokenItem {
    pub id: i64,
    pub pin: Pin,
    pub title: String,
    pub application: Option<String>,
}

/// Item fields supplied on insert; the key is assigned by SQLite
#[derive(Debug, Clone)]
pub struct NewItem {
    pub application: String,
    pub timestamp: f64,
    pub pin: Pin,
    pub title: String,
}

impl NewItem {
    pub fn new(application: impl Into<String>, pin: Pin, title: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            timestamp: reference_timestamp(Utc::now()),
            pin,
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample_item(pin: Pin, title: &str) -> NewItem {
        NewItem::new("com.example.test", pin, title)
    }

    #[test]
    fn test_reference_timestamp() {
        let at = Utc.with_ymd_and_hms(2001, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(reference_timestamp(at), 86_400.0);
    }

    #[test]
    fn test_item_and_content_crud() {
        let store = PinStore::open_in_memory().unwrap();
        let q = store.queries();

        let id = q.insert_item(&sample_item(Pin::Shortcut('b'), "hello")).unwrap();
        q.insert_content(id, schema::PLAIN_TEXT_TYPE, b"hello").unwrap();

        let item = q.get_item(id).unwrap().unwrap();
        assert_eq!(item.pin, Pin::Shortcut('b'));
        assert_eq!(item.title, "hello");
        assert_eq!(item.copies, 1);
        assert_eq!(item.first_copied_at, item.last_copied_at);

        let contents = q.content_for_item(id).unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].text(), Some("hello"));
        assert!(q.has_content(id).unwrap());
    }

    #[test]
    fn test_content_exists_matches_text_and_blob() {
        let store = PinStore::open_in_memory().unwrap();
        let q = store.queries();

        let id = q.insert_item(&sample_item(Pin::Plain, "blob")).unwrap();
        q.insert_content(id, schema::PLAIN_TEXT_TYPE, "blob".as_bytes()).unwrap();

        // Older tools stored the payload as TEXT
        let legacy = q.insert_item(&sample_item(Pin::Plain, "text")).unwrap();
        store
            .conn
            .execute(
                "INSERT INTO ZHISTORYITEMCONTENT (Z_ENT, Z_OPT, ZTYPE, ZVALUE, ZITEM) VALUES (2, 1, ?1, ?2, ?3)",
                params![schema::PLAIN_TEXT_TYPE, "text", legacy],
            )
            .unwrap();

        assert!(q.content_exists(b"blob").unwrap());
        assert!(q.content_exists(b"text").unwrap());
        assert!(!q.content_exists(b"Blob").unwrap());
        assert!(!q.content_exists(b"blob ").unwrap());
    }

    #[test]
    fn test_broken_items_scan() {
        let store = PinStore::open_in_memory().unwrap();
        let q = store.queries();

        let complete = q.insert_item(&sample_item(Pin::Plain, "ok")).unwrap();
        q.insert_content(complete, schema::PLAIN_TEXT_TYPE, b"ok").unwrap();

        let missing = q.insert_item(&sample_item(Pin::Shortcut('c'), "missing")).unwrap();

        let empty = q.insert_item(&sample_item(Pin::Plain, "empty")).unwrap();
        q.insert_content(empty, schema::PLAIN_TEXT_TYPE, b"").unwrap();

        // Unpinned items are never counted as broken
        q.insert_item(&sample_item(Pin::Unpinned, "history")).unwrap();

        let broken: Vec<i64> = q.broken_items().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(broken, vec![missing, empty]);
        assert_eq!(q.count_broken().unwrap(), 2);
        assert_eq!(q.count_pinned().unwrap(), 3);
        assert_eq!(q.count_items().unwrap(), 4);
        assert_eq!(q.count_contents().unwrap(), 2);
    }

    #[test]
    fn test_normalize_legacy_pins() {
        let store = PinStore::open_in_memory().unwrap();
        let q = store.queries();

        let id = q.insert_item(&sample_item(Pin::Plain, "legacy")).unwrap();
        store
            .conn
            .execute("UPDATE ZHISTORYITEM SET ZPIN = '_' WHERE Z_PK = ?1", [id])
            .unwrap();

        let item = q.get_item(id).unwrap().unwrap();
        assert_eq!(item.pin, Pin::Plain);
        assert_eq!(item.raw_pin.as_deref(), Some("_"));
        assert_eq!(q.count_legacy().unwrap(), 1);

        assert_eq!(q.normalize_legacy_pins().unwrap(), 1);
        assert_eq!(q.normalize_legacy_pins().unwrap(), 0);
        assert_eq!(q.get_item(id).unwrap().unwrap().raw_pin.as_deref(), Some(""));
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let mut store = PinStore::open_in_memory().unwrap();

        let result: Result<()> = store.in_transaction(|q| {
            q.insert_item(&sample_item(Pin::Plain, "doomed"))?;
            Err(Error::Verification("forced".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(store.queries().count_items().unwrap(), 0);
    }

    #[test]
    fn test_primary_key_bookkeeping() {
        let store = PinStore::open_in_memory().unwrap();
        let q = store.queries();

        assert_eq!(q.entity_id(schema::ITEM_ENTITY, 99).unwrap(), 1);
        assert_eq!(q.entity_id(schema::CONTENT_ENTITY, 99).unwrap(), 2);
        assert_eq!(q.entity_id("Unknown", 99).unwrap(), 99);

        let id = q.insert_item(&sample_item(Pin::Plain, "x")).unwrap();
        q.sync_primary_keys().unwrap();

        let max: i64 = store
            .conn
            .query_row("SELECT Z_MAX FROM Z_PRIMARYKEY WHERE Z_NAME = 'HistoryItem'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(max, id);
    }

    #[test]
    fn test_open_requires_existing_store() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("Storage.sqlite");

        match PinStore::open(&missing) {
            Err(Error::StoreNotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected StoreNotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_open_rejects_foreign_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.sqlite");
        Connection::open(&path)
            .unwrap()
            .execute("CREATE TABLE unrelated (id INTEGER)", [])
            .unwrap();

        let err = PinStore::open(&path).err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_backup_copies_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Storage.sqlite");
        let backup = dir.path().join("backups").join("Storage.sqlite.backup");

        {
            let store = PinStore::create(&path).unwrap();
            let q = store.queries();
            let id = q.insert_item(&sample_item(Pin::Plain, "kept")).unwrap();
            q.insert_content(id, schema::PLAIN_TEXT_TYPE, b"kept").unwrap();
        }

        let store = PinStore::open(&path).unwrap();
        store.backup_to(&backup).unwrap();

        let copy = PinStore::open(&backup).unwrap();
        assert_eq!(copy.queries().count_items().unwrap(), 1);
        assert!(copy.queries().content_exists(b"kept").unwrap());
    }
}
