//! Database schema definitions
//!
//! Mirrors the tables Maccy's SwiftData stack creates in `Storage.sqlite`.
//! The tool never creates these on a real store; they are only built for
//! fresh databases (tests, fixtures).

/// Core Data entity name of history items
pub const ITEM_ENTITY: &str = "HistoryItem";

/// Core Data entity name of content records
pub const CONTENT_ENTITY: &str = "HistoryItemContent";

/// `Z_ENT` used when the store has no `Z_PRIMARYKEY` table
pub const DEFAULT_ITEM_ENT: i64 = 1;
pub const DEFAULT_CONTENT_ENT: i64 = 2;

/// Uniform type identifier for plain text payloads
pub const PLAIN_TEXT_TYPE: &str = "public.utf8-plain-text";

/// Tables an existing store must have before we touch it
pub const REQUIRED_TABLES: &[&str] = &["ZHISTORYITEM", "ZHISTORYITEMCONTENT"];

/// SQL to create the history item table
pub const CREATE_HISTORY_ITEM_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ZHISTORYITEM (
    Z_PK INTEGER PRIMARY KEY,
    Z_ENT INTEGER,
    Z_OPT INTEGER,
    ZNUMBEROFCOPIES INTEGER,
    ZFIRSTCOPIEDAT TIMESTAMP,
    ZLASTCOPIEDAT TIMESTAMP,
    ZAPPLICATION VARCHAR,
    ZPIN VARCHAR,
    ZTITLE VARCHAR
)
"#;

/// SQL to create the content table
/// ZVALUE holds raw bytes; older tools wrote TEXT into it
pub const CREATE_HISTORY_ITEM_CONTENT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ZHISTORYITEMCONTENT (
    Z_PK INTEGER PRIMARY KEY,
    Z_ENT INTEGER,
    Z_OPT INTEGER,
    ZITEM INTEGER,
    ZTYPE VARCHAR,
    ZVALUE BLOB
)
"#;

/// SQL to create the Core Data primary key bookkeeping table
pub const CREATE_PRIMARY_KEY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Z_PRIMARYKEY (
    Z_ENT INTEGER PRIMARY KEY,
    Z_NAME VARCHAR,
    Z_SUPER INTEGER,
    Z_MAX INTEGER
)
"#;

pub const SEED_PRIMARY_KEYS: &str = r#"
INSERT OR IGNORE INTO Z_PRIMARYKEY (Z_ENT, Z_NAME, Z_SUPER, Z_MAX)
VALUES (1, 'HistoryItem', 0, 0), (2, 'HistoryItemContent', 0, 0)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS ZHISTORYITEMCONTENT_ZITEM_INDEX ON ZHISTORYITEMCONTENT (ZITEM)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_HISTORY_ITEM_TABLE,
        CREATE_HISTORY_ITEM_CONTENT_TABLE,
        CREATE_PRIMARY_KEY_TABLE,
        SEED_PRIMARY_KEYS,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
