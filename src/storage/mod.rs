//! Storage Layer - Maccy's SQLite store
//!
//! The store is owned by Maccy. Two tables matter here:
//! - ZHISTORYITEM(Z_PK, ZAPPLICATION, ZFIRSTCOPIEDAT, ZLASTCOPIEDAT, ZNUMBEROFCOPIES, ZPIN, ZTITLE)
//! - ZHISTORYITEMCONTENT(Z_PK, ZTYPE, ZVALUE, ZITEM)
//!
//! Referential integrity between them is not enforced by SQLite.

pub mod schema;
pub mod sqlite;

pub use sqlite::{
    reference_timestamp, BrokenItem, ContentRecord, NewItem, PinStore, PinnedItem, Queries,
};
