//! # maccy-pins - Pinned entry maintenance for Maccy
//!
//! Operates directly on Maccy's `Storage.sqlite` while the app is closed.
//!
//! maccy-pins provides:
//! - Paragraph-based entry parsing for bulk imports
//! - Shortcut slot allocation over a fixed key alphabet
//! - Transactional import with duplicate detection and post-write checks
//! - Repair of legacy pin markers and items that lost their content
//! - Read-only store analysis and bulk shortcut removal

pub mod config;
pub mod entry;
pub mod importer;
pub mod manager;
pub mod process;
pub mod remover;
pub mod repair;
pub mod shortcut;
pub mod storage;
pub mod ui;
pub mod verify;

// Re-exports for convenient access
pub use entry::{parse_entries, Entry};
pub use importer::{ImportReport, Importer};
pub use manager::{ImportOutcome, PinManager};
pub use remover::{RemovalReport, ShortcutRemover};
pub use repair::{RecoveryPolicy, RepairReport, Repairer};
pub use shortcut::{Pin, ShortcutAlphabet, SlotAllocator};
pub use storage::PinStore;
pub use verify::{Analyzer, StoreStats};

use std::path::PathBuf;

/// Result type alias for maccy-pins operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for maccy-pins operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database not found: {}", .0.display())]
    StoreNotFound(PathBuf),

    #[error("No free shortcut slots (all {0} keys are in use)")]
    NoFreeSlots(usize),

    #[error("Integrity error: {} item(s) have no content: {:?}", .0.len(), .0)]
    Integrity(Vec<i64>),

    #[error("Verification failed: {0}")]
    Verification(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Configuration errors are raised before any write is attempted
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::StoreNotFound(_) | Error::NoFreeSlots(_)
        )
    }
}
