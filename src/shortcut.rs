//! Pin state and shortcut slot allocation
//!
//! Maccy stores the pin of a history item in a single nullable text column:
//! - `NULL` - not pinned
//! - `""` - pinned without a shortcut
//! - `"b"` - pinned with the quick-select key `b`
//!
//! Older import tools wrote `_` for "pinned without a shortcut". It is read
//! as a plain pin here and rewritten to `""` by the repair pass.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Legacy placeholder for "pinned without shortcut"
pub const LEGACY_MARKER: &str = "_";

/// Keys Maccy accepts as pin shortcuts.
///
/// a, q, v, w and z are reserved by the app (select all, quit, paste, close, undo).
pub const MACCY_SHORTCUT_KEYS: &str = "bcdefghijklmnoprstuxy";

/// Canonical pin state of a history item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    Unpinned,
    Plain,
    Shortcut(char),
}

impl Pin {
    /// Read the raw `ZPIN` column value
    pub fn from_column(value: Option<&str>) -> Self {
        match value {
            None => Pin::Unpinned,
            Some("") | Some(LEGACY_MARKER) => Pin::Plain,
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Pin::Shortcut(c),
                    _ => Pin::Plain,
                }
            }
        }
    }

    /// Value written back to the `ZPIN` column
    pub fn to_column(&self) -> Option<String> {
        match self {
            Pin::Unpinned => None,
            Pin::Plain => Some(String::new()),
            Pin::Shortcut(c) => Some(c.to_string()),
        }
    }

    pub fn is_pinned(&self) -> bool {
        !matches!(self, Pin::Unpinned)
    }

    pub fn shortcut(&self) -> Option<char> {
        match self {
            Pin::Shortcut(c) => Some(*c),
            _ => None,
        }
    }
}

impl std::fmt::Display for Pin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pin::Unpinned => write!(f, "unpinned"),
            Pin::Plain => write!(f, "pinned"),
            Pin::Shortcut(c) => write!(f, "[{}]", c),
        }
    }
}

/// The immutable set of characters usable as shortcut slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutAlphabet {
    keys: BTreeSet<char>,
}

impl Default for ShortcutAlphabet {
    fn default() -> Self {
        Self::maccy()
    }
}

impl ShortcutAlphabet {
    /// The key set Maccy itself offers for pins
    pub fn maccy() -> Self {
        Self {
            keys: MACCY_SHORTCUT_KEYS.chars().collect(),
        }
    }

    /// Build an alphabet from a string of keys, e.g. `"bcdef"`.
    pub fn parse(keys: &str) -> Result<Self> {
        let mut set = BTreeSet::new();
        for c in keys.chars() {
            if c.is_whitespace() || c.is_control() {
                return Err(Error::Configuration(format!(
                    "shortcut key {:?} is not a printable character",
                    c
                )));
            }
            if c.to_string() == LEGACY_MARKER {
                return Err(Error::Configuration(format!(
                    "'{}' is the legacy pin marker and cannot be a shortcut",
                    LEGACY_MARKER
                )));
            }
            if !set.insert(c) {
                return Err(Error::Configuration(format!("duplicate shortcut key '{}'", c)));
            }
        }
        if set.is_empty() {
            return Err(Error::Configuration("shortcut alphabet is empty".to_string()));
        }
        Ok(Self { keys: set })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: char) -> bool {
        self.keys.contains(&key)
    }

    /// Membership test on a raw column value
    pub fn contains_value(&self, value: &str) -> bool {
        matches!(Pin::from_column(Some(value)), Pin::Shortcut(c) if self.contains(c))
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.keys.iter().copied()
    }

    pub fn as_string(&self) -> String {
        self.keys.iter().collect()
    }
}

/// Hands out free shortcut slots in ascending order, each at most once.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    free: VecDeque<char>,
}

impl SlotAllocator {
    /// Compute the free slots: the alphabet minus every used pin value.
    pub fn new<I, S>(alphabet: &ShortcutAlphabet, used: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let used: BTreeSet<char> = used
            .into_iter()
            .filter_map(|v| Pin::from_column(Some(v.as_ref())).shortcut())
            .collect();

        let free = alphabet.keys().filter(|k| !used.contains(k)).collect();
        Self { free }
    }

    /// Free slots still available, ascending
    pub fn free_slots(&self) -> Vec<char> {
        self.free.iter().copied().collect()
    }

    pub fn remaining(&self) -> usize {
        self.free.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    /// Take the lowest free slot
    pub fn allocate(&mut self) -> Option<char> {
        self.free.pop_front()
    }
}
