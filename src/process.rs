//! Owning-application detection
//!
//! Writing to the store while Maccy runs risks Maccy overwriting our rows
//! from its in-memory context. The check is advisory: callers decide whether
//! to ask the operator or go ahead.

use std::ffi::OsStr;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

/// Process name of the clipboard manager
pub const DEFAULT_PROCESS_NAME: &str = "Maccy";

/// Whether any process with exactly this name is running
pub fn is_running(name: &str) -> bool {
    let mut sys = System::new_with_specifics(
        RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
    );
    sys.refresh_processes(ProcessesToUpdate::All, true);
    let running = sys.processes_by_exact_name(OsStr::new(name)).next().is_some();
    tracing::debug!("Process {} running: {}", name, running);
    running
}
