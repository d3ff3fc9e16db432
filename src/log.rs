// src/log.rs
//
// Developer-facing diagnostic channel. Failures in the sync engine degrade
// silently for the user (a field shows blank, an edit doesn't persist), so
// every recovered fault lands here instead: appended to a debug log file and
// kept in a small in-memory ring the GUI status pane can read back.

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

static LOG_FILE: &str = ".pagegrid/debug.log";
static RECENT_CAP: usize = 64;

static RECENT: Mutex<VecDeque<String>> = Mutex::new(VecDeque::new());
static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Internal logging function
pub fn write_log(level: &str, msg: &str) {
    let elapsed = fmt_elapsed(start().elapsed().as_millis());
    let line = format!("[{elapsed}][{level}] {msg}");

    if let Ok(mut recent) = RECENT.lock() {
        if recent.len() == RECENT_CAP {
            recent.pop_front();
        }
        recent.push_back(line.clone());
    }

    if let Ok(_guard) = LOG_LOCK.lock() {
        if let Some(parent) = std::path::Path::new(LOG_FILE).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(LOG_FILE)
        {
            let _ = writeln!(file, "{line}");
        }
    }
}

/// Last diagnostic line, if any. Shown in the GUI status pane.
pub fn last() -> Option<String> {
    RECENT.lock().ok().and_then(|r| r.back().cloned())
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::write_log("INFO", &format!($($arg)*))
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::write_log("DEBUG", &format!($($arg)*))
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::write_log("ERROR", &format!($($arg)*))
    };
}
