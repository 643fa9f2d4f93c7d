//! Bounded in-memory error log.
//!
//! Holds the most recent errors the [`ErrorReporter`](crate::ErrorReporter)
//! decided to log. Oldest entries are dropped first once the log is full, and
//! each message is clipped to a byte budget, so a burst of faults during a
//! large installation stays within a fixed memory envelope.
//!
//! Clones share one log. A writer that panicked while holding the lock does
//! not take the log down with it: later calls recover the guard and carry on.
//!
//! # Example
//!
//! ```rust
//! use package_validation::{ErrorLog, SystemError};
//!
//! let log = ErrorLog::new(100, 512);
//! log.record(&SystemError::new(42, "database connection lost"));
//!
//! let recent = log.get_recent(10);
//! assert_eq!(recent[0].code, 42);
//! assert_eq!(recent[0].message.as_ref(), "database connection lost");
//! ```

use crate::reporting::Reportable;
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

/// Appended to a message clipped to fit the byte budget.
pub const CLIPPED_MARKER: &str = " [clipped]";

/// One logged error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Unix timestamp (seconds) at which the error was recorded
    pub timestamp: u64,
    /// [`Reportable::numeric_code`] of the error
    pub code: u16,
    /// Display text of the error, clipped to the log's byte budget
    pub message: Arc<str>,
}

#[derive(Default)]
struct Entries {
    queue: VecDeque<LogEntry>,
    evicted: u64,
}

/// Fixed-capacity error log shared between clones.
#[derive(Clone)]
pub struct ErrorLog {
    entries: Arc<RwLock<Entries>>,
    capacity: usize,
    max_message_bytes: usize,
}

impl ErrorLog {
    /// Log holding at most `capacity` entries, each message clipped to
    /// `max_message_bytes`.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize, max_message_bytes: usize) -> Self {
        let capacity = capacity.max(1);
        let entries = Entries {
            queue: VecDeque::with_capacity(capacity),
            evicted: 0,
        };
        Self {
            entries: Arc::new(RwLock::new(entries)),
            capacity,
            max_message_bytes,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `err`, evicting the oldest entry when full.
    ///
    /// Returns the stored entry.
    pub fn record(&self, err: &dyn Reportable) -> LogEntry {
        let entry = LogEntry {
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_secs()),
            code: err.numeric_code(),
            message: clip(err.to_string(), self.max_message_bytes).into(),
        };

        let mut entries = self.write();
        if entries.queue.len() == self.capacity {
            entries.queue.pop_front();
            entries.evicted += 1;
        }
        entries.queue.push_back(entry.clone());
        entry
    }

    /// The `count` most recent entries, newest first.
    pub fn get_recent(&self, count: usize) -> Vec<LogEntry> {
        self.read().queue.iter().rev().take(count).cloned().collect()
    }

    /// All entries, newest first.
    pub fn get_all(&self) -> Vec<LogEntry> {
        self.get_recent(usize::MAX)
    }

    /// Entries with the given code, oldest first.
    pub fn get_by_code(&self, code: u16) -> Vec<LogEntry> {
        self.read()
            .queue
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.read().queue.len()
    }

    /// True when nothing has been recorded since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.read().queue.is_empty()
    }

    /// Entries dropped to make room since creation.
    pub fn eviction_count(&self) -> u64 {
        self.read().evicted
    }

    /// Drop every entry. The eviction count is kept.
    pub fn clear(&self) {
        self.write().queue.clear();
    }

    /// Maximum number of entries held.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ErrorLog {
    /// 1000 entries of at most 1 KiB each.
    fn default() -> Self {
        Self::new(1000, 1024)
    }
}

/// Clip `message` to at most `max_bytes`, ending on a char boundary and
/// followed by [`CLIPPED_MARKER`].
fn clip(mut message: String, max_bytes: usize) -> String {
    if message.len() <= max_bytes {
        return message;
    }
    let Some(budget) = max_bytes.checked_sub(CLIPPED_MARKER.len()) else {
        return CLIPPED_MARKER[..max_bytes].to_owned();
    };

    let cut = (0..=budget)
        .rev()
        .find(|&i| message.is_char_boundary(i))
        .unwrap_or(0);
    message.truncate(cut);
    message.push_str(CLIPPED_MARKER);
    message
}
