//! Process-wide, queryable log sink.
//!
//! Unlike the `tracing` pipeline, which is write-only from the service's
//! point of view, the sink retains every entry in memory so the log
//! endpoints can read them back. Exactly one shared instance exists for
//! the lifetime of the process; `global()` lazily constructs it on first
//! access and every later call returns the same handle.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use colored::Colorize;
use paylab_types::{LogEntry, LogLevel};
use uuid::Uuid;

static GLOBAL: OnceLock<Arc<LogSink>> = OnceLock::new();

/// In-memory, append-only log store with level-styled console output.
///
/// One mutex guards both the entry vector and the console write, so log
/// lines never interleave mid-line and readers always see a consistent
/// point-in-time snapshot.
#[derive(Debug)]
pub struct LogSink {
    instance_id: String,
    entries: Mutex<Vec<LogEntry>>,
}

impl LogSink {
    /// Creates a private sink.
    ///
    /// Production code goes through [`LogSink::global`]; private sinks
    /// exist so components can be wired with an isolated store in tests.
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Returns the shared process-wide sink, constructing it on first
    /// access.
    ///
    /// `OnceLock` serializes concurrent first access, so construction
    /// happens at most once no matter how many threads race here.
    pub fn global() -> Arc<LogSink> {
        GLOBAL
            .get_or_init(|| {
                let sink = Arc::new(LogSink::new());
                println!("[sink] shared log sink initialized (instance {})", sink.instance_id());
                sink
            })
            .clone()
    }

    /// Stable identity token of this sink instance.
    ///
    /// Callers use it to prove that repeated [`LogSink::global`] calls
    /// return the same object.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn info(&self, message: impl Into<String>, source: &str) {
        self.append(LogLevel::Info, message.into(), source);
    }

    pub fn warning(&self, message: impl Into<String>, source: &str) {
        self.append(LogLevel::Warning, message.into(), source);
    }

    pub fn error(&self, message: impl Into<String>, source: &str) {
        self.append(LogLevel::Error, message.into(), source);
    }

    fn append(&self, level: LogLevel, message: String, source: &str) {
        let entry = LogEntry::new(level, message, source);
        let mut entries = self.lock_entries();

        let line = format!(
            "[{}] [{}] [{}] {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.level,
            entry.source,
            entry.message
        );
        // colored resets the style at the end of the line regardless of
        // what the message contains
        let styled = match entry.level {
            LogLevel::Error => line.red(),
            LogLevel::Warning => line.yellow(),
            LogLevel::Info => line.green(),
        };
        println!("{styled}");

        entries.push(entry);
    }

    /// Snapshot of every retained entry, in call order.
    pub fn all(&self) -> Vec<LogEntry> {
        self.lock_entries().clone()
    }

    /// Snapshot of the entries at the given level. The level string is
    /// matched case-insensitively; an unknown level yields an empty
    /// result.
    pub fn by_level(&self, level: &str) -> Vec<LogEntry> {
        let Ok(level) = level.parse::<LogLevel>() else {
            return Vec::new();
        };
        self.lock_entries()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    /// Number of retained entries.
    pub fn count(&self) -> usize {
        self.lock_entries().len()
    }

    /// Removes every retained entry and reports how many were dropped.
    pub fn clear(&self) -> usize {
        let mut entries = self.lock_entries();
        let cleared = entries.len();
        entries.clear();
        println!("[sink] cleared {cleared} log entries");
        cleared
    }

    fn lock_entries(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        // a poisoned lock only means a writer panicked mid-call; the
        // vector itself is still well-formed
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}
