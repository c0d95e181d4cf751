//! Extraction diagnostics and colored terminal warnings.
//!
//! [`Diagnostics`] is the per-call log that the extractor appends to whenever it
//! recovers from malformed markup. [`warn_once`] prints process-wide notices and
//! deduplicates them so the same message is not repeated for every document.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// A single recoverable anomaly reported during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Subsystem that raised the diagnostic (e.g. `"entity"`, `"symbol-font"`).
    pub component: &'static str,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.component, self.message)
    }
}

/// Append-only log of recoverable anomalies found while processing one document.
///
/// The log is owned by a single extraction call; callers clear it before
/// reusing the owner for another document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a diagnostic.
    pub fn push(&mut self, component: &'static str, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            component,
            message: message.into(),
        });
    }

    /// Move every entry of `other` onto the end of this log.
    pub fn append(&mut self, other: &mut Self) {
        self.entries.append(&mut other.entries);
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// The messages alone, in recording order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|d| d.message.clone()).collect()
    }

    /// Whether any entry's message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|d| d.message.contains(needle))
    }

    /// Print every entry to stderr as a yellow warning line.
    pub fn print(&self) {
        for entry in &self.entries {
            eprintln!(
                "{YELLOW}[Sieve {}] ⚠ {}{RESET}",
                entry.component, entry.message
            );
        }
    }
}

/// Warn about something the caller should know (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("charset", "document declares charset 'windows-1252'; decoding as UTF-8");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(component, message) {
        eprintln!("{YELLOW}[Sieve {component}] ⚠ {message}{RESET}");
    }
}

/// Record a warning; `true` only the first time it is seen in this process.
fn first_sighting(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(format!("[{component}] {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_clear() {
        let mut log = Diagnostics::new();
        assert!(log.is_empty());
        log.push("entity", "Unknown HTML entity: &foo;");
        log.push("symbol-font", "Symbol font used for the following: \"α\"");
        assert_eq!(log.len(), 2);
        assert!(log.contains("Unknown HTML entity"));
        assert_eq!(
            log.iter().next().map(ToString::to_string).as_deref(),
            Some("[entity] Unknown HTML entity: &foo;")
        );
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_warnings_are_recorded_once() {
        assert!(first_sighting("charset", "declares 'koi8-r'"));
        assert!(!first_sighting("charset", "declares 'koi8-r'"));
        assert!(first_sighting("fetch", "declares 'koi8-r'"));
    }

    #[test]
    fn test_append_moves_entries() {
        let mut parent = Diagnostics::new();
        let mut child = Diagnostics::new();
        child.push("entity", "Missing semicolon on HTML entity: &amp");
        parent.append(&mut child);
        assert!(child.is_empty());
        assert_eq!(parent.messages(), vec!["Missing semicolon on HTML entity: &amp"]);
    }
}
