//! Batch ordering for "run all"
//!
//! The priority file lists service names, one per line, highest priority
//! first. The first line gets [`TOP_PRIORITY`] and every following line one
//! less. Anything not listed has priority 0. Sorting is stable, so entries
//! with equal priority keep their listing order.

use regex::Regex;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::ffi::OsString;
use std::sync::OnceLock;

/// Priority given to the first line of the priority file
pub const TOP_PRIORITY: i64 = 999;

/// Suffix shared by every compose file name
pub const COMPOSE_SUFFIX: &str = "-compose.yml";

/// `<service>-compose.yml`
pub fn compose_file_name(service: &str) -> String {
    format!("{}{}", service, COMPOSE_SUFFIX)
}

/// Kind of a directory listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// An entry directly under an app's environment folder
///
/// `name` is the lossy UTF-8 form used for matching; `file_name` is the
/// on-disk name used to rebuild paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub name: String,
    pub file_name: OsString,
    pub kind: EntryKind,
}

impl ServiceEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        let name = name.into();
        Self {
            file_name: OsString::from(&name),
            name,
            kind,
        }
    }

    /// Entry for a raw directory listing name
    pub fn from_file_name(file_name: OsString, kind: EntryKind) -> Self {
        Self {
            name: file_name.to_string_lossy().into_owned(),
            file_name,
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Name looked up in the priority map
    ///
    /// Directories use their own name; files drop the `-compose.yml` suffix.
    pub fn service_name(&self) -> &str {
        match self.kind {
            EntryKind::Directory => &self.name,
            EntryKind::File => self
                .name
                .strip_suffix(COMPOSE_SUFFIX)
                .unwrap_or(&self.name),
        }
    }
}

/// Service name to priority, built from the priority file lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityMap {
    priorities: HashMap<String, i64>,
}

impl PriorityMap {
    /// Assign descending priorities in line order
    ///
    /// A name listed twice keeps the value of its last line.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let priorities = lines
            .iter()
            .zip((0..).map(|offset| TOP_PRIORITY - offset))
            .map(|(line, priority)| (line.as_ref().trim_end().to_string(), priority))
            .collect();
        Self { priorities }
    }

    /// Priority of a service, 0 if unlisted
    pub fn get(&self, service: &str) -> i64 {
        self.priorities.get(service).copied().unwrap_or(0)
    }

    /// Priority of a listing entry
    pub fn effective(&self, entry: &ServiceEntry) -> i64 {
        self.get(entry.service_name())
    }
}

/// Sort entries by descending priority, keeping listing order on ties
pub fn sort_by_priority<S: AsRef<str>>(
    mut entries: Vec<ServiceEntry>,
    priority_lines: &[S],
) -> Vec<ServiceEntry> {
    let priorities = PriorityMap::from_lines(priority_lines);
    entries.sort_by_key(|entry| Reverse(priorities.effective(entry)));
    entries
}

/// Loose check for a compose-looking file name
///
/// Matches a word character followed by any character and `yml`, anywhere in
/// the name. This accepts most `.yml` files, not only `*-compose.yml`.
pub fn is_compose_filename(name: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"[0-9A-Za-z_].yml").expect("valid compose file pattern"))
        .is_match(name)
}
