//! Infra repo filesystem lookups
//!
//! Layout under the configured root:
//!
//! ```text
//! <root>/<app>/<production|non-production>/
//!     priority.txt                      (optional)
//!     redis-compose.yml                 (flat layout)
//!     postgres/postgres-compose.yml     (nested layout)
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::priority::{compose_file_name, COMPOSE_SUFFIX};
use crate::domain::{EntryKind, Environment, ServiceEntry};
use crate::error::ResolveError;

/// Name of the optional ordering file in an app's environment folder
pub const PRIORITY_FILE: &str = "priority.txt";

/// Resolve `<root>/<app>/<environment>` and check that it is a directory
pub fn resolve_app(
    root: &Path,
    app: &str,
    environment: Environment,
) -> Result<PathBuf, ResolveError> {
    let app_path = root.join(app).join(environment.as_str());
    if !app_path.is_dir() {
        return Err(ResolveError::AppNotFound {
            app: app.to_string(),
            environment: environment.to_string(),
            path: app_path,
        });
    }
    debug!("Resolved app {} to {}", app, app_path.display());
    Ok(app_path)
}

/// Resolve a service's compose file, flat layout first, then nested
pub fn resolve_compose(app_path: &Path, service: &str) -> Result<PathBuf, ResolveError> {
    let file = compose_file_name(service);

    let flat = app_path.join(&file);
    if flat.is_file() {
        debug!("Using flat compose file {}", flat.display());
        return Ok(flat);
    }

    let nested = nested_compose_path(app_path, OsStr::new(service));
    if nested.is_file() {
        debug!("Using nested compose file {}", nested.display());
        return Ok(nested);
    }

    Err(ResolveError::ComposeNotFound {
        file,
        search_root: app_path.to_path_buf(),
    })
}

/// `<app_path>/<service>/<service>-compose.yml`
pub fn nested_compose_path(app_path: &Path, service: &OsStr) -> PathBuf {
    let mut file = OsString::from(service);
    file.push(COMPOSE_SUFFIX);
    app_path.join(service).join(file)
}

/// List the entries directly under `app_path`, sorted by name
pub fn list_entries(app_path: &Path) -> Result<Vec<ServiceEntry>, ResolveError> {
    let io_err = |source| ResolveError::Io {
        path: app_path.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(app_path).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        // Follows symlinks so a linked service folder still counts as a directory
        let kind = if entry.path().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        entries.push(ServiceEntry::from_file_name(entry.file_name(), kind));
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Read the priority file lines, or `None` if the file does not exist
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_priority_lines(app_path: &Path) -> Result<Option<Vec<String>>, ResolveError> {
    let path = app_path.join(PRIORITY_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = std::fs::read(&path).map_err(|source| ResolveError::Io { path, source })?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(Some(content.lines().map(|line| line.trim_end().to_string()).collect()))
}
