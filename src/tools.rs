//! Runtime tool path resolution
//!
//! For each external tool (e.g., `docker`), we:
//! 1. Check for an environment variable `{TOOL}_BIN` (e.g., `DOCKER_BIN`)
//! 2. Fall back to PATH-based invocation if the envvar is not set
//!
//! ```rust,ignore
//! // Reads DOCKER_BIN, falls back to "docker"
//! let docker = get_tool_path(tools::DOCKER);
//! ```

use std::env;

/// Get the path to an external tool
///
/// Checks for `{TOOL}_BIN` (uppercase tool name + "_BIN"). Falls back to the
/// tool name itself, which relies on PATH. An empty variable counts as unset.
pub fn get_tool_path(tool: &str) -> String {
    let env_var = format!("{}_BIN", tool.to_uppercase().replace('-', "_"));
    env::var(&env_var)
        .ok()
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| tool.to_string())
}

/// Common tool names
pub mod tools {
    pub const DOCKER: &str = "docker";
}
