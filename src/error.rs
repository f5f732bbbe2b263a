//! Centralized error types for bumblebee
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.
//! `main` walks the anyhow chain and maps the first typed error to an exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for bumblebee operations
#[derive(Error, Debug)]
pub enum BumblebeeError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

impl BumblebeeError {
    /// Process exit code for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Config(_) => 3,
            Self::Resolve(_) => 4,
            Self::Compose(err) => err.exit_code(),
        }
    }
}

/// Command line usage errors, raised before any side effect
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("requires at least two args with -a flag")]
    TooFewArgsForAll,

    #[error("requires at least three args")]
    TooFewArgs,
}

/// Config store errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine home directory. Set BUMBLEBEE_CONFIG to a config file path")]
    NoHomeDir,

    #[error("Failed to create config directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize config")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Prompt failed")]
    Prompt(#[source] std::io::Error),

    #[error("Infra repo path cannot be empty")]
    EmptyInfraPath,
}

/// Infra repo lookup errors
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid app: {app} with environment: {environment} not found in infra ({path})")]
    AppNotFound {
        app: String,
        environment: String,
        path: PathBuf,
    },

    #[error("invalid compose file: {file} not found in {search_root}")]
    ComposeNotFound { file: String, search_root: PathBuf },

    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// External compose invocation errors
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("{tool} not found. Install docker or set DOCKER_BIN to the docker binary")]
    ToolNotFound { tool: String },

    #[error("Failed to execute {tool}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("docker compose failed for {file} ({})", describe_exit(.code))]
    Failed { file: PathBuf, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl ComposeError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::ToolNotFound { .. } => 127,
            Self::Spawn { .. } => 1,
            Self::Failed { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
        }
    }
}

/// Map an anyhow error to a process exit code
///
/// Walks the cause chain so that context added with `.context(...)` does not
/// hide the typed error underneath.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<BumblebeeError>() {
            return err.exit_code();
        }
        if cause.downcast_ref::<UsageError>().is_some() {
            return 2;
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return 3;
        }
        if cause.downcast_ref::<ResolveError>().is_some() {
            return 4;
        }
        if let Some(err) = cause.downcast_ref::<ComposeError>() {
            return err.exit_code();
        }
    }
    1
}
