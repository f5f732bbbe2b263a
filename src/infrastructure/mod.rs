//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that interacts with external systems:
//! - The infra repo on disk
//! - docker compose
//! - The interactive terminal

pub mod compose;
pub mod infra_repo;
pub mod prompt;

// Re-export commonly used types
pub use compose::{ComposeRunner, DockerCompose, DryRunCompose};
pub use prompt::{Prompt, StdinPrompt};
