//! docker compose execution
//!
//! Runs `docker compose -f <file> <args...>` with inherited stdio so build
//! and startup logs stream straight to the terminal.

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::ComposeInvocation;
use crate::error::ComposeError;
use crate::tools::{get_tool_path, tools};

/// Executes compose invocations
#[allow(async_fn_in_trait)]
pub trait ComposeRunner {
    /// Run one invocation to completion
    async fn run(&mut self, invocation: &ComposeInvocation) -> Result<(), ComposeError>;
}

/// Runner backed by the docker CLI
pub struct DockerCompose {
    docker: String,
}

impl DockerCompose {
    /// Create a runner for an explicit docker binary
    pub fn new(docker: impl Into<String>) -> Self {
        Self {
            docker: docker.into(),
        }
    }

    /// Create a runner using `DOCKER_BIN`, falling back to `docker` on PATH
    pub fn discover() -> Self {
        Self::new(get_tool_path(tools::DOCKER))
    }

    /// The docker binary this runner invokes
    pub fn docker(&self) -> &str {
        &self.docker
    }
}

impl ComposeRunner for DockerCompose {
    async fn run(&mut self, invocation: &ComposeInvocation) -> Result<(), ComposeError> {
        let docker = which::which(&self.docker).map_err(|_| ComposeError::ToolNotFound {
            tool: self.docker.clone(),
        })?;

        debug!("Executing: {}", invocation.command_line(&self.docker));

        let status = Command::new(&docker)
            .args(invocation.argv())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ComposeError::Spawn {
                tool: self.docker.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ComposeError::Failed {
                file: invocation.file().to_path_buf(),
                code: status.code(),
            });
        }

        info!("Finished {}", invocation.file().display());
        Ok(())
    }
}

/// Runner that prints command lines instead of executing them
pub struct DryRunCompose {
    docker: String,
}

impl DryRunCompose {
    pub fn new(docker: impl Into<String>) -> Self {
        Self {
            docker: docker.into(),
        }
    }
}

impl ComposeRunner for DryRunCompose {
    async fn run(&mut self, invocation: &ComposeInvocation) -> Result<(), ComposeError> {
        println!("{}", invocation.command_line(&self.docker));
        Ok(())
    }
}
