//! `bumblebee infra` - run docker compose for one service or a whole app
//!
//! Argument validation runs first, before the config file or the infra repo
//! is touched.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{self, ConfigStore};
use crate::domain::Environment;
use crate::error::{BumblebeeError, UsageError};
use crate::infrastructure::infra_repo;
use crate::infrastructure::{ComposeRunner, DockerCompose, DryRunCompose, StdinPrompt};
use crate::services::ComposeService;
use crate::ui;

/// `--dev` and `--all`, which may also appear among the positionals
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InfraFlags {
    pub dev: bool,
    pub all: bool,
}

impl InfraFlags {
    /// Pull `-d/--dev` and `-a/--all` out of `args`
    ///
    /// Everything after a `--` separator is kept as-is, with the separator
    /// itself dropped, so compose's own `-d` or `-a` can still be passed.
    pub fn extract(mut self, args: &[String]) -> (Self, Vec<String>) {
        let mut rest = Vec::with_capacity(args.len());
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--" => {
                    rest.extend(iter.by_ref().cloned());
                    break;
                }
                "--dev" => self.dev = true,
                "--all" => self.all = true,
                cluster if is_short_flag_cluster(cluster) => {
                    self.dev |= cluster.contains('d');
                    self.all |= cluster.contains('a');
                }
                _ => rest.push(arg.clone()),
            }
        }
        (self, rest)
    }
}

/// `-d`, `-a`, `-ad`, `-da`, ...
fn is_short_flag_cluster(arg: &str) -> bool {
    arg.strip_prefix('-')
        .is_some_and(|flags| !flags.is_empty() && flags.chars().all(|c| c == 'd' || c == 'a'))
}

/// What the positional arguments ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfraTarget {
    /// One service of an app
    Service {
        app: String,
        service: String,
        compose_args: Vec<String>,
    },
    /// Every service of an app
    All {
        app: String,
        compose_args: Vec<String>,
    },
}

impl InfraTarget {
    /// Split positionals into app, optional service, and forwarded compose args
    pub fn parse(all: bool, args: &[String]) -> Result<Self, UsageError> {
        if all {
            match args {
                [app, compose_args @ ..] if !compose_args.is_empty() => Ok(Self::All {
                    app: app.clone(),
                    compose_args: compose_args.to_vec(),
                }),
                _ => Err(UsageError::TooFewArgsForAll),
            }
        } else {
            match args {
                [app, service, compose_args @ ..] if !compose_args.is_empty() => {
                    Ok(Self::Service {
                        app: app.clone(),
                        service: service.clone(),
                        compose_args: compose_args.to_vec(),
                    })
                }
                _ => Err(UsageError::TooFewArgs),
            }
        }
    }

    pub fn app(&self) -> &str {
        match self {
            Self::Service { app, .. } | Self::All { app, .. } => app,
        }
    }
}

/// Execute the infra command
pub async fn execute(
    config_file: Option<PathBuf>,
    dev: bool,
    all: bool,
    dry_run: bool,
    args: Vec<String>,
) -> Result<()> {
    let (flags, positionals) = InfraFlags { dev, all }.extract(&args);
    let target = InfraTarget::parse(flags.all, &positionals).map_err(BumblebeeError::from)?;
    let environment = Environment::from_dev_flag(flags.dev);
    debug!("Infra target: {:?} ({})", target, environment);

    let store = ConfigStore::from_override(config_file).map_err(BumblebeeError::from)?;
    let config = config::ensure_configured(&store, &mut StdinPrompt)
        .map_err(BumblebeeError::from)
        .context("Failed to load bumblebee config")?;

    let root = Path::new(&config.infra.path);
    let app_path =
        infra_repo::resolve_app(root, target.app(), environment).map_err(BumblebeeError::from)?;
    info!("Using {}", app_path.display());

    let docker = DockerCompose::discover();
    if dry_run {
        let runner = DryRunCompose::new(docker.docker());
        run_target(ComposeService::new(runner), &app_path, &target).await
    } else {
        run_target(ComposeService::new(docker), &app_path, &target).await
    }
}

async fn run_target<R: ComposeRunner>(
    mut service: ComposeService<R>,
    app_path: &Path,
    target: &InfraTarget,
) -> Result<()> {
    match target {
        InfraTarget::Service {
            service: name,
            compose_args,
            ..
        } => {
            service.run_service(app_path, name, compose_args).await?;
        }
        InfraTarget::All { compose_args, .. } => {
            let ran = service.run_all(app_path, compose_args).await?;
            if !ran.is_empty() {
                ui::print_success(&format!("Ran {} compose file(s)", ran.len()));
            }
        }
    }
    Ok(())
}
