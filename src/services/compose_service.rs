//! Compose service - runs compose files for one service or a whole app
//!
//! Coordinates infra repo lookups, batch ordering and the compose runner.
//! Runs are strictly sequential and stop at the first failure.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::priority;
use crate::domain::{ComposeInvocation, PriorityMap, ServiceEntry};
use crate::error::BumblebeeError;
use crate::infrastructure::ComposeRunner;
use crate::infrastructure::infra_repo::{self, PRIORITY_FILE};
use crate::ui;

/// Service for running compose files against a runner
pub struct ComposeService<R> {
    runner: R,
}

impl<R: ComposeRunner> ComposeService<R> {
    /// Create a new compose service
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Resolve a single service's compose file and run it
    pub async fn run_service(
        &mut self,
        app_path: &Path,
        service: &str,
        args: &[String],
    ) -> Result<(), BumblebeeError> {
        let compose_file = infra_repo::resolve_compose(app_path, service)?;
        self.run_compose(&compose_file, args).await
    }

    /// Run every compose file in the app folder in priority order
    ///
    /// Returns the compose files that were run.
    pub async fn run_all(
        &mut self,
        app_path: &Path,
        args: &[String],
    ) -> Result<Vec<PathBuf>, BumblebeeError> {
        let targets = plan_all(app_path)?;

        if targets.is_empty() {
            ui::print_warning(&format!("No compose files found in {}", app_path.display()));
            return Ok(targets);
        }

        for compose_file in &targets {
            self.run_compose(compose_file, args).await?;
        }

        info!("Ran {} compose file(s) in {}", targets.len(), app_path.display());
        Ok(targets)
    }

    /// Run one compose file, framed by a header and divider
    pub async fn run_compose(
        &mut self,
        compose_file: &Path,
        args: &[String],
    ) -> Result<(), BumblebeeError> {
        let invocation = ComposeInvocation::new(compose_file, args);
        debug!("Compose args: {:?}", invocation.args());

        ui::print_divider();
        ui::print_info(&format!("Running docker file -> {}", compose_file.display()));
        let result = self.runner.run(&invocation).await;
        ui::print_divider();

        result.map_err(BumblebeeError::from)
    }

    /// Consume the service and return its runner
    #[cfg(test)]
    pub fn into_runner(self) -> R {
        self.runner
    }
}

/// Work out which compose files a batch run touches, in order
pub fn plan_all(app_path: &Path) -> Result<Vec<PathBuf>, BumblebeeError> {
    let entries = infra_repo::list_entries(app_path)?;

    println!("Checking for priority config({})...", PRIORITY_FILE);
    let lines = match infra_repo::read_priority_lines(app_path)? {
        Some(lines) => {
            println!("Priority config found!");
            lines
        }
        None => Vec::new(),
    };
    debug!("Priority map: {:?}", PriorityMap::from_lines(&lines));

    let sorted = priority::sort_by_priority(entries, &lines);
    Ok(sorted
        .iter()
        .filter_map(|entry| compose_target(app_path, entry))
        .collect())
}

/// Compose file for a listing entry, if it has one
fn compose_target(app_path: &Path, entry: &ServiceEntry) -> Option<PathBuf> {
    if entry.is_dir() {
        let nested = infra_repo::nested_compose_path(app_path, &entry.file_name);
        if nested.is_file() {
            return Some(nested);
        }
        debug!("Skipping {}: no {}", entry.name, nested.display());
        return None;
    }

    if priority::is_compose_filename(&entry.name) {
        return Some(app_path.join(&entry.file_name));
    }
    debug!("Skipping {}: not a compose file", entry.name);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComposeError;
    use std::fs;
    use tempfile::TempDir;

    /// Runner that records invocations and can fail on a chosen file
    #[derive(Default)]
    struct RecordingRunner {
        calls: Vec<ComposeInvocation>,
        fail_on: Option<String>,
    }

    impl ComposeRunner for RecordingRunner {
        async fn run(&mut self, invocation: &ComposeInvocation) -> Result<(), ComposeError> {
            self.calls.push(invocation.clone());
            let name = invocation.file().file_name().unwrap().to_string_lossy();
            if self.fail_on.as_deref() == Some(&*name) {
                return Err(ComposeError::Failed {
                    file: invocation.file().to_path_buf(),
                    code: Some(1),
                });
            }
            Ok(())
        }
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "services: {}\n").unwrap();
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    /// api (flat), cache (nested), db (nested), queue (flat)
    fn sample_app() -> TempDir {
        let app = TempDir::new().unwrap();
        touch(&app.path().join("api-compose.yml"));
        touch(&app.path().join("cache/cache-compose.yml"));
        touch(&app.path().join("db/db-compose.yml"));
        touch(&app.path().join("queue-compose.yml"));
        app
    }

    #[test]
    fn test_plan_follows_priority_file() {
        let app = sample_app();
        fs::write(app.path().join(PRIORITY_FILE), "db\ncache\n").unwrap();

        let plan = plan_all(app.path()).unwrap();

        assert_eq!(
            file_names(&plan),
            vec!["db-compose.yml", "cache-compose.yml", "api-compose.yml", "queue-compose.yml"]
        );
    }

    #[test]
    fn test_plan_without_priority_file_uses_listing_order() {
        let app = sample_app();

        let plan = plan_all(app.path()).unwrap();

        assert_eq!(
            file_names(&plan),
            vec!["api-compose.yml", "cache-compose.yml", "db-compose.yml", "queue-compose.yml"]
        );
    }

    #[test]
    fn test_plan_skips_directory_without_compose_file() {
        let app = TempDir::new().unwrap();
        fs::create_dir_all(app.path().join("postgres")).unwrap();
        touch(&app.path().join("postgres/docker-compose.yml"));
        touch(&app.path().join("redis-compose.yml"));
        fs::write(app.path().join("README.md"), "notes").unwrap();

        let plan = plan_all(app.path()).unwrap();

        assert_eq!(plan, vec![app.path().join("redis-compose.yml")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_rebuilds_paths_from_raw_names() {
        use std::ffi::{OsStr, OsString};
        use std::os::unix::ffi::OsStrExt;

        let app = TempDir::new().unwrap();
        let flat = app.path().join(OsStr::from_bytes(b"caf\xe9-compose.yml"));
        touch(&flat);
        let dir = OsStr::from_bytes(b"d\xff");
        let mut nested_name = OsString::from(dir);
        nested_name.push("-compose.yml");
        let nested = app.path().join(dir).join(nested_name);
        touch(&nested);

        let plan = plan_all(app.path()).unwrap();

        assert_eq!(plan.len(), 2);
        assert!(plan.contains(&flat));
        assert!(plan.contains(&nested));
        assert!(plan.iter().all(|path| path.is_file()));
    }

    #[test]
    fn test_plan_accepts_any_yml_file() {
        let app = TempDir::new().unwrap();
        touch(&app.path().join("settings.yml"));

        let plan = plan_all(app.path()).unwrap();

        assert_eq!(plan, vec![app.path().join("settings.yml")]);
    }

    #[tokio::test]
    async fn test_run_all_invokes_in_order_with_detach() {
        let app = sample_app();
        fs::write(app.path().join(PRIORITY_FILE), "queue\n").unwrap();
        let mut service = ComposeService::new(RecordingRunner::default());

        let ran = service.run_all(app.path(), &args(&["up"])).await.unwrap();

        let runner = service.into_runner();
        assert_eq!(ran.len(), 4);
        assert_eq!(runner.calls[0].file(), app.path().join("queue-compose.yml"));
        assert!(runner
            .calls
            .iter()
            .all(|call| call.args() == args(&["up", "-d"]).as_slice()));
    }

    #[tokio::test]
    async fn test_run_all_stops_at_first_failure() {
        let app = sample_app();
        let runner = RecordingRunner {
            fail_on: Some("cache-compose.yml".to_string()),
            ..Default::default()
        };
        let mut service = ComposeService::new(runner);

        let err = service.run_all(app.path(), &args(&["down"])).await.unwrap_err();

        assert!(matches!(err, BumblebeeError::Compose(ComposeError::Failed { .. })));
        let calls = service.into_runner().calls;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].file(), app.path().join("cache/cache-compose.yml"));
    }

    #[tokio::test]
    async fn test_run_all_empty_folder_succeeds() {
        let app = TempDir::new().unwrap();
        let mut service = ComposeService::new(RecordingRunner::default());

        let ran = service.run_all(app.path(), &args(&["ps"])).await.unwrap();

        assert!(ran.is_empty());
        assert!(service.into_runner().calls.is_empty());
    }

    #[tokio::test]
    async fn test_run_service_resolves_nested() {
        let app = sample_app();
        let mut service = ComposeService::new(RecordingRunner::default());

        service
            .run_service(app.path(), "db", &args(&["logs", "-f"]))
            .await
            .unwrap();

        let calls = service.into_runner().calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].file(), app.path().join("db/db-compose.yml"));
        assert_eq!(calls[0].args(), args(&["logs", "-f"]).as_slice());
    }

    #[tokio::test]
    async fn test_run_service_missing_never_runs() {
        let app = sample_app();
        let mut service = ComposeService::new(RecordingRunner::default());

        let err = service
            .run_service(app.path(), "kafka", &args(&["up"]))
            .await
            .unwrap_err();

        assert!(matches!(err, BumblebeeError::Resolve(_)));
        assert!(service.into_runner().calls.is_empty());
    }
}
