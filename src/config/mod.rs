//! # User Configuration
//!
//! A single YAML file holds the location of the infra repo:
//!
//! - default location: `~/.bumblebee/config.yml`
//! - override: `--config <path>` or `BUMBLEBEE_CONFIG`
//!
//! Loading never prompts. [`ConfigStore::load_or_init`] reports whether setup
//! is still needed, and [`ensure_configured`] drives the injected [`Prompt`]
//! when it is.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let store = ConfigStore::from_override(None)?;
//! let config = ensure_configured(&store, &mut StdinPrompt)?;
//! println!("Infra repo: {}", config.infra.path);
//! ```

mod global;

pub use global::GlobalConfig;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::infrastructure::Prompt;

/// Directory under `$HOME` holding the config file
pub const BASE_CONFIG_DIR: &str = ".bumblebee";

/// Config file name inside [`BASE_CONFIG_DIR`]
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Label shown when asking for the infra repo path
pub const INFRA_PATH_PROMPT: &str = "Please enter the path of infra repo.";

/// Result of loading the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigState {
    /// Config is usable as-is
    Loaded(GlobalConfig),
    /// Infra path is missing; the user has to provide it
    NeedsSetup,
}

/// Location of the persisted config file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    location: PathBuf,
}

impl ConfigStore {
    /// Store backed by an explicit file path
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Store at `~/.bumblebee/config.yml`
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(BASE_CONFIG_DIR).join(CONFIG_FILE_NAME)))
    }

    /// Store at the override path if given, otherwise the default location
    pub fn from_override(location: Option<PathBuf>) -> Result<Self, ConfigError> {
        match location {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_location(),
        }
    }

    /// Path of the config file
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Read the config, creating an empty file (and its directory) first if absent
    pub fn load_or_init(&self) -> Result<ConfigState, ConfigError> {
        self.init_if_missing()?;

        let content =
            std::fs::read_to_string(&self.location).map_err(|source| ConfigError::Read {
                path: self.location.clone(),
                source,
            })?;

        let config = parse(&content).map_err(|source| ConfigError::Parse {
            path: self.location.clone(),
            source,
        })?;

        if config.needs_setup() {
            debug!("Infra path not configured in {}", self.location.display());
            Ok(ConfigState::NeedsSetup)
        } else {
            debug!(
                "Loaded infra path {} from {}",
                config.infra.path,
                self.location.display()
            );
            Ok(ConfigState::Loaded(config))
        }
    }

    /// Persist the config, replacing the file contents
    pub fn save(&self, config: &GlobalConfig) -> Result<(), ConfigError> {
        self.ensure_parent_dir()?;
        let yaml = serde_yaml::to_string(config).map_err(ConfigError::Serialize)?;
        std::fs::write(&self.location, yaml).map_err(|source| ConfigError::Write {
            path: self.location.clone(),
            source,
        })?;
        info!("Saved config to {}", self.location.display());
        Ok(())
    }

    fn init_if_missing(&self) -> Result<(), ConfigError> {
        self.ensure_parent_dir()?;
        if !self.location.exists() {
            debug!("Creating empty config at {}", self.location.display());
            std::fs::write(&self.location, "").map_err(|source| ConfigError::Write {
                path: self.location.clone(),
                source,
            })?;
        }
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<(), ConfigError> {
        match self.location.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
                std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Parse config contents. An empty document is an empty config.
fn parse(content: &str) -> Result<GlobalConfig, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(GlobalConfig::default());
    }
    serde_yaml::from_str(content)
}

/// Load the config, running first-time setup through `prompt` when needed
pub fn ensure_configured<P: Prompt>(
    store: &ConfigStore,
    prompt: &mut P,
) -> Result<GlobalConfig, ConfigError> {
    match store.load_or_init()? {
        ConfigState::Loaded(config) => Ok(config),
        ConfigState::NeedsSetup => {
            let answer = prompt.ask(INFRA_PATH_PROMPT).map_err(ConfigError::Prompt)?;
            let path = answer.trim();
            if path.is_empty() {
                return Err(ConfigError::EmptyInfraPath);
            }
            let config = GlobalConfig::with_infra_path(path);
            store.save(&config)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::TempDir;

    /// Prompt that answers from a fixed script and records the labels it saw
    struct ScriptedPrompt {
        answers: Vec<io::Result<String>>,
        asked: Vec<String>,
    }

    impl ScriptedPrompt {
        fn answering(answer: &str) -> Self {
            Self {
                answers: vec![Ok(answer.to_string())],
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, label: &str) -> io::Result<String> {
            self.asked.push(label.to_string());
            self.answers.remove(0)
        }
    }

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join(BASE_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    #[test]
    fn test_load_creates_missing_dir_and_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let state = store.load_or_init().unwrap();

        assert_eq!(state, ConfigState::NeedsSetup);
        assert!(store.location().is_file());
        assert_eq!(std::fs::read_to_string(store.location()).unwrap(), "");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&GlobalConfig::with_infra_path("/srv/infra")).unwrap();

        match store.load_or_init().unwrap() {
            ConfigState::Loaded(config) => assert_eq!(config.infra.path, "/srv/infra"),
            ConfigState::NeedsSetup => panic!("expected loaded config"),
        }
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.location().parent().unwrap()).unwrap();
        std::fs::write(store.location(), "infra: [unclosed").unwrap();

        let err = store.load_or_init().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_ensure_configured_prompts_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut prompt = ScriptedPrompt::answering("  /home/dev/infra \n");

        let config = ensure_configured(&store, &mut prompt).unwrap();

        assert_eq!(config.infra.path, "/home/dev/infra");
        assert_eq!(prompt.asked, vec![INFRA_PATH_PROMPT.to_string()]);
        let saved = std::fs::read_to_string(store.location()).unwrap();
        assert!(saved.contains("path: /home/dev/infra"));
    }

    #[test]
    fn test_ensure_configured_skips_prompt_when_loaded() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&GlobalConfig::with_infra_path("/srv/infra")).unwrap();
        let mut prompt = ScriptedPrompt {
            answers: Vec::new(),
            asked: Vec::new(),
        };

        let config = ensure_configured(&store, &mut prompt).unwrap();

        assert_eq!(config.infra.path, "/srv/infra");
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_ensure_configured_rejects_empty_answer() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut prompt = ScriptedPrompt::answering("   ");

        let err = ensure_configured(&store, &mut prompt).unwrap_err();

        assert!(matches!(err, ConfigError::EmptyInfraPath));
        assert_eq!(std::fs::read_to_string(store.location()).unwrap(), "");
    }

    #[test]
    fn test_prompt_failure_is_config_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut prompt = ScriptedPrompt {
            answers: vec![Err(io::Error::new(io::ErrorKind::UnexpectedEof, "closed"))],
            asked: Vec::new(),
        };

        let err = ensure_configured(&store, &mut prompt).unwrap_err();
        assert!(matches!(err, ConfigError::Prompt(_)));
    }
}
