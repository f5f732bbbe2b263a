//! Per-user configuration persisted as YAML.

use serde::{Deserialize, Serialize};

/// Global user configuration
///
/// ```yaml
/// infra:
///   path: /home/me/code/infra
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Infra repo settings
    #[serde(default)]
    pub infra: InfraConfig,
}

/// Infra repo settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct InfraConfig {
    /// Root of the infra repo. Empty until first-run setup completes.
    #[serde(default)]
    pub path: String,
}

impl GlobalConfig {
    /// Config with the infra path set
    pub fn with_infra_path(path: impl Into<String>) -> Self {
        Self {
            infra: InfraConfig { path: path.into() },
        }
    }

    /// True when the infra path has not been configured yet
    pub fn needs_setup(&self) -> bool {
        self.infra.path.trim().is_empty()
    }
}
