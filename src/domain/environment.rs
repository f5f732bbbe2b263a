//! Deployment environment selection

use std::fmt;

/// Environment folder inside an app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    NonProduction,
}

impl Environment {
    /// Pick the environment from the `--dev` flag
    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            Self::NonProduction
        } else {
            Self::Production
        }
    }

    /// Folder name in the infra repo
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::NonProduction => "non-production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
