// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
#![cfg(not(target_os = "none"))]

//! Platform defaults for the setup-form settings.
//!
//! Boards ship a small TOML file next to the firmware image:
//!
//! ```toml
//! [defaults]
//! hyp_enable = 1
//! cpu_clock = 2
//! ```
//!
//! Keys left out keep their built-in value of zero.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::settings::SettingDefaults;

/// Environment variable naming the defaults file.
pub const DEFAULTS_ENV: &str = "FWCONFIG_DEFAULTS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FwConfig {
    pub defaults: SettingDefaults,
}

impl FwConfig {
    /// Parse TOML text; `origin` only labels errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &display)
    }

    /// Load `path` if given, falling back to built-in defaults on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(cfg) => {
                info!("[fwconfig] defaults loaded from {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("[fwconfig] {e}; using built-in defaults");
                Self::default()
            }
        }
    }

    /// Defaults from the file named by [`DEFAULTS_ENV`], if set.
    pub fn from_env() -> Self {
        let path = std::env::var_os(DEFAULTS_ENV).map(PathBuf::from);
        Self::load_or_default(path.as_deref())
    }
}
