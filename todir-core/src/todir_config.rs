//! Global todir configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{TodirError, TodirResult};

static DEFAULT_TODO_DIR: &str = "~/todos";

fn default_todo_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TODO_DIR)
}

fn is_default_todo_dir(p: &PathBuf) -> bool {
    *p == default_todo_dir()
}

/// Global configuration at ~/.config/todir/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct TodirConfig {
    #[serde(default = "default_todo_dir", skip_serializing_if = "is_default_todo_dir")]
    pub todo_dir: PathBuf,
}

impl Default for TodirConfig {
    fn default() -> Self {
        TodirConfig { todo_dir: default_todo_dir() }
    }
}

impl TodirConfig {
    pub fn config_path() -> TodirResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TodirError::Config("Could not determine config directory".into()))?
            .join("todir");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the current config to ~/.config/todir/config.toml
    pub fn save(&self) -> TodirResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| TodirError::Config(e.to_string()))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TodirError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(&config_path, content)
            .map_err(|e| TodirError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> TodirResult<()> {
        let contents = format!(
            "\
# todir configuration

# Where your todos live:
# todo_dir = \"{}\"
",
            DEFAULT_TODO_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TodirError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TodirError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
