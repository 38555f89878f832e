//! Todir root directory management.

use std::path::PathBuf;

use crate::error::{TodirError, TodirResult};
use crate::todir_config::TodirConfig;
use config::{Config, File};

#[derive(Clone)]
pub struct Todir {
    config: TodirConfig,
}

impl Todir {
    pub fn load() -> TodirResult<Self> {
        let config_path = TodirConfig::config_path()?;

        if !config_path.exists() {
            TodirConfig::create_default_config(&config_path)?;
        }

        let config: TodirConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| TodirError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TodirError::Config(e.to_string()))?;

        Ok(Todir { config })
    }

    /// Where the todo files live, with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.todo_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Returns the todo directory path in display-friendly form,
    /// keeping `~` instead of expanding to the full home directory.
    pub fn display_path(&self) -> PathBuf {
        self.config.todo_dir.clone()
    }

    /// Point the config at a new todo directory and persist it.
    pub fn set_todo_dir(&mut self, dir: PathBuf) -> TodirResult<()> {
        self.config.todo_dir = dir;
        self.config.save()
    }
}
