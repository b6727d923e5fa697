//! Application-level configuration loading, including the runtime item list.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "BINGO_BACK_CONFIG_PATH";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    items: Vec<String>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in default item list.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        count = app_config.items.len(),
                        "loaded item list from config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Item labels used to seed the memory store and as the fallback when the
    /// installed store holds no items yet.
    pub fn items(&self) -> &[String] {
        &self.items
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            items: default_items(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    items: Vec<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self { items: value.items }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in item list shipped with the binary.
fn default_items() -> Vec<String> {
    [
        "Double Jump",
        "Ice Level",
        "Escort Mission",
        "Boss Phase 2",
        "Health Potion",
        "Tutorial",
        "Unskippable Cutscene",
        "Fetch Quest",
        "Silent Protagonist",
        "QTE",
        "Water Level",
        "Exploding Barrel",
        "Hidden Wall",
        "Save Point",
        "New Game+",
        "Long Credits",
        "Loot Box",
        "XP Grind",
        "Skill Tree",
        "NPC Blocking Path",
        "Respawning Enemies",
        "Fast Travel",
        "Game Over",
        "Victory Fanfare",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ITEM_CELLS;

    #[test]
    fn default_item_list_fills_a_full_board() {
        assert_eq!(AppConfig::default().items().len(), ITEM_CELLS);
    }
}
