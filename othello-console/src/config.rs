//! Console settings, loadable from TOML.

use derive_more::{Display, Error};
use othello_engine::Cell;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display(fmt = "failed to read config file {}: {}", path, source)]
    FileRead { path: String, source: io::Error },

    #[display(fmt = "failed to parse TOML: {}", _0)]
    TomlParse(toml::de::Error),

    #[display(fmt = "config validation error: {}", reason)]
    Validation { reason: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err)
    }
}

/// Characters used to draw each kind of cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub player_one: char,
    pub player_two: char,
    pub empty: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs {
            player_one: '#',
            player_two: 'O',
            empty: '.',
        }
    }
}

impl Glyphs {
    pub fn glyph(&self, cell: Cell) -> char {
        match cell {
            Cell::Empty => self.empty,
            Cell::PlayerOne => self.player_one,
            Cell::PlayerTwo => self.player_two,
        }
    }
}

/// Top-level console configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where `save` and `load` go when no path is given.
    pub save_path: PathBuf,
    /// List the legal moves under the board.
    pub show_hints: bool,
    pub glyphs: Glyphs,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            save_path: PathBuf::from("othello.sav"),
            show_hints: true,
            glyphs: Glyphs::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Glyphs {
            player_one,
            player_two,
            empty,
        } = self.glyphs;
        if player_one == player_two || player_one == empty || player_two == empty {
            return Err(ConfigError::Validation {
                reason: "glyphs.player_one, glyphs.player_two and glyphs.empty must differ".into(),
            });
        }
        if self.save_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                reason: "save_path must not be empty".into(),
            });
        }
        Ok(())
    }
}
