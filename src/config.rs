use std::path::Path;

use crate::error::ConfigError;
use crate::game::{Piece, DEFAULT_COLS, DEFAULT_ROWS};

/// Deepest search the configuration accepts. Cost grows as `cols^depth`.
pub const MAX_SEARCH_DEPTH: usize = 8;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub ai: AiConfig,
    pub ui: UiConfig,
}

/// Grid dimensions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

/// Computer opponent settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Search depth to use without asking; `None` shows the difficulty prompt
    pub difficulty: Option<usize>,
    /// Highest difficulty offered by the prompt
    pub max_difficulty: usize,
    /// Score top-level columns in parallel
    pub parallel: bool,
    /// Seed for tie-breaking between equally scored columns
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            difficulty: None,
            max_difficulty: 6,
            parallel: false,
            seed: None,
        }
    }
}

/// Terminal front end settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub human_piece: Piece,
    pub human_first: bool,
    pub poll_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            human_piece: Piece::X,
            human_first: true,
            poll_interval_ms: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
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
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be > 0".into()));
        }
        if self.board.cols == 0 {
            return Err(ConfigError::Validation("board.cols must be > 0".into()));
        }
        if self.ai.max_difficulty > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "ai.max_difficulty must be <= {MAX_SEARCH_DEPTH}"
            )));
        }
        if let Some(difficulty) = self.ai.difficulty {
            if difficulty > self.ai.max_difficulty {
                return Err(ConfigError::Validation(
                    "ai.difficulty must be <= ai.max_difficulty".into(),
                ));
            }
        }
        if self.ui.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.poll_interval_ms must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
