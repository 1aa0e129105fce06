use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strata_syntax::{HeadingLevel, NumberingError, NumberingPattern};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid numbering in config file at {config_path}: {source}")]
    InvalidNumbering {
        config_path: PathBuf,
        source: NumberingError,
    },

    #[error("Invalid include pattern {pattern:?}: {source}")]
    InvalidInclude {
        pattern: String,
        source: glob::PatternError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned when no path is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_path: Option<PathBuf>,
    /// Glob, relative to the scanned directory, selecting the files to read.
    pub include: String,
    /// Numbering pattern for outline counters, e.g. `1.1` or `I.a`.
    pub numbering: String,
    /// Deepest heading level shown in the outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u8>,
    /// Print the whole counter (`1.b`) or only the heading's own level (`b`).
    pub full_numbers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_path: None,
            include: "**/*.typ".to_string(),
            numbering: "1.1".to_string(),
            max_depth: None,
            full_numbers: true,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config
            .numbering_pattern()
            .map_err(|source| ConfigError::InvalidNumbering {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded notes path
        config.notes_path = config
            .notes_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/strata");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn numbering_pattern(&self) -> Result<NumberingPattern, NumberingError> {
        self.numbering.parse()
    }

    /// `max_depth` as a heading level; depths past 6 mean "everything".
    pub fn max_level(&self) -> Option<HeadingLevel> {
        self.max_depth
            .map(|depth| HeadingLevel::clamped(usize::from(depth)))
    }

    /// Files under `root` matching `include`, sorted.
    pub fn source_files(&self, root: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        let pattern = root.join(&self.include).to_string_lossy().into_owned();
        let paths = glob::glob(&pattern).map_err(|source| ConfigError::InvalidInclude {
            pattern: self.include.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = paths
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
