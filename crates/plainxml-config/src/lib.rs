//! Configuration management for plainxml.
//!
//! Parses `plainxml.toml` with serde and discovers it in the current
//! directory or its parents. CLI settings are applied during load via
//! [`CliSettings`] and take precedence over file values.
//!
//! ```toml
//! [render]
//! references = "prescan"
//! list_tags = "by_style"
//!
//! [output]
//! destination_dir = "${OUT_DIR:-build}"
//!
//! [cross_check]
//! expect = "requirements.json"
//! ```
//!
//! Relative paths are resolved against the directory holding the config
//! file. `output.destination_dir` and `cross_check.expect` support
//! `${VAR}` and `${VAR:-default}` expansion.

mod expand;

use std::path::{Path, PathBuf};

use plainxml_renderer::{ListTags, ReferenceMode, RenderOptions};
use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "plainxml.toml";

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub destination_dir: Option<PathBuf>,
    /// Override cross-reference mode.
    pub references: Option<ReferenceMode>,
    /// Override attribute escaping.
    pub escape_attributes: Option<bool>,
    /// Override list element selection.
    pub list_tags: Option<ListTags>,
    /// Override the expected-requirements file.
    pub expect: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render options passed to the renderer.
    pub render: RenderOptions,
    output: OutputConfigRaw,
    cross_check: CrossCheckConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Resolved cross-check configuration (set after loading).
    #[serde(skip)]
    pub cross_check_resolved: CrossCheckConfig,
    /// Path to the config file, if one was loaded.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    destination_dir: Option<String>,
    suffix: Option<String>,
}

/// Where rendered XML is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving output files.
    pub destination_dir: PathBuf,
    /// Output file suffix, including the leading dot.
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            destination_dir: PathBuf::from("."),
            suffix: DEFAULT_SUFFIX.to_owned(),
        }
    }
}

impl OutputConfig {
    /// Output path for a document named `name`.
    #[must_use]
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.destination_dir.join(format!("{name}{}", self.suffix))
    }
}

const DEFAULT_SUFFIX: &str = ".xml";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CrossCheckConfigRaw {
    expect: Option<String>,
}

/// Requirement cross-check configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossCheckConfig {
    /// JSON file listing the expected requirement numbers.
    pub expect: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.destination_dir`").
        field: String,
        /// Error message (e.g., "${`OUT_DIR`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// Loads `config_path` if given, otherwise the first `plainxml.toml`
    /// found in the current directory or its parents, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, or if
    /// reading, parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.destination_dir {
            self.output_resolved.destination_dir.clone_from(dir);
        }
        if let Some(references) = settings.references {
            self.render.references = references;
        }
        if let Some(escape) = settings.escape_attributes {
            self.render.escape_attributes = escape;
        }
        if let Some(list_tags) = settings.list_tags {
            self.render.list_tags = list_tags;
        }
        if let Some(expect) = &settings.expect {
            self.cross_check_resolved.expect = Some(expect.clone());
        }
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            render: RenderOptions::default(),
            output: OutputConfigRaw::default(),
            cross_check: CrossCheckConfigRaw::default(),
            output_resolved: OutputConfig {
                destination_dir: base.to_path_buf(),
                suffix: DEFAULT_SUFFIX.to_owned(),
            },
            cross_check_resolved: CrossCheckConfig::default(),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output.destination_dir {
            require_non_empty(dir, "output.destination_dir")?;
        }
        if let Some(suffix) = &self.output.suffix {
            require_non_empty(suffix, "output.suffix")?;
            if !suffix.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "output.suffix must start with '.', got \"{suffix}\""
                )));
            }
        }
        if let Some(expect) = &self.cross_check.expect {
            require_non_empty(expect, "cross_check.expect")?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output.destination_dir {
            self.output.destination_dir =
                Some(expand::expand_env(dir, "output.destination_dir")?);
        }
        if let Some(expect) = &self.cross_check.expect {
            self.cross_check.expect = Some(expand::expand_env(expect, "cross_check.expect")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            destination_dir: config_dir.join(self.output.destination_dir.as_deref().unwrap_or(".")),
            suffix: self
                .output
                .suffix
                .clone()
                .unwrap_or_else(|| DEFAULT_SUFFIX.to_owned()),
        };
        self.cross_check_resolved = CrossCheckConfig {
            expect: self.cross_check.expect.as_deref().map(|p| config_dir.join(p)),
        };
    }
}
