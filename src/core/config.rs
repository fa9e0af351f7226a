//! Configuration module for `enrollment-rules`

use crate::core::enrollment::{EnrollmentPolicy, UnitTier};
use crate::core::models::DEFAULT_PASSING_GRADE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the application config directory
const APP_DIR_VAR: &str = "$ENROLLMENT_RULES";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Enrollment rule thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Grade at or above which a course counts as passed
    pub passing_grade: f64,
    /// GPA below which the probation cap applies
    pub probation_gpa: f64,
    /// Unit cap for students under `probation_gpa`
    pub probation_max_units: u32,
    /// GPA below which the standard cap applies
    pub standard_gpa: f64,
    /// Unit cap for students under `standard_gpa`
    pub standard_max_units: u32,
    /// Unit cap for everyone
    pub absolute_max_units: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            passing_grade: DEFAULT_PASSING_GRADE,
            probation_gpa: 12.0,
            probation_max_units: 14,
            standard_gpa: 16.0,
            standard_max_units: 16,
            absolute_max_units: 20,
        }
    }
}

impl RulesConfig {
    /// Build the validator policy from these thresholds
    #[must_use]
    pub fn policy(&self) -> EnrollmentPolicy {
        EnrollmentPolicy {
            passing_grade: self.passing_grade,
            tiers: vec![
                UnitTier {
                    gpa_below: self.probation_gpa,
                    max_units: self.probation_max_units,
                },
                UnitTier {
                    gpa_below: self.standard_gpa,
                    max_units: self.standard_max_units,
                },
            ],
            absolute_max_units: self.absolute_max_units,
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for committed enrollment records
    #[serde(default)]
    pub records_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Rule thresholds
    #[serde(default)]
    pub rules: RulesConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override records output directory
    pub records_dir: Option<String>,
}

impl Config {
    /// Get the `$ENROLLMENT_RULES` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/enrollment-rules`
    /// - macOS: `~/Library/Application Support/enrollment-rules`
    /// - Windows: `%APPDATA%\enrollment-rules`
    #[must_use]
    pub fn get_app_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("enrollment-rules")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled; rule thresholds already fall back to their defaults when
    /// parsing.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.records_dir.is_empty() && !defaults.paths.records_dir.is_empty() {
            self.paths
                .records_dir
                .clone_from(&defaults.paths.records_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values. Nothing is persisted.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(records_dir) = &overrides.records_dir {
            self.paths.records_dir.clone_from(records_dir);
        }
    }

    /// Get the user config file path
    ///
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_app_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$ENROLLMENT_RULES` in a string to the app directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(APP_DIR_VAR) {
            let app_dir = Self::get_app_dir();
            value.replace(APP_DIR_VAR, app_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$ENROLLMENT_RULES` is
    /// expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.records_dir = Self::expand_variables(&config.paths.records_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file has missing fields merged in from defaults and is
    /// re-saved. On first run the defaults are written out. Falls back to
    /// defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the
    /// file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `passing_grade`,
    /// `probation_gpa`, `probation_max_units`, `standard_gpa`,
    /// `standard_max_units`, `absolute_max_units`, `records_dir`.
    /// Dashes may be used in place of underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let rules = &self.rules;
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "passing_grade" => Some(rules.passing_grade.to_string()),
            "probation_gpa" => Some(rules.probation_gpa.to_string()),
            "probation_max_units" => Some(rules.probation_max_units.to_string()),
            "standard_gpa" => Some(rules.standard_gpa.to_string()),
            "standard_max_units" => Some(rules.standard_max_units.to_string()),
            "absolute_max_units" => Some(rules.absolute_max_units.to_string()),
            "records_dir" => Some(self.paths.records_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed for that key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let rules = &mut self.rules;
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "passing_grade" => rules.passing_grade = parse_grade(key, value)?,
            "probation_gpa" => rules.probation_gpa = parse_grade(key, value)?,
            "probation_max_units" => rules.probation_max_units = parse_units(key, value)?,
            "standard_gpa" => rules.standard_gpa = parse_grade(key, value)?,
            "standard_max_units" => rules.standard_max_units = parse_units(key, value)?,
            "absolute_max_units" => rules.absolute_max_units = parse_units(key, value)?,
            "records_dir" => self.paths.records_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        let rules = &mut self.rules;
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "passing_grade" => rules.passing_grade = defaults.rules.passing_grade,
            "probation_gpa" => rules.probation_gpa = defaults.rules.probation_gpa,
            "probation_max_units" => rules.probation_max_units = defaults.rules.probation_max_units,
            "standard_gpa" => rules.standard_gpa = defaults.rules.standard_gpa,
            "standard_max_units" => rules.standard_max_units = defaults.rules.standard_max_units,
            "absolute_max_units" => rules.absolute_max_units = defaults.rules.absolute_max_units,
            "records_dir" => self
                .paths
                .records_dir
                .clone_from(&defaults.paths.records_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_grade(key: &str, value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("Invalid grade value for '{key}': '{value}'")),
    }
}

fn parse_units(key: &str, value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| format!("Invalid unit count for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[rules]")?;
        writeln!(f, "  passing_grade = {}", self.rules.passing_grade)?;
        writeln!(f, "  probation_gpa = {}", self.rules.probation_gpa)?;
        writeln!(f, "  probation_max_units = {}", self.rules.probation_max_units)?;
        writeln!(f, "  standard_gpa = {}", self.rules.standard_gpa)?;
        writeln!(f, "  standard_max_units = {}", self.rules.standard_max_units)?;
        writeln!(f, "  absolute_max_units = {}", self.rules.absolute_max_units)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  records_dir = \"{}\"", self.paths.records_dir)?;

        Ok(())
    }
}
