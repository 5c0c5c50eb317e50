use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_VAR: &str = "MATHKIT_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "mathkit.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level(), json: false }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub show_steps: bool,
    #[serde(default)]
    pub show_plot: bool,
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { show_steps: true, show_plot: false, pretty_json: true }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct MathkitConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl MathkitConfig {
    /// Location of the configuration file, `MATHKIT_CONFIG_PATH` first
    pub fn path() -> PathBuf {
        std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Read `path`; a missing file yields the defaults, a malformed one is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("Failed to parse configuration file '{}'", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read configuration file '{}'", path.display())),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Environment overrides applied on top of the file
    pub fn apply_env(mut self) -> Self {
        if let Ok(level) = std::env::var("MATHKIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(json) = std::env::var("MATHKIT_LOG_JSON") {
            if let Ok(json) = json.parse::<bool>() {
                self.logging.json = json;
            }
        }
        self
    }
}

fn default_level() -> String {
    "warn".to_string()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = MathkitConfig::parse("").unwrap();
        assert_eq!(config, MathkitConfig::default());
        assert_eq!(config.logging.level, "warn");
        assert!(config.output.show_steps);
        assert!(!config.output.show_plot);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = MathkitConfig::parse("[output]\nshow_plot = true\n").unwrap();
        assert!(config.output.show_plot);
        assert!(config.output.pretty_json);
        assert!(!config.logging.json);
    }

    #[test]
    fn malformed_file_is_rejected() {
        assert!(MathkitConfig::parse("[logging]\njson = \"sometimes\"\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = Path::new("definitely/not/here/mathkit.toml");
        assert_eq!(MathkitConfig::load_from(path).unwrap(), MathkitConfig::default());
    }
}
