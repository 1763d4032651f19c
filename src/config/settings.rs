use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::modbus::frame::parse_hex;
use crate::utils::error::ProbeError;

pub const DEFAULT_CONFIG_PATH: &str = "rtu_probe.toml";

const OUTPUT_FORMATS: [&str; 2] = ["console", "json"];
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub frame: FrameConfig,
    pub output: OutputConfig,
    pub ports: PortsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Hex command used by `crc`/`frame` when none is given on the command line.
    pub default_command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
    pub file_output: Option<FileOutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub enabled: bool,
    pub path: String,
    pub append: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortsConfig {
    pub usb_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "console".to_string(),
            file_output: None,
        }
    }
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "./data/rtu_probe.log".to_string(),
            append: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame: FrameConfig {
                default_command: Some("01 FA 0E 01 00".to_string()),
            },
            output: OutputConfig::default(),
            ports: PortsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Reads `path` when given; otherwise uses `rtu_probe.toml` in the working
    /// directory if present, else the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ProbeError> {
        match Self::source(path) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// The file `load` reads for `path`, or `None` when the defaults apply.
    pub fn source(path: Option<&str>) -> Option<PathBuf> {
        match path {
            Some(path) => Some(PathBuf::from(path)),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Some(PathBuf::from(DEFAULT_CONFIG_PATH)),
            None => None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProbeError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ProbeError::ConfigError(format!(
                "Cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ProbeError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Command line flags win over the file.
    pub fn apply_matches(&mut self, matches: &ArgMatches) -> Result<(), ProbeError> {
        if let Some(format) = matches.get_one::<String>("format") {
            self.output.default_format = format.clone();
        }

        if let Some(path) = matches.get_one::<String>("output-file") {
            self.output.file_output = Some(FileOutputConfig {
                enabled: true,
                path: path.clone(),
                append: self.output.file_output.as_ref().map_or(true, |f| f.append),
            });
        }

        if matches.get_flag("verbose") {
            self.logging.level = "debug".to_string();
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<(), ProbeError> {
        if !OUTPUT_FORMATS.contains(&self.output.default_format.as_str()) {
            return Err(ProbeError::ConfigError(format!(
                "Unknown output format '{}', expected one of: {}",
                self.output.default_format,
                OUTPUT_FORMATS.join(", ")
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ProbeError::ConfigError(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }

        if let Some(command) = &self.frame.default_command {
            parse_hex(command).map_err(|e| {
                ProbeError::ConfigError(format!("frame.default_command: {}", e))
            })?;
        }

        Ok(())
    }

    pub fn default_command(&self) -> Option<&str> {
        self.frame.default_command.as_deref()
    }

    pub fn file_output(&self) -> Option<&FileOutputConfig> {
        self.output.file_output.as_ref().filter(|f| f.enabled)
    }
}
