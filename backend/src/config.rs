//! Service configuration file support.
//!
//! Configuration is read from a TOML file and then selectively overridden
//! from environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ServiceError, ServiceResult};
use crate::services::resources::DEFAULT_FORM_OPTIONS_PATH;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_EMULATOR_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_MINTE_VERSION: &str = "unknown";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "MINT_CONFIG";

/// Full service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub emulator: EmulatorSettings,
    #[serde(default)]
    pub resources: ResourceSettings,
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// External emulator process settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmulatorSettings {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Emulator package version reported by `/version`
    #[serde(default = "default_minte_version")]
    pub minte_version: String,
}

/// Static asset locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSettings {
    #[serde(default = "default_form_options_path")]
    pub form_options_path: PathBuf,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_EMULATOR_TIMEOUT_SECS
}

fn default_minte_version() -> String {
    DEFAULT_MINTE_VERSION.to_string()
}

fn default_form_options_path() -> PathBuf {
    PathBuf::from(DEFAULT_FORM_OPTIONS_PATH)
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            form_options_path: default_form_options_path(),
        }
    }
}

impl ResourceSettings {
    /// Anchor relative asset paths at `dir`, normally the config file's directory.
    pub fn resolve_relative_to(&mut self, dir: &Path) {
        if self.form_options_path.is_relative() {
            self.form_options_path = dir.join(&self.form_options_path);
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(ServerConfig)` if the file was read, parsed and validated
    /// * `Err(ServiceError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> ServiceResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ServiceError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            config.resources.resolve_relative_to(dir);
        }
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ServiceResult<Self> {
        let config: ServerConfig = toml::from_str(content).map_err(|e| {
            ServiceError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `mint.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> ServiceResult<Self> {
        let search_paths = [
            PathBuf::from("mint.toml"),
            PathBuf::from("backend/mint.toml"),
            PathBuf::from("../mint.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ServiceError::configuration(
            "No mint.toml found in standard locations",
        ))
    }

    /// Load from `MINT_CONFIG` if set, else from the default location, then
    /// apply environment overrides.
    pub fn load() -> ServiceResult<Self> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?,
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Environment Variables
    /// - `HOST`: listener host
    /// - `PORT`: listener port
    /// - `MINT_EMULATOR_COMMAND`: emulator executable
    /// - `MINT_FORM_OPTIONS_PATH`: form options asset
    pub fn apply_env_overrides(&mut self) -> ServiceResult<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ServiceResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| {
                ServiceError::configuration(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }
        if let Some(command) = lookup("MINT_EMULATOR_COMMAND") {
            self.emulator.command = command;
        }
        if let Some(path) = lookup("MINT_FORM_OPTIONS_PATH") {
            self.resources.form_options_path = PathBuf::from(path);
        }

        self.validate()
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if self.emulator.command.trim().is_empty() {
            return Err(ServiceError::configuration(
                "emulator.command must not be empty",
            ));
        }
        if self.emulator.timeout_secs == 0 {
            return Err(ServiceError::configuration(
                "emulator.timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
