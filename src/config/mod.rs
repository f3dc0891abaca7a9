#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::readiness::DEFAULT_READINESS_WINDOW;
use crate::core::session::{
    SessionConfig, DEFAULT_GENERATION_TIMEOUT, DEFAULT_MODEL, DEFAULT_REMOTE_DIR,
};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field,
    validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Settings after merging the TOML file with command-line overrides.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub model: String,
    pub readiness_timeout: Duration,
    pub generation_timeout: Duration,
    pub output_path: String,
    pub remote_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            model: DEFAULT_MODEL.to_string(),
            readiness_timeout: DEFAULT_READINESS_WINDOW,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            remote_dir: DEFAULT_REMOTE_DIR.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: file.service.endpoint.clone(),
            token: file.service.token.clone(),
            model: file.service.model.clone().unwrap_or(defaults.model),
            readiness_timeout: file
                .service
                .readiness_timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.readiness_timeout),
            generation_timeout: file
                .service
                .generation_timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.generation_timeout),
            output_path: file.output.path.clone().unwrap_or(defaults.output_path),
            remote_dir: file.output.remote_dir.clone().unwrap_or(defaults.remote_dir),
        }
    }

    /// 命令列參數覆蓋設定檔
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let mut config = Self::from_toml(&file);
        if let Some(endpoint) = &cli.endpoint {
            config.endpoint = Some(endpoint.clone());
        }
        if let Some(token) = &cli.token {
            config.token = Some(token.clone());
        }
        if let Some(model) = &cli.model {
            config.model = model.clone();
        }
        if let Some(output_path) = &cli.output_path {
            config.output_path = output_path.clone();
        }
        Ok(config)
    }

    pub fn endpoint(&self) -> Result<&str> {
        validate_required_field("service.endpoint", &self.endpoint).map(String::as_str)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            model: self.model.clone(),
            remote_dir: self.remote_dir.clone(),
            generation_timeout: self.generation_timeout,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.endpoint", self.endpoint()?)?;
        validate_non_empty_string("service.model", &self.model)?;
        validate_range(
            "service.readiness_timeout_seconds",
            self.readiness_timeout.as_secs(),
            1,
            600,
        )?;
        validate_range(
            "service.generation_timeout_seconds",
            self.generation_timeout.as_secs(),
            1,
            600,
        )?;
        validate_path("output.path", &self.output_path)?;
        validate_non_empty_string("output.remote_dir", &self.remote_dir)?;
        Ok(())
    }
}
