use crate::utils::error::{DrawError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSection {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub model: Option<String>,
    pub readiness_timeout_seconds: Option<u64>,
    pub generation_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    pub remote_dir: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DrawError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DrawError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DRAWGEN_TOKEN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[service]
endpoint = "https://platform.example.com/api"
model = "gpt-5"
readiness_timeout_seconds = 5
generation_timeout_seconds = 90

[output]
path = "./drawings"
remote_dir = "/cad"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.service.endpoint.as_deref(),
            Some("https://platform.example.com/api")
        );
        assert_eq!(config.service.model.as_deref(), Some("gpt-5"));
        assert_eq!(config.service.generation_timeout_seconds, Some(90));
        assert_eq!(config.output.remote_dir.as_deref(), Some("/cad"));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.service.endpoint.is_none());
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DRAWGEN_TEST_TOKEN", "secret-123");

        let toml_content = r#"
[service]
endpoint = "https://platform.example.com"
token = "${DRAWGEN_TEST_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.service.token.as_deref(), Some("secret-123"));

        std::env::remove_var("DRAWGEN_TEST_TOKEN");
    }

    #[test]
    fn test_unset_env_var_left_in_place() {
        let config = TomlConfig::from_toml_str(
            "[service]\ntoken = \"${DRAWGEN_SURELY_UNSET_VAR}\"\n",
        )
        .unwrap();
        assert_eq!(
            config.service.token.as_deref(),
            Some("${DRAWGEN_SURELY_UNSET_VAR}")
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[service\nendpoint = 1");
        assert!(matches!(result, Err(DrawError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"./out\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.path.as_deref(), Some("./out"));
    }
}
