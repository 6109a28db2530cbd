use crate::utils::error::{FirestoreConnError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub firestore: FirestoreSection,
    #[serde(default)]
    pub target: TargetSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirestoreSection {
    pub credentials: Option<String>,
    pub project_id: Option<String>,
    pub database: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetSection {
    pub collection: Option<String>,
    pub document: Option<String>,
    pub fetch: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FirestoreConnError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FirestoreConnError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_APPLICATION_CREDENTIALS})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FirestoreConnError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        // 找不到的變數保留原樣，交給後面的驗證處理
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(credentials) = &self.firestore.credentials {
            validate_path("firestore.credentials", credentials)?;
        }
        if let Some(endpoint) = &self.firestore.endpoint {
            validate_url("firestore.endpoint", endpoint)?;
        }
        if let Some(project_id) = &self.firestore.project_id {
            validate_non_empty_string("firestore.project_id", project_id)?;
        }
        if let Some(database) = &self.firestore.database {
            validate_non_empty_string("firestore.database", database)?;
        }
        if let Some(timeout) = self.firestore.timeout_seconds {
            validate_positive_number("firestore.timeout_seconds", timeout, 1)?;
        }
        Ok(())
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
[firestore]
credentials = "keys/prod.json"
project_id = "demo-project"
database = "analytics"
endpoint = "https://firestore.googleapis.com"
timeout_seconds = 10

[target]
collection = "users"
document = "alice"
fetch = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.firestore.credentials.as_deref(), Some("keys/prod.json"));
        assert_eq!(config.firestore.database.as_deref(), Some("analytics"));
        assert_eq!(config.target.collection.as_deref(), Some("users"));
        assert_eq!(config.target.fetch, Some(true));
        assert_eq!(config.firestore.timeout_seconds, Some(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.firestore.credentials.is_none());
        assert!(config.target.document.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FIRESTORE_CONN_TEST_KEY", "/secrets/key.json");

        let toml_content = r#"
[firestore]
credentials = "${FIRESTORE_CONN_TEST_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.firestore.credentials.as_deref(),
            Some("/secrets/key.json")
        );

        std::env::remove_var("FIRESTORE_CONN_TEST_KEY");
    }

    #[test]
    fn test_unknown_env_var_is_left_as_is() {
        let config = TomlConfig::from_toml_str(
            r#"
[target]
collection = "${FIRESTORE_CONN_SURELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.target.collection.as_deref(),
            Some("${FIRESTORE_CONN_SURELY_UNSET}")
        );
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[firestore]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[firestore]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[firestore\ncredentials ="),
            Err(FirestoreConnError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[target]\ndocument = \"doc_from_file\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.target.document.as_deref(), Some("doc_from_file"));
    }
}
