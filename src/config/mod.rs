#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::session::SessionConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};

pub const DEFAULT_CREDENTIALS: &str = "your_service_account_file.json";
pub const DEFAULT_COLLECTION: &str = "coll_id";
pub const DEFAULT_DOCUMENT: &str = "doc_id";

// collection / document id 的格式檢查留給 DocumentReference，
// 讓錯誤在文件操作階段才被回報
impl Validate for SessionConfig {
    fn validate(&self) -> Result<()> {
        validate_path("credentials", &self.credentials.to_string_lossy())?;
        validate_non_empty_string("database", &self.client.database_id)?;
        validate_positive_number("timeout_seconds", self.client.timeout_seconds, 1)?;
        if let Some(endpoint) = &self.client.endpoint {
            validate_url("endpoint", endpoint)?;
        }
        if let Some(project_id) = &self.client.project_id {
            validate_non_empty_string("project_id", project_id)?;
        }
        Ok(())
    }
}
