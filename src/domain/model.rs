use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::error::{FirestoreConnError, Result};

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_DATABASE: &str = "(default)";

const MAX_ID_BYTES: usize = 1500;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Service account 憑證檔內容
#[derive(Clone, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

// 避免私鑰出現在日誌中
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .field("client_id", &self.client_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// 單一文件的位置：collection id + document id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath {
    collection_id: String,
    document_id: String,
}

impl DocumentPath {
    pub fn new(collection_id: &str, document_id: &str) -> Result<Self> {
        validate_id("collection", collection_id)?;
        validate_id("document", document_id)?;
        Ok(Self {
            collection_id: collection_id.to_string(),
            document_id: document_id.to_string(),
        })
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// 相對於資料庫的路徑，例如 `users/alice`
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.collection_id, self.document_id)
    }

    /// 完整資源名稱
    pub fn resource_name(&self, project_id: &str, database_id: &str) -> String {
        format!(
            "projects/{}/databases/{}/documents/{}",
            project_id,
            database_id,
            self.relative_path()
        )
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection_id, self.document_id)
    }
}

pub(crate) fn validate_id(kind: &'static str, id: &str) -> Result<()> {
    let invalid = |reason: &str| FirestoreConnError::InvalidPathError {
        kind,
        id: id.to_string(),
        reason: reason.to_string(),
    };

    if id.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if id.contains('/') {
        return Err(invalid("must not contain '/'"));
    }
    if id == "." || id == ".." {
        return Err(invalid("must not be '.' or '..'"));
    }
    if id.len() >= 4 && id.starts_with("__") && id.ends_with("__") {
        return Err(invalid("ids of the form __.*__ are reserved"));
    }
    if id.len() > MAX_ID_BYTES {
        return Err(invalid("must be at most 1500 bytes"));
    }
    Ok(())
}

/// 讀取到的文件，欄位已從 Firestore 的型別格式轉成一般 JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub name: String,
    pub fields: BTreeMap<String, serde_json::Value>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    /// 文件名稱的最後一段
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.fields.get(field)
    }
}
