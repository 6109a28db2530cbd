use crate::domain::model::{Document, DocumentPath};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 提供 Bearer token；回傳 `None` 代表不需要授權（例如 emulator）
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<Option<String>>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>>;
}
