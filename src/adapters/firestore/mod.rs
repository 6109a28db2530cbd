pub mod value;

use crate::adapters::auth::{ServiceAccountTokenProvider, StaticTokenProvider};
use crate::domain::model::{validate_id, Document, DocumentPath, ServiceAccountKey, DEFAULT_DATABASE};
use crate::domain::ports::{DocumentStore, TokenProvider};
use crate::utils::error::{FirestoreConnError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use value::RawDocument;

pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";
pub const EMULATOR_HOST_ENV: &str = "FIRESTORE_EMULATOR_HOST";
/// emulator 接受的固定 token，代表管理者權限
const EMULATOR_TOKEN: &str = "owner";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
    pub database_id: String,
    pub emulator_host: Option<String>,
    /// 單一請求（token 交換或讀取）的逾時秒數
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: None,
            project_id: None,
            database_id: DEFAULT_DATABASE.to_string(),
            emulator_host: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientOptions {
    /// 讀取 `FIRESTORE_EMULATOR_HOST`
    pub fn with_env(mut self) -> Self {
        self.emulator_host = std::env::var(EMULATOR_HOST_ENV)
            .ok()
            .filter(|host| !host.trim().is_empty());
        self
    }
}

struct ClientInner {
    http: Client,
    base_url: Url,
    project_id: String,
    database_id: String,
    tokens: Arc<dyn TokenProvider>,
}

/// Firestore 連線；clone 很便宜，共用同一個 HTTP client 與 token cache
#[derive(Clone)]
pub struct FirestoreClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for FirestoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("project_id", &self.inner.project_id)
            .field("database_id", &self.inner.database_id)
            .finish()
    }
}

impl FirestoreClient {
    /// 以 service account 憑證初始化 client
    pub fn initialize(key: ServiceAccountKey, options: ClientOptions) -> Result<Self> {
        validate_id("database", &options.database_id)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;
        let project_id = options
            .project_id
            .clone()
            .unwrap_or_else(|| key.project_id.clone());

        let (endpoint, tokens): (String, Arc<dyn TokenProvider>) =
            match (&options.endpoint, &options.emulator_host) {
                (Some(endpoint), _) => (
                    endpoint.clone(),
                    Arc::new(ServiceAccountTokenProvider::new(key, http.clone())?),
                ),
                (None, Some(host)) => {
                    tracing::info!("🧪 Using Firestore emulator at {}", host);
                    (
                        format!("http://{}", host),
                        Arc::new(StaticTokenProvider::new(EMULATOR_TOKEN)),
                    )
                }
                (None, None) => (
                    DEFAULT_ENDPOINT.to_string(),
                    Arc::new(ServiceAccountTokenProvider::new(key, http.clone())?),
                ),
            };

        Self::with_token_provider(&endpoint, &project_id, &options.database_id, tokens, http)
    }

    pub fn with_token_provider(
        endpoint: &str,
        project_id: &str,
        database_id: &str,
        tokens: Arc<dyn TokenProvider>,
        http: Client,
    ) -> Result<Self> {
        let base_url = Url::parse(endpoint).map_err(|e| FirestoreConnError::InvalidConfigValueError {
            field: "endpoint".to_string(),
            value: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FirestoreConnError::InvalidConfigValueError {
                field: "endpoint".to_string(),
                value: endpoint.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        tracing::debug!(
            "Firestore client ready: endpoint={}, project={}, database={}",
            base_url,
            project_id,
            database_id
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                project_id: project_id.to_string(),
                database_id: database_id.to_string(),
                tokens,
            }),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    pub fn database_id(&self) -> &str {
        &self.inner.database_id
    }

    pub fn collection(&self, collection_id: &str) -> Result<CollectionReference> {
        validate_id("collection", collection_id)?;
        Ok(CollectionReference {
            client: self.clone(),
            id: collection_id.to_string(),
        })
    }

    fn document_url(&self, path: &DocumentPath) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "v1",
                "projects",
                self.inner.project_id.as_str(),
                "databases",
                self.inner.database_id.as_str(),
                "documents",
                path.collection_id(),
                path.document_id(),
            ]);
        }
        url
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>> {
        let url = self.document_url(path);
        tracing::debug!("GET {}", url);

        let mut request = self.inner.http.get(url);
        if let Some(token) = self.inner.tokens.access_token().await? {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!("Firestore response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FirestoreConnError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let raw: RawDocument = response.json().await?;
        Ok(Some(raw.into_document()?))
    }
}

#[derive(Debug, Clone)]
pub struct CollectionReference {
    client: FirestoreClient,
    id: String,
}

impl CollectionReference {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 取得文件參照，不做任何網路請求
    pub fn document(&self, document_id: &str) -> Result<DocumentReference> {
        let path = DocumentPath::new(&self.id, document_id)?;
        Ok(DocumentReference {
            client: self.client.clone(),
            path,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DocumentReference {
    client: FirestoreClient,
    path: DocumentPath,
}

impl DocumentReference {
    pub fn id(&self) -> &str {
        self.path.document_id()
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    pub fn resource_name(&self) -> String {
        self.path
            .resource_name(self.client.project_id(), self.client.database_id())
    }

    pub fn parent(&self) -> CollectionReference {
        CollectionReference {
            client: self.client.clone(),
            id: self.path.collection_id().to_string(),
        }
    }

    pub async fn get(&self) -> Result<Option<Document>> {
        self.client.get_document(&self.path).await
    }
}
