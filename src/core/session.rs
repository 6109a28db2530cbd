use crate::adapters::firestore::{ClientOptions, DocumentReference, FirestoreClient};
use crate::core::reporter::StatusReporter;
use crate::domain::model::{Document, ServiceAccountKey};
use crate::utils::error::{FirestoreConnError, Result};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub credentials: PathBuf,
    pub client: ClientOptions,
    pub collection: String,
    pub document: String,
    pub fetch: bool,
}

#[derive(Debug)]
pub enum Outcome {
    /// 只取得參照
    Referenced(DocumentReference),
    /// 取得參照並讀取一次；`None` 代表文件不存在
    Fetched(DocumentReference, Option<Document>),
    /// 文件操作失敗，錯誤已輸出
    Failed(FirestoreConnError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}

pub struct Session {
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// 載入憑證並初始化 client；這一段的錯誤直接往上拋
    pub fn connect<W: Write>(&self, reporter: &mut StatusReporter<W>) -> Result<FirestoreClient> {
        reporter.connecting();

        let key = ServiceAccountKey::from_file(&self.config.credentials)?;
        tracing::debug!("Loaded credentials for {}", key.client_email);

        let client = FirestoreClient::initialize(key, self.config.client.clone())?;
        reporter.connected();
        Ok(client)
    }

    async fn perform(&self, client: &FirestoreClient) -> Result<Outcome> {
        let doc_ref = client
            .collection(&self.config.collection)?
            .document(&self.config.document)?;

        if !self.config.fetch {
            return Ok(Outcome::Referenced(doc_ref));
        }

        let document = doc_ref.get().await?;
        Ok(Outcome::Fetched(doc_ref, document))
    }

    pub async fn run<W: Write>(&self, reporter: &mut StatusReporter<W>) -> Result<Outcome> {
        let client = self.connect(reporter)?;

        // 文件操作的任何錯誤都只輸出，不中斷
        let outcome = match self.perform(&client).await {
            Ok(outcome) => outcome,
            Err(e) => {
                reporter.exception(&e);
                return Ok(Outcome::Failed(e));
            }
        };

        match &outcome {
            Outcome::Referenced(doc_ref) => {
                reporter.detail(format!("Document reference: {}", doc_ref.resource_name()));
            }
            Outcome::Fetched(doc_ref, Some(document)) => {
                let fields = serde_json::to_string(&document.fields)?;
                reporter.detail(format!("{}: {}", doc_ref.path(), fields));
            }
            Outcome::Fetched(doc_ref, None) => {
                reporter.detail(format!("{}: document does not exist", doc_ref.path()));
            }
            Outcome::Failed(_) => {}
        }

        reporter.finished();
        Ok(outcome)
    }
}
