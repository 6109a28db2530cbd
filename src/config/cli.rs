use crate::adapters::firestore::{ClientOptions, DEFAULT_TIMEOUT_SECONDS};
use crate::config::toml_config::TomlConfig;
use crate::config::{DEFAULT_COLLECTION, DEFAULT_CREDENTIALS, DEFAULT_DOCUMENT};
use crate::core::session::SessionConfig;
use crate::domain::model::DEFAULT_DATABASE;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "firestore-conn")]
#[command(about = "Connect to Firestore with a service account and look up one document")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Service account credential file
    #[arg(long)]
    pub credentials: Option<String>,

    /// Override the project id from the credential file
    #[arg(long)]
    pub project_id: Option<String>,

    #[arg(long)]
    pub database: Option<String>,

    /// Firestore REST endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub collection: Option<String>,

    #[arg(long)]
    pub document: Option<String>,

    /// Read the document once after obtaining the reference
    #[arg(long)]
    pub fetch: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 合併 TOML 與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<SessionConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let session = SessionConfig {
            credentials: PathBuf::from(
                self.credentials
                    .clone()
                    .or(file.firestore.credentials)
                    .unwrap_or_else(|| DEFAULT_CREDENTIALS.to_string()),
            ),
            client: ClientOptions {
                endpoint: self.endpoint.clone().or(file.firestore.endpoint),
                project_id: self.project_id.clone().or(file.firestore.project_id),
                database_id: self
                    .database
                    .clone()
                    .or(file.firestore.database)
                    .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                emulator_host: None,
                timeout_seconds: self
                    .timeout_seconds
                    .or(file.firestore.timeout_seconds)
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            }
            .with_env(),
            collection: self
                .collection
                .clone()
                .or(file.target.collection)
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            document: self
                .document
                .clone()
                .or(file.target.document)
                .unwrap_or_else(|| DEFAULT_DOCUMENT.to_string()),
            fetch: self.fetch || file.target.fetch.unwrap_or(false),
        };

        session.validate()?;
        Ok(session)
    }
}
