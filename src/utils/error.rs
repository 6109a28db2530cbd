use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirestoreConnError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("JWT signing failed: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Credential error: {message}")]
    CredentialError { message: String },

    #[error("Token exchange failed with status {status}: {body}")]
    AuthError { status: u16, body: String },

    #[error("Firestore API returned status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Cannot decode document: {message}")]
    DecodeError { message: String },

    #[error("Invalid {kind} id '{id}': {reason}")]
    InvalidPathError {
        kind: &'static str,
        id: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FirestoreConnError {
    /// 是否為設定或憑證問題（使用者可自行修正）
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::CredentialError { .. }
                | Self::InvalidPathError { .. }
                | Self::ConfigError { .. }
                | Self::InvalidConfigValueError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::CredentialError { .. } | Self::JwtError(_) => {
                "Check that the credential file is a service account key downloaded from the console"
            }
            Self::AuthError { .. } => "Check that the service account is enabled and the clock is in sync",
            Self::ApiError { .. } | Self::DecodeError { .. } => "Check the project id, database id and service account permissions",
            Self::HttpError(_) => "Check network connectivity or the configured endpoint",
            Self::InvalidPathError { .. } => "Use collection and document ids without '/' or reserved names",
            Self::IoError(_) => "Check that the file exists and is readable",
            _ => "Check the configuration values",
        }
    }
}

pub type Result<T> = std::result::Result<T, FirestoreConnError>;
