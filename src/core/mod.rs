pub mod reporter;
pub mod session;

pub use crate::domain::model::{Document, DocumentPath, ServiceAccountKey};
pub use crate::domain::ports::{DocumentStore, TokenProvider};
pub use crate::utils::error::Result;
