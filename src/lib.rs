pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::firestore::{ClientOptions, CollectionReference, DocumentReference, FirestoreClient};
pub use core::reporter::StatusReporter;
pub use core::session::{Outcome, Session, SessionConfig};
pub use domain::model::{Document, DocumentPath, ServiceAccountKey};
pub use utils::error::{FirestoreConnError, Result};
