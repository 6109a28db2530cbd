// Adapters layer: concrete implementations for external systems (credentials, oauth, firestore REST)

pub mod auth;
pub mod credentials;
pub mod firestore;
