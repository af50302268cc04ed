//! Catalog errors.

use std::path::PathBuf;

use thiserror::Error;

/// Why a provider document could not be used.
///
/// Per-field lookups never return these; they report absence as `None`. Only the
/// default-model accessors and the explicit document check surface them.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No document for the provider (or the provider is not a known one).
    #[error("no model config for provider '{provider}': expected {}", path.display())]
    ConfigNotFound { provider: String, path: PathBuf },
    /// Document exists but has no `default_model` field.
    #[error("model config for provider '{provider}' has no `default_model` field: {}", path.display())]
    MissingDefaultModel { provider: String, path: PathBuf },
    /// Document exists but is not valid YAML, or its top level is not a mapping.
    #[error("failed to parse model config {}: {message}", path.display())]
    ParseFailure { path: PathBuf, message: String },
    /// Checking for or reading the document failed at the storage level.
    #[error("model config {} unavailable: {message}", path.display())]
    StorageUnavailable { path: PathBuf, message: String },
}

impl CatalogError {
    /// The document path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            CatalogError::ConfigNotFound { path, .. }
            | CatalogError::MissingDefaultModel { path, .. }
            | CatalogError::ParseFailure { path, .. }
            | CatalogError::StorageUnavailable { path, .. } => path,
        }
    }
}

/// Failure reasons of [`ModelCatalog::default_model`](crate::ModelCatalog::default_model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DefaultModelError {
    #[error("config not found")]
    ConfigNotFound,
    #[error("missing default model")]
    MissingDefaultModel,
}
