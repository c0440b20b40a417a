//! Catalog-level error type.

use thiserror::Error;

/// Errors returned by an [`crate::AutomationCatalog`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The backing service could not be reached.
    #[error("automation catalog unavailable: {0}")]
    Unavailable(String),

    /// No action is registered under this id.
    #[error("unknown automation action '{0}'")]
    UnknownAction(String),
}
