//! The `AutomationCatalog` trait: the lookup service front ends consult.

use async_trait::async_trait;

use crate::{AutomationAction, CatalogError};

/// A source of automation actions.
///
/// Lookups are async because real catalogs live behind a network call.
#[async_trait]
pub trait AutomationCatalog: Send + Sync {
    /// Every action the catalog offers.
    async fn list_actions(&self) -> Result<Vec<AutomationAction>, CatalogError>;

    /// The action registered under `id`, if any.
    async fn find(&self, id: &str) -> Result<Option<AutomationAction>, CatalogError> {
        Ok(self.list_actions().await?.into_iter().find(|a| a.id == id))
    }

    /// Parameter names `id` requires.
    ///
    /// # Errors
    /// [`CatalogError::UnknownAction`] if nothing is registered under `id`.
    async fn required_params(&self, id: &str) -> Result<Vec<String>, CatalogError> {
        self.find(id)
            .await?
            .map(|a| a.params)
            .ok_or_else(|| CatalogError::UnknownAction(id.to_owned()))
    }
}
