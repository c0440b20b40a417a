//! `catalog` crate — the automation action catalog.
//!
//! Automated workflow steps reference an action by id.  The catalog says
//! which actions exist and which parameters each one needs.  The engine never
//! consults it; front ends use it to render parameter inputs and to warn about
//! incomplete steps.

pub mod action;
pub mod error;
pub mod mock;
pub mod traits;

pub use action::{missing_params, AutomationAction};
pub use error::CatalogError;
pub use mock::MockCatalog;
pub use traits::AutomationCatalog;
