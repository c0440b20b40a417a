//! `MockCatalog` — an in-memory `AutomationCatalog`.
//!
//! Serves the built-in actions by default.  Records every call and can be
//! given artificial latency or told to fail, which makes it a test double
//! as well as the catalog the CLI ships with.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{AutomationAction, AutomationCatalog, CatalogError};

/// Behaviour injected into `MockCatalog` at construction time.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Serve these actions.
    Serve(Vec<AutomationAction>),
    /// Fail every lookup with `Unavailable`.
    Fail(String),
}

#[derive(Debug)]
pub struct MockCatalog {
    behaviour: MockBehaviour,
    latency: Duration,
    calls: AtomicUsize,
}

impl MockCatalog {
    /// Catalog serving the built-in actions.
    pub fn builtin() -> Self {
        Self::serving(builtin_actions())
    }

    pub fn serving(actions: Vec<AutomationAction>) -> Self {
        Self {
            behaviour: MockBehaviour::Serve(actions),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            behaviour: MockBehaviour::Fail(msg.into()),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Delay every `list_actions` call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of times `list_actions` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl AutomationCatalog for MockCatalog {
    async fn list_actions(&self) -> Result<Vec<AutomationAction>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            debug!(latency = ?self.latency, "simulating catalog latency");
            tokio::time::sleep(self.latency).await;
        }

        match &self.behaviour {
            MockBehaviour::Serve(actions) => Ok(actions.clone()),
            MockBehaviour::Fail(msg) => Err(CatalogError::Unavailable(msg.clone())),
        }
    }
}

/// The actions every workflow builder gets out of the box.
pub fn builtin_actions() -> Vec<AutomationAction> {
    vec![
        AutomationAction::new("send_email", "Send Email", &["to", "subject", "body"]),
        AutomationAction::new("generate_doc", "Generate PDF Document", &["template_id", "recipient"]),
        AutomationAction::new("slack_msg", "Send Slack Notification", &["channel", "message"]),
        AutomationAction::new("update_hrms", "Update HR System", &["employee_id", "field", "value"]),
    ]
}
