//! Tuning knobs for the validator and simulator.

use serde::{Deserialize, Serialize};

/// How the validator treats edges whose endpoints are not in the node set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Drop dangling edges while building adjacency and say nothing.
    #[default]
    Lenient,
    /// Report dangling edges and duplicate node ids as structural errors.
    Strict,
}

/// Validator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub edge_policy: EdgePolicy,
}

impl ValidatorConfig {
    pub fn strict() -> Self {
        Self {
            edge_policy: EdgePolicy::Strict,
        }
    }
}

/// Simulator configuration.  The simulator always validates first, so it
/// carries the validator's settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub validator: ValidatorConfig,
}
