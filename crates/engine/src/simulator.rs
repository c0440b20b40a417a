//! Workflow simulation.
//!
//! `WorkflowSimulator` is a structural dry run:
//! 1. Validates the workflow (see [`crate::validator`]).
//! 2. Walks the graph breadth-first from the start node.
//! 3. Records one [`SimulationLog`] per visited node, in visitation order.
//!
//! Nothing is executed.  Every visited step is reported as `success`.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::SimulatorConfig;
use crate::error::StructuralError;
use crate::graph::Adjacency;
use crate::models::{Edge, Node};
use crate::validator::WorkflowValidator;

// ---------------------------------------------------------------------------
// Trace types
// ---------------------------------------------------------------------------

/// Outcome recorded for a simulated step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Success,
    Failed,
    Skipped,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::Success => "success",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One visitation event in a simulation trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationLog {
    /// 1-based position in the trace.
    pub step_id: u32,
    pub node_id: String,
    pub node_label: String,
    pub status: StepStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// The result of a simulation request.  `logs` is empty whenever `valid`
/// is `false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub valid: bool,
    pub errors: Vec<StructuralError>,
    pub logs: Vec<SimulationLog>,
}

impl SimulationResult {
    fn rejected(errors: Vec<StructuralError>) -> Self {
        Self {
            valid: false,
            errors,
            logs: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowSimulator
// ---------------------------------------------------------------------------

/// Stateless simulator.  Always validates before walking the graph.
#[derive(Debug, Clone, Default)]
pub struct WorkflowSimulator {
    validator: WorkflowValidator,
}

impl WorkflowSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            validator: WorkflowValidator::new(config.validator),
        }
    }

    /// Validate, then trace the workflow if it is valid.
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn run(&self, nodes: &[Node], edges: &[Edge]) -> SimulationResult {
        let verdict = self.validator.validate(nodes, edges);
        if !verdict.valid {
            return SimulationResult::rejected(verdict.errors);
        }

        let logs = trace(nodes, edges);
        info!("simulated {} steps", logs.len());

        SimulationResult {
            valid: true,
            errors: Vec::new(),
            logs,
        }
    }
}

/// Simulate with the default configuration.
pub fn run_simulation(nodes: &[Node], edges: &[Edge]) -> SimulationResult {
    WorkflowSimulator::default().run(nodes, edges)
}

/// Breadth-first trace of an already validated workflow.
///
/// Relies on the validator's guarantees (single start, acyclic, fully
/// reachable) and does not check them again.
pub(crate) fn trace(nodes: &[Node], edges: &[Edge]) -> Vec<SimulationLog> {
    let Some(start) = nodes.iter().find(|n| n.kind.is_start()) else {
        return Vec::new();
    };

    // First node wins when ids repeat (only possible under the lenient policy).
    let mut by_id: HashMap<&str, &Node> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        by_id.entry(node.id.as_str()).or_insert(node);
    }
    let adjacency = Adjacency::build(nodes, edges);
    let timestamp = Utc::now();

    adjacency
        .bfs_order(&start.id)
        .into_iter()
        .filter_map(|id| by_id.get(id).copied())
        .zip(1u32..)
        .map(|(node, step_id)| {
            debug!(step_id, node_id = %node.id, kind = %node.kind, "simulated step");
            SimulationLog {
                step_id,
                node_id: node.id.clone(),
                node_label: node.label.clone(),
                status: StepStatus::Success,
                message: format!("Simulated {} node: {}", node.kind, node.label),
                timestamp,
            }
        })
        .collect()
}
